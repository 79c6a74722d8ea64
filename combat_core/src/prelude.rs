//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Attribute, CombatSide, Difficulty, EnemyTier, EquipmentSlot, ResourceType, StatModifier, StatType};

// Stats
pub use crate::stats::{calculate_average_item_level, calculate_combat_stats, AggregatedStats, CharacterData, CombatStats, EquipmentSet, EquippedItem};

// Combat
pub use crate::combat::{simulate_combat, simulate_combat_with_rng, CombatOutcome, CombatResult, CombatSimulationInput};

// Batch and offline
pub use crate::batch::{calculate_offline_progress, simulate_batch_combat, BatchCombatInput, OfflineCharacter};

// Sources
pub use crate::source::{BuffEffect, StatSource, TalentBonuses};

// Config
pub use crate::config::{GameConstants, GameContent};
pub use crate::scenario::Scenario;
