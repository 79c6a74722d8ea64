//! combat_core - Combat simulation and offline progress engine
//!
//! This library provides:
//! - Stat aggregation: class, gear, talent and buff layers folded into combat stats
//! - Combat simulation: a seeded, tick-based fight between a character and an enemy
//! - Batch simulation: repeated fights and offline catch-up with level-ups
//! - Content configuration: TOML tables for classes, abilities, enemies and activities

pub mod ability;
pub mod batch;
pub mod combat;
pub mod config;
pub mod defense;
pub mod enemy;
pub mod prelude;
pub mod scenario;
pub mod source;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use ability::{AbilityDefinition, AbilityEffect, AbilityTrigger, PriorityRotation, RotationStrategy};
pub use batch::{
    calculate_offline_progress, calculate_offline_progress_seeded, simulate_batch_combat, BatchCombatInput,
    BatchCombatResult, OfflineCharacter, OfflineProgressResult,
};
pub use combat::{
    simulate_combat, simulate_combat_with_rng, simulate_combat_with_strategy, CombatOutcome, CombatResult,
    CombatSimulationInput,
};
pub use config::{ConfigError, GameConstants, GameContent};
pub use enemy::EnemyDefinition;
pub use scenario::Scenario;
pub use source::{BaseStatsSource, BuffEffect, GearSource, StatSource, TalentBonuses};
pub use stats::{
    calculate_average_item_level, calculate_combat_stats, estimate_dps, estimate_survivability, AggregatedStats,
    CharacterData, CombatStats, EquipmentSet, EquippedItem,
};
pub use types::{Attribute, Difficulty, EnemyTier, EquipmentSlot, ResourceType, StatModifier, StatType};
