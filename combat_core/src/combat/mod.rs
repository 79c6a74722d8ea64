//! Combat simulation - One bounded fight between a character and an enemy

mod input;
mod log;
mod result;
mod rewards;
mod simulator;
mod state;

pub use input::{BuffPotion, CombatSettings, CombatSimulationInput, CombatantSnapshot, Consumables};
pub use log::{CombatLogEntry, Highlight, HighlightKind, LogKind, AUTO_ATTACK};
pub use result::{CombatOutcome, CombatResult, CombatRewards, PotionUsage, KILLED_IN_COMBAT};
pub use rewards::{level_difference_factor, roll_rewards};
pub use simulator::{simulate_combat, simulate_combat_with_rng, simulate_combat_with_strategy};

pub(crate) use simulator::simulate_combat_unlogged;
