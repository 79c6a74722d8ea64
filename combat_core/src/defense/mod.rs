//! Defense system - Armor, resistance and the attack table

mod armor;
mod avoidance;
mod resistance;

pub use armor::{apply_armor, armor_reduction};
pub use avoidance::{miss_chance, AttackOutcome, AttackTable};
pub use resistance::{apply_resistance, resistance_mitigation};
