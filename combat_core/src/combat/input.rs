//! Combat input - Everything one fight needs, as plain data

use crate::ability::AbilityDefinition;
use crate::enemy::EnemyDefinition;
use crate::stats::CombatStats;
use crate::types::{Difficulty, StatModifier};
use serde::{Deserialize, Serialize};

/// The player's side of a fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub class_id: String,
    pub level: u32,
    pub stats: CombatStats,
}

/// Player-configured combat behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    /// Drink a health potion below this health fraction
    pub health_potion_threshold: f64,
    /// Drink a resource potion below this resource fraction
    pub resource_potion_threshold: f64,
    /// Allow abilities flagged as major cooldowns
    pub use_cooldowns: bool,
    pub flee_enabled: bool,
    /// Flee below this health fraction when fleeing is enabled
    pub flee_threshold: f64,
}

impl Default for CombatSettings {
    fn default() -> Self {
        CombatSettings {
            health_potion_threshold: 0.3,
            resource_potion_threshold: 0.2,
            use_cooldowns: true,
            flee_enabled: false,
            flee_threshold: 0.15,
        }
    }
}

/// A potion that grants temporary stat modifiers when the fight starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffPotion {
    pub id: String,
    pub name: String,
    pub duration_seconds: f64,
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
}

/// Consumables carried into the fight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumables {
    pub health_potions: u32,
    pub resource_potions: u32,
    pub buff_potions: Vec<BuffPotion>,
}

/// Complete input for a single simulated fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSimulationInput {
    pub combatant: CombatantSnapshot,
    /// Player abilities in priority order
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
    pub enemy: EnemyDefinition,
    pub max_duration_seconds: f64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub settings: CombatSettings,
    #[serde(default)]
    pub consumables: Consumables,
    /// Seed for the convenience entry point; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}
