//! Enemy definitions and their reward tables

use crate::ability::AbilityDefinition;
use crate::config::ConfigError;
use crate::types::EnemyTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A possible item drop on victory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootDrop {
    /// Item template identifier (resolved to a full item outside the engine)
    pub template_id: String,
    /// Drop chance in [0, 1]
    pub chance: f64,
}

/// Base rewards granted for defeating an enemy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardTable {
    pub experience: u64,
    pub gold_min: u64,
    pub gold_max: u64,
    #[serde(default)]
    pub drops: Vec<LootDrop>,
}

/// Static description of an enemy, owned by content configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub tier: EnemyTier,
    /// Health before tier scaling
    pub health: f64,
    /// Auto-attack damage before tier scaling
    pub base_damage: f64,
    /// Seconds between auto-attacks
    pub attack_speed: f64,
    #[serde(default)]
    pub armor: f64,
    /// Spell resistance in percent
    #[serde(default)]
    pub resistance: f64,
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
    #[serde(default)]
    pub rewards: RewardTable,
}

impl EnemyDefinition {
    /// Return a copy with a different tier (used for "elite" variants of a base enemy)
    pub fn with_tier(mut self, tier: EnemyTier) -> Self {
        self.tier = tier;
        self
    }

    /// Check the definition for values the simulator cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attack_speed <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "enemy '{}' has non-positive attack_speed {}",
                self.id, self.attack_speed
            )));
        }
        if self.rewards.gold_min > self.rewards.gold_max {
            return Err(ConfigError::ValidationError(format!(
                "enemy '{}' has gold_min {} above gold_max {}",
                self.id, self.rewards.gold_min, self.rewards.gold_max
            )));
        }
        if let Some(drop) = self
            .rewards
            .drops
            .iter()
            .find(|d| !(0.0..=1.0).contains(&d.chance))
        {
            return Err(ConfigError::ValidationError(format!(
                "enemy '{}' drop '{}' has chance {} outside [0, 1]",
                self.id, drop.template_id, drop.chance
            )));
        }
        Ok(())
    }
}

/// Enemy lookup table
#[derive(Debug, Clone, Default)]
pub struct EnemyRegistry {
    enemies: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        EnemyRegistry {
            enemies: HashMap::new(),
        }
    }

    pub fn register(&mut self, enemy: EnemyDefinition) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    /// Get an enemy by id, rejecting unknown ids
    pub fn get(&self, id: &str) -> Result<&EnemyDefinition, ConfigError> {
        self.enemies
            .get(id)
            .ok_or_else(|| ConfigError::UnknownEnemy(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.values()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> EnemyDefinition {
        EnemyDefinition {
            id: "wolf".to_string(),
            name: "Wolf".to_string(),
            level: 5,
            tier: EnemyTier::Normal,
            health: 120.0,
            base_damage: 8.0,
            attack_speed: 2.0,
            armor: 50.0,
            resistance: 0.0,
            abilities: vec![],
            rewards: RewardTable {
                experience: 40,
                gold_min: 1,
                gold_max: 4,
                drops: vec![],
            },
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(wolf().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_gold_range() {
        let mut enemy = wolf();
        enemy.rewards.gold_min = 10;
        assert!(matches!(enemy.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_drop_chance() {
        let mut enemy = wolf();
        enemy.rewards.drops.push(LootDrop {
            template_id: "pelt".to_string(),
            chance: 1.5,
        });
        assert!(enemy.validate().is_err());
    }

    #[test]
    fn test_registry_unknown_enemy() {
        let mut registry = EnemyRegistry::new();
        registry.register(wolf());
        assert!(registry.get("wolf").is_ok());
        assert!(matches!(
            registry.get("dragon"),
            Err(ConfigError::UnknownEnemy(id)) if id == "dragon"
        ));
    }

    #[test]
    fn test_with_tier() {
        let elite = wolf().with_tier(EnemyTier::Elite);
        assert_eq!(elite.tier, EnemyTier::Elite);
    }
}
