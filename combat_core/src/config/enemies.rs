//! Enemy configuration loading

use super::ConfigError;
use crate::enemy::{EnemyDefinition, EnemyRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for enemy configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnemiesConfig {
    enemies: Vec<EnemyDefinition>,
}

fn build_registry(config: EnemiesConfig) -> Result<EnemyRegistry, ConfigError> {
    let mut registry = EnemyRegistry::new();
    for enemy in config.enemies {
        enemy.validate()?;
        registry.register(enemy);
    }
    Ok(registry)
}

/// Load enemy configurations from a TOML file
pub fn load_enemy_configs(path: &Path) -> Result<EnemyRegistry, ConfigError> {
    build_registry(super::load_toml(path)?)
}

/// Load enemy configurations from a TOML string
pub fn parse_enemy_configs(content: &str) -> Result<EnemyRegistry, ConfigError> {
    build_registry(super::parse_toml(content)?)
}

/// Get default enemy configurations
pub fn default_enemies() -> Result<EnemyRegistry, ConfigError> {
    parse_enemy_configs(include_str!("../../config/enemies.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnemyTier;

    #[test]
    fn test_parse_enemies() {
        let toml = r#"
[[enemies]]
id = "kobold"
name = "Kobold Miner"
level = 6
health = 150
base_damage = 7
attack_speed = 2.0
armor = 60
rewards = { experience = 45, gold_min = 2, gold_max = 5, drops = [{ template_id = "candle", chance = 0.2 }] }

[[enemies.abilities]]
id = "rock_toss"
name = "Rock Toss"
cooldown = 8
effect = { type = "damage", min = 6, max = 9 }
trigger = { type = "timer", interval = 8 }
"#;
        let registry = parse_enemy_configs(toml).unwrap();
        let kobold = registry.get("kobold").unwrap();
        assert_eq!(kobold.tier, EnemyTier::Normal);
        assert_eq!(kobold.abilities.len(), 1);
        assert_eq!(kobold.rewards.drops[0].template_id, "candle");
    }

    #[test]
    fn test_invalid_enemy_rejected() {
        let toml = r#"
[[enemies]]
id = "broken"
name = "Broken"
level = 1
health = 10
base_damage = 1
attack_speed = 0
"#;
        assert!(matches!(
            parse_enemy_configs(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_enemies_have_elite_variant() {
        let registry = default_enemies().unwrap();
        let normal = registry.get("forest_bandit").unwrap();
        let elite = registry.get("forest_bandit_elite").unwrap();
        assert_eq!(normal.tier, EnemyTier::Normal);
        assert_eq!(elite.tier, EnemyTier::Elite);
        assert_eq!(normal.level, elite.level);
    }
}
