//! Ability configuration loading

use super::ConfigError;
use crate::ability::{AbilityDefinition, AbilityRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for ability configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilitiesConfig {
    abilities: Vec<AbilityDefinition>,
}

fn build_registry(config: AbilitiesConfig) -> AbilityRegistry {
    let mut registry = AbilityRegistry::new();
    for ability in config.abilities {
        registry.register(ability);
    }
    registry
}

/// Load ability configurations from a TOML file
pub fn load_ability_configs(path: &Path) -> Result<AbilityRegistry, ConfigError> {
    Ok(build_registry(super::load_toml(path)?))
}

/// Load ability configurations from a TOML string
pub fn parse_ability_configs(content: &str) -> Result<AbilityRegistry, ConfigError> {
    Ok(build_registry(super::parse_toml(content)?))
}

/// Get default ability configurations
pub fn default_abilities() -> Result<AbilityRegistry, ConfigError> {
    parse_ability_configs(include_str!("../../config/abilities.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityTrigger;

    #[test]
    fn test_parse_abilities() {
        let toml = r#"
[[abilities]]
id = "heroic_strike"
name = "Heroic Strike"
resource_cost = 15
cooldown = 0
effect = { type = "damage", min = 12, max = 16 }

[[abilities]]
id = "recklessness"
name = "Recklessness"
cooldown = 120
major_cooldown = true
effect = { type = "damage", min = 40, max = 50 }
trigger = { type = "health_below", fraction = 0.9 }
"#;
        let registry = parse_ability_configs(toml).unwrap();
        assert_eq!(registry.len(), 2);
        let reck = registry.get("recklessness").unwrap();
        assert!(reck.major_cooldown);
        assert_eq!(reck.trigger, AbilityTrigger::HealthBelow { fraction: 0.9 });
        assert_eq!(
            registry.get("heroic_strike").unwrap().trigger,
            AbilityTrigger::OnCooldownReady
        );
    }

    #[test]
    fn test_default_abilities_load() {
        let registry = default_abilities().unwrap();
        assert!(registry.get("heroic_strike").is_some());
        assert!(registry.get("fireball").is_some());
    }
}
