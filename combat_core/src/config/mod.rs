//! Configuration loading from TOML files
//!
//! Content tables (classes, abilities, enemies, activities) and tunable
//! constants are plain immutable values. Built-in defaults are embedded at
//! compile time; a directory with the same file names can replace them.

mod abilities;
mod activities;
mod classes;
mod constants;
mod enemies;

pub use abilities::{default_abilities, load_ability_configs, parse_ability_configs};
pub use activities::{
    default_activities, load_activity_configs, parse_activity_configs, ActivityDefinition,
    ActivityRegistry,
};
pub use classes::{
    default_classes, load_class_configs, parse_class_configs, ClassDefinition, ClassRegistry,
    PowerSource, ScalingCoefficients, StarterItem, TalentDefinition,
};
pub use constants::{
    ArmorConstants, CombatConstants, DifficultyModifiers, DifficultyTable, GameConstants,
    OfflineConstants, PotionConstants, ProgressionConstants, RewardConstants, StatConstants,
    TierModifiers, TierTable,
};
pub use enemies::{default_enemies, load_enemy_configs, parse_enemy_configs};

use crate::ability::AbilityRegistry;
use crate::enemy::EnemyRegistry;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading and content resolution error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),
    #[error("Unknown enemy: {0}")]
    UnknownEnemy(String),
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),
    #[error("Unknown talent '{talent}' for class '{class}'")]
    UnknownTalent { class: String, talent: String },
    #[error("Activity '{0}' requires a combat input but none was supplied")]
    MissingCombatInput(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Every read-only table the engine consumes
#[derive(Debug, Clone)]
pub struct GameContent {
    pub classes: ClassRegistry,
    pub abilities: AbilityRegistry,
    pub enemies: EnemyRegistry,
    pub activities: ActivityRegistry,
    pub constants: GameConstants,
}

impl GameContent {
    /// Content embedded in the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        let content = GameContent {
            classes: default_classes()?,
            abilities: default_abilities()?,
            enemies: default_enemies()?,
            activities: default_activities()?,
            constants: GameConstants::builtin()?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Load content from a directory containing `classes.toml`, `abilities.toml`,
    /// `enemies.toml`, `activities.toml` and optionally `constants.toml`
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        tracing::debug!("Loading game content from {}", dir.display());

        let constants_path = dir.join("constants.toml");
        let constants = if constants_path.exists() {
            load_toml(&constants_path)?
        } else {
            GameConstants::default()
        };

        let content = GameContent {
            classes: load_class_configs(&dir.join("classes.toml"))?,
            abilities: load_ability_configs(&dir.join("abilities.toml"))?,
            enemies: load_enemy_configs(&dir.join("enemies.toml"))?,
            activities: load_activity_configs(&dir.join("activities.toml"))?,
            constants,
        };
        content.validate()?;
        Ok(content)
    }

    /// Check cross-table references
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()?;
        for class in self.classes.iter() {
            // Surfaces UnknownAbility for any dangling reference
            self.abilities.resolve(&class.abilities)?;
        }
        for enemy in self.enemies.iter() {
            enemy.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content_is_consistent() {
        let content = GameContent::builtin().unwrap();
        assert!(!content.classes.is_empty());
        assert!(!content.abilities.is_empty());
        assert!(!content.enemies.is_empty());
        assert!(!content.activities.is_empty());
    }

    #[test]
    fn test_dangling_ability_reference_rejected() {
        let mut content = GameContent::builtin().unwrap();
        content.abilities = AbilityRegistry::new();
        assert!(matches!(
            content.validate(),
            Err(ConfigError::UnknownAbility(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let result = GameContent::load_from_dir(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
