//! Activity configuration loading

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// An idle activity a character can perform while offline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: String,
    pub name: String,
    /// Real-time seconds one combat cycle of this activity takes
    pub cycle_duration_seconds: f64,
}

/// Activity lookup table
#[derive(Debug, Clone, Default)]
pub struct ActivityRegistry {
    activities: HashMap<String, ActivityDefinition>,
}

impl ActivityRegistry {
    pub fn new() -> Self {
        ActivityRegistry {
            activities: HashMap::new(),
        }
    }

    pub fn register(&mut self, activity: ActivityDefinition) {
        self.activities.insert(activity.id.clone(), activity);
    }

    /// Get an activity by id, rejecting unknown ids
    pub fn get(&self, id: &str) -> Result<&ActivityDefinition, ConfigError> {
        self.activities
            .get(id)
            .ok_or_else(|| ConfigError::UnknownActivity(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActivitiesConfig {
    activities: Vec<ActivityDefinition>,
}

fn build_registry(config: ActivitiesConfig) -> Result<ActivityRegistry, ConfigError> {
    let mut registry = ActivityRegistry::new();
    for activity in config.activities {
        if activity.cycle_duration_seconds <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "activity '{}' has non-positive cycle_duration_seconds {}",
                activity.id, activity.cycle_duration_seconds
            )));
        }
        registry.register(activity);
    }
    Ok(registry)
}

/// Load activity configurations from a TOML file
pub fn load_activity_configs(path: &Path) -> Result<ActivityRegistry, ConfigError> {
    build_registry(super::load_toml(path)?)
}

/// Load activity configurations from a TOML string
pub fn parse_activity_configs(content: &str) -> Result<ActivityRegistry, ConfigError> {
    build_registry(super::parse_toml(content)?)
}

/// Get default activity configurations
pub fn default_activities() -> Result<ActivityRegistry, ConfigError> {
    parse_activity_configs(include_str!("../../config/activities.toml"))
}
