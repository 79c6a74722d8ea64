//! Abilities - Read-only ability definitions and their in-fight cooldown state

mod rotation;

pub use rotation::{PriorityRotation, RotationContext, RotationStrategy};

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How an ability's damage is mitigated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSchool {
    /// Scales with attack power, reduced by armor, can be dodged
    #[default]
    Physical,
    /// Scales with spell power, reduced by resistance, cannot be dodged
    Spell,
}

/// What an ability does when it resolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbilityEffect {
    /// Deal `min..=max` damage scaled by the caster's power
    Damage {
        min: f64,
        max: f64,
        /// Percent of a power point added per point of power (1.0 = +1% per 1 power)
        #[serde(default = "default_coefficient")]
        coefficient: f64,
        #[serde(default)]
        school: DamageSchool,
    },
    /// Restore `min..=max` health to the caster, scaled by spell power
    Heal {
        min: f64,
        max: f64,
        #[serde(default = "default_coefficient")]
        coefficient: f64,
    },
}

fn default_coefficient() -> f64 {
    1.0
}

/// When an ability is allowed to fire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbilityTrigger {
    /// Fire whenever the cooldown is ready
    #[default]
    OnCooldownReady,
    /// Fire every `interval` seconds of combat time (first at `interval`)
    Timer { interval: f64 },
    /// Fire only while the caster's resource fraction is at least `min_fraction`
    ResourceThreshold { min_fraction: f64 },
    /// Fire only while the caster's health fraction is below `fraction`
    HealthBelow { fraction: f64 },
}

/// A player or enemy ability, owned by content configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    /// Resource spent on use (ignored for enemies)
    #[serde(default)]
    pub resource_cost: f64,
    /// Cooldown in seconds after use
    #[serde(default)]
    pub cooldown: f64,
    pub effect: AbilityEffect,
    #[serde(default)]
    pub trigger: AbilityTrigger,
    /// Long cooldowns only used when the player enables cooldown usage
    #[serde(default)]
    pub major_cooldown: bool,
}

/// Runtime cooldown/timer bookkeeping for one ability during a fight
#[derive(Debug, Clone)]
pub struct AbilityState {
    pub definition: AbilityDefinition,
    /// Seconds until the ability can be used again
    pub cooldown_remaining: f64,
    /// Combat time at which a timer trigger next fires
    pub next_timer_at: f64,
    /// Multiplier applied to the cooldown on use (enemy tiers act faster)
    cooldown_scale: f64,
}

impl AbilityState {
    /// Create fresh state for a definition
    pub fn new(definition: AbilityDefinition) -> Self {
        Self::with_frequency(definition, 1.0)
    }

    /// Create state whose cooldowns and timers run `frequency` times as fast
    pub fn with_frequency(definition: AbilityDefinition, frequency: f64) -> Self {
        let cooldown_scale = if frequency > 0.0 { 1.0 / frequency } else { 1.0 };
        let next_timer_at = match definition.trigger {
            AbilityTrigger::Timer { interval } => interval.max(0.0) * cooldown_scale,
            _ => 0.0,
        };
        AbilityState {
            definition,
            cooldown_remaining: 0.0,
            next_timer_at,
            cooldown_scale,
        }
    }

    /// Advance the cooldown by `delta` seconds
    pub fn tick(&mut self, delta: f64) {
        self.cooldown_remaining = (self.cooldown_remaining - delta).max(0.0);
    }

    /// Whether the trigger condition and cooldown allow use right now
    pub fn is_ready(&self, elapsed: f64, resource_fraction: f64, health_fraction: f64) -> bool {
        if self.cooldown_remaining > 0.0 {
            return false;
        }
        match self.definition.trigger {
            AbilityTrigger::OnCooldownReady => true,
            AbilityTrigger::Timer { .. } => elapsed + f64::EPSILON >= self.next_timer_at,
            AbilityTrigger::ResourceThreshold { min_fraction } => resource_fraction >= min_fraction,
            AbilityTrigger::HealthBelow { fraction } => health_fraction < fraction,
        }
    }

    /// Record a use at `elapsed`, starting the cooldown and rescheduling timers
    pub fn mark_used(&mut self, elapsed: f64) {
        self.cooldown_remaining = self.definition.cooldown.max(0.0) * self.cooldown_scale;
        if let AbilityTrigger::Timer { interval } = self.definition.trigger {
            let step = (interval * self.cooldown_scale).max(f64::EPSILON);
            while self.next_timer_at <= elapsed + f64::EPSILON {
                self.next_timer_at += step;
            }
        }
    }
}

/// Ability lookup table
#[derive(Debug, Clone, Default)]
pub struct AbilityRegistry {
    abilities: HashMap<String, AbilityDefinition>,
}

impl AbilityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        AbilityRegistry {
            abilities: HashMap::new(),
        }
    }

    /// Register an ability, replacing any previous definition with the same id
    pub fn register(&mut self, ability: AbilityDefinition) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    /// Get an ability definition by id
    pub fn get(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    /// Resolve an ordered id list into definitions, failing on the first unknown id
    pub fn resolve(&self, ids: &[String]) -> Result<Vec<AbilityDefinition>, ConfigError> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownAbility(id.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}
