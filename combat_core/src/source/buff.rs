//! BuffEffect - Temporary buffs and debuffs

use crate::source::StatSource;
use crate::stats::{StatAccumulator, StatLayer};
use crate::types::StatModifier;
use serde::{Deserialize, Serialize};

/// Temporary buff/debuff applied on the buff layer
///
/// Modifier values are per stack. A debuff subtracts its modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffEffect {
    /// Buff identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Duration remaining in seconds
    pub duration_remaining: f64,
    /// Current stack count
    #[serde(default = "default_stacks")]
    pub stacks: u32,
    /// Whether this is a debuff
    #[serde(default)]
    pub is_debuff: bool,
    /// Stat modifiers per stack
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
}

fn default_stacks() -> u32 {
    1
}

impl BuffEffect {
    /// Create a new single-stack buff
    pub fn new(id: &str, name: &str, duration: f64, is_debuff: bool) -> Self {
        BuffEffect {
            id: id.to_string(),
            name: name.to_string(),
            duration_remaining: duration,
            stacks: 1,
            is_debuff,
            modifiers: Vec::new(),
        }
    }

    /// Add a modifier to this buff
    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Set the number of stacks
    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks;
        self
    }

    /// Tick the buff duration
    /// Returns true if the buff is still active
    pub fn tick(&mut self, delta: f64) -> bool {
        self.duration_remaining -= delta;
        self.is_active()
    }

    /// Check if the buff is active
    pub fn is_active(&self) -> bool {
        self.duration_remaining > 0.0 && self.stacks > 0
    }
}

impl StatSource for BuffEffect {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        200 // Buffs apply after talents
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        if !self.is_active() {
            return;
        }

        let stack_mult = self.stacks as f64;

        for modifier in &self.modifiers {
            let value = if self.is_debuff {
                -modifier.value.abs()
            } else {
                modifier.value
            };
            stats.apply_stat_type(StatLayer::Buffs, modifier.stat, modifier.kind, value * stack_mult);
        }
    }
}
