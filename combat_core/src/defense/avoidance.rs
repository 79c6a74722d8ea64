//! Attack table - one roll decides miss, dodge, crit or hit
//!
//! The table is laid out in order: miss, dodge, crit, then plain hit for
//! whatever remains. A single roll in `[0, 100)` selects the outcome. When
//! the chances add up past 100 the later entries are pushed off the table.

use crate::config::CombatConstants;

/// Result of an attack table roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Miss,
    Dodge,
    Crit,
    Hit,
}

/// Percent chances for one attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackTable {
    pub miss: f64,
    pub dodge: f64,
    pub crit: f64,
}

impl AttackTable {
    /// Build a table, clamping each chance to [0, 100]
    pub fn new(miss: f64, dodge: f64, crit: f64) -> Self {
        AttackTable {
            miss: miss.clamp(0.0, 100.0),
            dodge: dodge.clamp(0.0, 100.0),
            crit: crit.clamp(0.0, 100.0),
        }
    }

    /// Resolve a roll in [0, 100)
    pub fn resolve(&self, roll: f64) -> AttackOutcome {
        let mut threshold = self.miss;
        if roll < threshold {
            return AttackOutcome::Miss;
        }
        threshold += self.dodge;
        if roll < threshold {
            return AttackOutcome::Dodge;
        }
        threshold += self.crit;
        if roll < threshold {
            return AttackOutcome::Crit;
        }
        AttackOutcome::Hit
    }
}

/// Miss chance for an attacker against a defender, from the level gap
pub fn miss_chance(attacker_level: u32, defender_level: u32, constants: &CombatConstants) -> f64 {
    let gap = defender_level as f64 - attacker_level as f64;
    (constants.base_miss_chance + gap * constants.miss_per_level)
        .clamp(constants.min_miss_chance, constants.max_miss_chance)
}
