//! CombatResult - Outcome of a simulated fight

use super::log::{CombatLogEntry, Highlight};
use serde::{Deserialize, Serialize};

/// Death reason reported when the player dies in a fight
pub const KILLED_IN_COMBAT: &str = "killed_in_combat";

/// How a fight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
    Timeout,
}

/// Rewards granted on victory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatRewards {
    pub experience: u64,
    pub gold: u64,
    /// Item template ids that dropped
    pub items: Vec<String>,
}

/// Consumables used during a fight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionUsage {
    pub health: u32,
    pub resource: u32,
    pub buff: u32,
}

impl PotionUsage {
    pub fn total(&self) -> u32 {
        self.health + self.resource + self.buff
    }
}

/// Result of a single simulated fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub duration_seconds: f64,
    pub victory: bool,
    pub outcome: CombatOutcome,
    pub total_damage_dealt: f64,
    pub total_damage_taken: f64,
    pub dps: f64,
    /// Remaining player health in [0, 100]
    pub player_health_percent: f64,
    /// Set only on defeat
    pub death_reason: Option<String>,
    /// Present only on victory
    pub rewards: Option<CombatRewards>,
    pub combat_log: Vec<CombatLogEntry>,
    pub highlights: Vec<Highlight>,
    pub potions_used: PotionUsage,
}

impl CombatResult {
    /// Whether the player died
    pub fn died(&self) -> bool {
        self.outcome == CombatOutcome::Defeat
    }

    /// Experience earned (0 unless victorious)
    pub fn experience(&self) -> u64 {
        self.rewards.as_ref().map_or(0, |r| r.experience)
    }

    /// Gold earned (0 unless victorious)
    pub fn gold(&self) -> u64 {
        self.rewards.as_ref().map_or(0, |r| r.gold)
    }
}
