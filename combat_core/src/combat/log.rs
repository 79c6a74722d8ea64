//! Combat log - Ordered, timestamped record of a fight

use crate::types::CombatSide;
use serde::{Deserialize, Serialize};

/// Ability name used for weapon swings and enemy melee hits
pub const AUTO_ATTACK: &str = "auto_attack";

/// What a log entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Damage,
    Heal,
    Miss,
    Dodge,
    Crit,
    Buff,
    Resource,
}

/// One resolved action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Seconds since the fight started
    pub timestamp: f64,
    pub source: CombatSide,
    /// Ability id, `auto_attack`, or consumable id
    pub ability: String,
    pub kind: LogKind,
    pub damage: f64,
    pub healing: f64,
}

/// Notable moments worth surfacing to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    CriticalHit,
    KillingBlow,
    NearDeath,
    PotionUsed,
    Fled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub timestamp: f64,
    pub kind: HighlightKind,
    pub description: String,
}

/// Append-only log plus highlights
///
/// When disabled only highlights are kept; batch runs use this to avoid
/// building thousands of entries nobody reads.
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
    highlights: Vec<Highlight>,
    record_entries: bool,
}

impl CombatLog {
    pub fn new(record_entries: bool) -> Self {
        CombatLog {
            entries: Vec::new(),
            highlights: Vec::new(),
            record_entries,
        }
    }

    pub fn push(&mut self, entry: CombatLogEntry) {
        if self.record_entries {
            self.entries.push(entry);
        }
    }

    pub fn highlight(&mut self, timestamp: f64, kind: HighlightKind, description: String) {
        self.highlights.push(Highlight {
            timestamp,
            kind,
            description,
        });
    }

    pub fn has_highlight(&self, kind: HighlightKind) -> bool {
        self.highlights.iter().any(|h| h.kind == kind)
    }

    pub fn into_parts(self) -> (Vec<CombatLogEntry>, Vec<Highlight>) {
        (self.entries, self.highlights)
    }
}
