//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod buff;
mod gear;
mod talents;

pub use base_stats::BaseStatsSource;
pub use buff::BuffEffect;
pub use gear::GearSource;
pub use talents::TalentBonuses;

use crate::stats::StatAccumulator;

/// Trait for anything that contributes stats to a character
pub trait StatSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Base stats: -100
    /// - Gear: 0
    /// - Talents: 100
    /// - Buffs: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
