//! Level curve and experience application

use crate::config::ProgressionConstants;
use serde::{Deserialize, Serialize};

/// Outcome of feeding experience into the level curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub previous_level: u32,
    pub current_level: u32,
    /// Experience into the current level
    pub current_experience: u64,
    pub levels_gained: u32,
}

/// Experience needed to advance from `level` to `level + 1`
///
/// `round(base_xp * level^exponent)`, never less than 1.
pub fn xp_to_next_level(level: u32, constants: &ProgressionConstants) -> u64 {
    let raw = constants.base_xp * (level.max(1) as f64).powf(constants.exponent);
    if !raw.is_finite() {
        return u64::MAX;
    }
    (raw.round() as u64).max(1)
}

/// Add `xp` to a character at `level` holding `experience` into that level
///
/// Levels stop at `max_level`; experience earned at the cap is kept but
/// never converts into further levels.
pub fn apply_experience(level: u32, experience: u64, xp: u64, constants: &ProgressionConstants) -> LevelProgress {
    let previous_level = level;
    let mut level = level.max(1);
    let mut experience = experience.saturating_add(xp);

    while level < constants.max_level {
        let needed = xp_to_next_level(level, constants);
        if experience < needed {
            break;
        }
        experience -= needed;
        level += 1;
    }

    LevelProgress {
        previous_level,
        current_level: level,
        current_experience: experience,
        levels_gained: level.saturating_sub(previous_level),
    }
}
