//! Reward rolls for a won fight

use super::result::CombatRewards;
use crate::config::{DifficultyModifiers, RewardConstants, TierModifiers};
use crate::enemy::EnemyDefinition;
use rand::Rng;

/// Reward multiplier from the level gap between enemy and character
///
/// Higher-level enemies give `1 + bonus * diff` up to `max_factor`; lower
/// level enemies give `1 - penalty * diff` down to `min_factor`.
pub fn level_difference_factor(player_level: u32, enemy_level: u32, constants: &RewardConstants) -> f64 {
    let diff = enemy_level as f64 - player_level as f64;
    if diff >= 0.0 {
        (1.0 + constants.bonus_per_level_above * diff).min(constants.max_factor)
    } else {
        (1.0 - constants.penalty_per_level_below * diff.abs()).max(constants.min_factor)
    }
}

/// Roll experience, gold and item drops for defeating `enemy`
///
/// Experience and gold are each at least 1.
pub fn roll_rewards(
    enemy: &EnemyDefinition,
    player_level: u32,
    tier: TierModifiers,
    difficulty: DifficultyModifiers,
    constants: &RewardConstants,
    rng: &mut impl Rng,
) -> CombatRewards {
    let factor = level_difference_factor(player_level, enemy.level, constants) * tier.rewards * difficulty.rewards;

    let table = &enemy.rewards;
    let gold_roll = if table.gold_max > table.gold_min {
        rng.gen_range(table.gold_min..=table.gold_max)
    } else {
        table.gold_min
    };

    let experience = ((table.experience as f64 * factor).round() as u64).max(1);
    let gold = ((gold_roll as f64 * factor).round() as u64).max(1);

    let items = table
        .drops
        .iter()
        .filter(|drop| rng.gen::<f64>() < drop.chance)
        .map(|drop| drop.template_id.clone())
        .collect();

    CombatRewards {
        experience,
        gold,
        items,
    }
}
