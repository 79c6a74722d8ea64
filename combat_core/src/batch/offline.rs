//! Offline progress - Converts time away into whole combat cycles

use super::progression::apply_experience;
use super::{simulate_batch_combat, BatchCombatInput};
use crate::combat::CombatSimulationInput;
use crate::config::{ActivityRegistry, ConfigError, GameConstants};
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Character state needed to catch up on offline time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineCharacter {
    pub level: u32,
    /// Experience into the current level
    #[serde(default)]
    pub experience: u64,
    /// Activity the character was left doing, if any
    #[serde(default)]
    pub activity_performed: Option<String>,
    /// Fight repeated by the activity; required whenever an activity is set
    #[serde(default)]
    pub combat_input: Option<CombatSimulationInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfflineProgressResult {
    /// Raw time away in seconds (0 when the clock went backwards)
    pub offline_duration_seconds: f64,
    /// Time actually simulated, after the cap
    pub effective_duration_seconds: f64,
    pub capped_at_18_hours: bool,
    pub cycles_completed: u32,
    pub xp_earned: u64,
    pub gold_earned: u64,
    pub items_found: Vec<String>,
    pub levels_gained: u32,
    pub previous_level: u32,
    pub current_level: u32,
    pub current_experience: u64,
    pub died: bool,
    pub death_reason: Option<String>,
}

impl OfflineProgressResult {
    fn idle(character: &OfflineCharacter, offline: f64, effective: f64, capped: bool) -> Self {
        OfflineProgressResult {
            offline_duration_seconds: offline,
            effective_duration_seconds: effective,
            capped_at_18_hours: capped,
            previous_level: character.level,
            current_level: character.level,
            current_experience: character.experience,
            ..OfflineProgressResult::default()
        }
    }
}

/// Seconds between two instants, clamped to zero
fn elapsed_seconds(last_online_at: DateTime<Utc>, returned_at: DateTime<Utc>) -> f64 {
    let millis = returned_at
        .signed_duration_since(last_online_at)
        .num_milliseconds();
    (millis as f64 / 1000.0).max(0.0)
}

/// Simulate what a character earned between `last_online_at` and `returned_at`
///
/// Time away is capped at `constants.offline.max_offline_seconds` and
/// divided into whole cycles of the character's activity. Each cycle is a
/// full fight; a death ends the catch-up and forfeits the remaining time.
/// Earned experience is applied to the level curve at the end.
///
/// The character's level must match the level in its combat input.
pub fn calculate_offline_progress(
    character: &OfflineCharacter,
    activities: &ActivityRegistry,
    constants: &GameConstants,
    last_online_at: DateTime<Utc>,
    returned_at: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<OfflineProgressResult, ConfigError> {
    let offline = elapsed_seconds(last_online_at, returned_at);
    let cap = constants.offline.max_offline_seconds.max(0.0);
    let effective = offline.min(cap);
    let capped = offline > cap;

    let Some(activity_id) = character.activity_performed.as_deref() else {
        tracing::debug!(offline, "no activity set; nothing to catch up");
        return Ok(OfflineProgressResult::idle(character, offline, effective, capped));
    };
    let activity = activities.get(activity_id)?;
    let combat_input = character
        .combat_input
        .as_ref()
        .ok_or_else(|| ConfigError::MissingCombatInput(activity_id.to_string()))?;
    if combat_input.combatant.level != character.level {
        return Err(ConfigError::ValidationError(format!(
            "character is level {} but its combat input is level {}",
            character.level, combat_input.combatant.level
        )));
    }

    let cycles = (effective / activity.cycle_duration_seconds).floor();
    if cycles < 1.0 {
        tracing::debug!(
            activity = %activity.id,
            effective,
            cycle = activity.cycle_duration_seconds,
            "offline time shorter than one cycle"
        );
        return Ok(OfflineProgressResult::idle(character, offline, effective, capped));
    }
    let cycle_count = cycles.min(u32::MAX as f64) as u32;

    let batch_input = BatchCombatInput {
        combat_input: combat_input.clone(),
        cycle_count,
    };
    let batch = simulate_batch_combat(&batch_input, constants, rng);
    let progress = apply_experience(
        character.level,
        character.experience,
        batch.total_xp,
        &constants.progression,
    );

    tracing::info!(
        activity = %activity.id,
        offline,
        effective,
        capped,
        cycles = batch.cycles_completed,
        xp = batch.total_xp,
        levels_gained = progress.levels_gained,
        died = batch.died(),
        "offline progress calculated"
    );

    Ok(OfflineProgressResult {
        offline_duration_seconds: offline,
        effective_duration_seconds: effective,
        capped_at_18_hours: capped,
        cycles_completed: batch.cycles_completed,
        xp_earned: batch.total_xp,
        gold_earned: batch.total_gold,
        levels_gained: progress.levels_gained,
        previous_level: progress.previous_level,
        current_level: progress.current_level,
        current_experience: progress.current_experience,
        died: batch.died(),
        death_reason: batch.death_reason,
        items_found: batch.items_found,
    })
}

/// [`calculate_offline_progress`] with a `ChaCha8Rng` seeded from `seed`
pub fn calculate_offline_progress_seeded(
    character: &OfflineCharacter,
    activities: &ActivityRegistry,
    constants: &GameConstants,
    last_online_at: DateTime<Utc>,
    returned_at: DateTime<Utc>,
    seed: u64,
) -> Result<OfflineProgressResult, ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    calculate_offline_progress(character, activities, constants, last_online_at, returned_at, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatSettings, CombatantSnapshot, Consumables};
    use crate::config::{parse_activity_configs, ActivityDefinition};
    use crate::enemy::{EnemyDefinition, RewardTable};
    use crate::stats::CombatStats;
    use crate::types::{Difficulty, EnemyTier, ResourceType};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn activities() -> ActivityRegistry {
        let mut registry = ActivityRegistry::new();
        registry.register(ActivityDefinition {
            id: "patrol".to_string(),
            name: "Patrol".to_string(),
            cycle_duration_seconds: 60.0,
        });
        registry
    }

    fn fight(enemy_health: f64, enemy_damage: f64) -> CombatSimulationInput {
        CombatSimulationInput {
            combatant: CombatantSnapshot {
                class_id: "warrior".to_string(),
                level: 10,
                stats: CombatStats {
                    max_health: 400.0,
                    resource_type: ResourceType::Rage,
                    max_resource: 100.0,
                    resource_regen: 0.0,
                    attack_power: 50.0,
                    spell_power: 0.0,
                    melee_crit_chance: 5.0,
                    spell_crit_chance: 0.0,
                    dodge_chance: 5.0,
                    armor: 100.0,
                    weapon_damage_min: 10.0,
                    weapon_damage_max: 14.0,
                    weapon_speed: 2.0,
                },
            },
            abilities: vec![],
            enemy: EnemyDefinition {
                id: "rat".to_string(),
                name: "Sewer Rat".to_string(),
                level: 8,
                tier: EnemyTier::Normal,
                health: enemy_health,
                base_damage: enemy_damage,
                attack_speed: 2.0,
                armor: 0.0,
                resistance: 0.0,
                abilities: vec![],
                rewards: RewardTable {
                    experience: 500,
                    gold_min: 1,
                    gold_max: 4,
                    drops: vec![],
                },
            },
            max_duration_seconds: 60.0,
            difficulty: Difficulty::Normal,
            settings: CombatSettings::default(),
            consumables: Consumables::default(),
            seed: None,
        }
    }

    fn character(activity: Option<&str>, combat_input: Option<CombatSimulationInput>) -> OfflineCharacter {
        OfflineCharacter {
            level: 10,
            experience: 10,
            activity_performed: activity.map(str::to_string),
            combat_input,
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test]
    fn test_no_activity_is_zero_progress() {
        let result = calculate_offline_progress_seeded(
            &character(None, None),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(3_600),
            1,
        )
        .unwrap();
        assert_eq!(result.cycles_completed, 0);
        assert_eq!(result.xp_earned, 0);
        assert_eq!(result.current_level, 10);
        assert_eq!(result.current_experience, 10);
        assert!((result.offline_duration_seconds - 3_600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_less_than_one_cycle() {
        let result = calculate_offline_progress_seeded(
            &character(Some("patrol"), Some(fight(60.0, 2.0))),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(59),
            1,
        )
        .unwrap();
        assert_eq!(result.cycles_completed, 0);
        assert!(!result.died);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let result = calculate_offline_progress_seeded(
            &character(Some("patrol"), Some(fight(60.0, 2.0))),
            &activities(),
            &GameConstants::default(),
            at(500),
            at(0),
            1,
        )
        .unwrap();
        assert!((result.offline_duration_seconds - 0.0).abs() < f64::EPSILON);
        assert!(!result.capped_at_18_hours);
        assert_eq!(result.cycles_completed, 0);
    }

    #[test]
    fn test_unknown_activity() {
        let err = calculate_offline_progress_seeded(
            &character(Some("fishing"), Some(fight(60.0, 2.0))),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(600),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownActivity(id) if id == "fishing"));
    }

    #[test]
    fn test_activity_without_combat_input() {
        let err = calculate_offline_progress_seeded(
            &character(Some("patrol"), None),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(600),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCombatInput(_)));
    }

    #[test]
    fn test_cycles_earn_experience_and_levels() {
        let result = calculate_offline_progress_seeded(
            &character(Some("patrol"), Some(fight(60.0, 2.0))),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(600),
            11,
        )
        .unwrap();
        assert_eq!(result.cycles_completed, 10);
        // Ten kills at 350 experience clear the 3162 needed at level 10
        assert!(result.xp_earned >= 3_162);
        assert!(result.gold_earned > 0);
        assert_eq!(result.previous_level, 10);
        assert!(result.levels_gained >= 1);
        assert_eq!(result.current_level, result.previous_level + result.levels_gained);
        assert!(!result.died);
    }

    #[test]
    fn test_level_mismatch_is_rejected() {
        let mut character = character(Some("patrol"), Some(fight(60.0, 2.0)));
        character.level = 4;
        let err = calculate_offline_progress_seeded(
            &character,
            &activities(),
            &GameConstants::default(),
            at(0),
            at(600),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_cap_at_eighteen_hours() {
        let result = calculate_offline_progress_seeded(
            &character(Some("patrol"), Some(fight(60.0, 2.0))),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(48 * 3_600),
            5,
        )
        .unwrap();
        assert!(result.capped_at_18_hours);
        assert!((result.effective_duration_seconds - 64_800.0).abs() < f64::EPSILON);
        assert_eq!(result.cycles_completed, 1_080);
    }

    #[test]
    fn test_death_forfeits_remaining_time() {
        let result = calculate_offline_progress_seeded(
            &character(Some("patrol"), Some(fight(100_000.0, 300.0))),
            &activities(),
            &GameConstants::default(),
            at(0),
            at(3_600),
            5,
        )
        .unwrap();
        assert!(result.died);
        assert_eq!(result.cycles_completed, 1);
        assert!(result.death_reason.is_some());
        assert_eq!(result.xp_earned, 0);
    }

    #[test]
    fn test_builtin_activities_parse() {
        let registry = parse_activity_configs(include_str!("../../config/activities.toml")).unwrap();
        assert!(registry.get("patrol").is_ok());
    }

    proptest! {
        #[test]
        fn prop_effective_never_exceeds_cap(seconds in 0i64..400_000) {
            let result = calculate_offline_progress_seeded(
                &character(None, None),
                &activities(),
                &GameConstants::default(),
                at(0),
                at(seconds),
                0,
            )
            .unwrap();
            prop_assert!(result.effective_duration_seconds <= 64_800.0);
            prop_assert!(result.effective_duration_seconds <= result.offline_duration_seconds);
            prop_assert_eq!(result.capped_at_18_hours, seconds > 64_800);
        }
    }
}
