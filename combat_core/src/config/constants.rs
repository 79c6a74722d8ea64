//! Game constants configuration

use super::ConfigError;
use crate::types::{Difficulty, EnemyTier};
use serde::{Deserialize, Serialize};

/// Tunable game constants
///
/// Every section and field has a default, so a partial TOML file only
/// overrides the values it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    pub stats: StatConstants,
    pub combat: CombatConstants,
    pub armor: ArmorConstants,
    pub potions: PotionConstants,
    pub difficulty: DifficultyTable,
    pub tiers: TierTable,
    pub rewards: RewardConstants,
    pub progression: ProgressionConstants,
    pub offline: OfflineConstants,
}

impl GameConstants {
    /// Constants embedded in the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        let constants: GameConstants = super::parse_toml(include_str!("../../config/constants.toml"))?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values that would stall or invert the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.tick_seconds <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "tick_seconds must be positive, got {}",
                self.combat.tick_seconds
            )));
        }
        if self.stats.unarmed_damage_min > self.stats.unarmed_damage_max
            || self.stats.unarmed_speed <= 0.0
        {
            return Err(ConfigError::ValidationError(format!(
                "invalid unarmed weapon {}-{} at speed {}",
                self.stats.unarmed_damage_min, self.stats.unarmed_damage_max, self.stats.unarmed_speed
            )));
        }
        if !self.difficulty.is_monotonic() {
            return Err(ConfigError::ValidationError(
                "difficulty must take more damage and heal less from safe to heroic".to_string(),
            ));
        }
        if self.progression.max_level == 0 {
            return Err(ConfigError::ValidationError(
                "max_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Limits and fallbacks used by stat aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatConstants {
    /// Maximum crit chance in percent
    pub crit_ceiling: f64,
    /// Maximum dodge chance in percent
    pub dodge_cap: f64,
    /// Fixed pool size for rage and energy
    pub capped_resource_max: f64,
    /// Energy regenerated per second
    pub energy_regen: f64,
    pub unarmed_damage_min: f64,
    pub unarmed_damage_max: f64,
    /// Seconds between unarmed swings
    pub unarmed_speed: f64,
    /// Damage multiplier on a critical strike
    pub crit_multiplier: f64,
}

impl Default for StatConstants {
    fn default() -> Self {
        StatConstants {
            crit_ceiling: 100.0,
            dodge_cap: 50.0,
            capped_resource_max: 100.0,
            energy_regen: 10.0,
            unarmed_damage_min: 1.0,
            unarmed_damage_max: 3.0,
            unarmed_speed: 2.0,
            crit_multiplier: 2.0,
        }
    }
}

/// Attack table and fight pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConstants {
    /// Seconds per simulation step
    pub tick_seconds: f64,
    /// Miss chance in percent against an enemy of equal level
    pub base_miss_chance: f64,
    /// Extra miss chance per level the defender is above the attacker
    pub miss_per_level: f64,
    pub min_miss_chance: f64,
    pub max_miss_chance: f64,
    /// Dodge chance in percent of every enemy against physical attacks
    pub enemy_dodge_chance: f64,
    pub enemy_crit_chance: f64,
    pub enemy_crit_multiplier: f64,
    /// Damage rolls vary by +/- this fraction
    pub damage_variance: f64,
    pub rage_per_hit_dealt: f64,
    pub rage_per_hit_taken: f64,
    /// Health fraction recorded as a near-death highlight
    pub near_death_threshold: f64,
    /// Maximum spell resistance in percent
    pub max_resistance: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            tick_seconds: 1.0,
            base_miss_chance: 5.0,
            miss_per_level: 1.0,
            min_miss_chance: 1.0,
            max_miss_chance: 60.0,
            enemy_dodge_chance: 5.0,
            enemy_crit_chance: 5.0,
            enemy_crit_multiplier: 1.5,
            damage_variance: 0.1,
            rage_per_hit_dealt: 8.0,
            rage_per_hit_taken: 5.0,
            near_death_threshold: 0.2,
            max_resistance: 75.0,
        }
    }
}

/// Armor formula: reduction = armor / (armor + base + per_level * attacker_level)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorConstants {
    pub base_constant: f64,
    pub per_attacker_level: f64,
    /// Maximum damage reduction as a fraction
    pub max_reduction: f64,
}

impl Default for ArmorConstants {
    fn default() -> Self {
        ArmorConstants {
            base_constant: 400.0,
            per_attacker_level: 85.0,
            max_reduction: 0.75,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PotionConstants {
    /// Fraction of max health restored by a health potion
    pub health_restore: f64,
    /// Fraction of max resource restored by a resource potion
    pub resource_restore: f64,
    /// Shared cooldown between any two potions, in seconds
    pub cooldown: f64,
}

impl Default for PotionConstants {
    fn default() -> Self {
        PotionConstants {
            health_restore: 0.35,
            resource_restore: 0.4,
            cooldown: 10.0,
        }
    }
}

/// Multipliers for one difficulty setting
///
/// Difficulty scales what lands on the player, never the player's own
/// damage, so the fight's length does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifiers {
    /// Applied to every blow that lands on the player
    pub damage_taken: f64,
    /// Applied to player heals and health potions
    pub healing_received: f64,
    pub rewards: f64,
}

impl DifficultyModifiers {
    pub const NEUTRAL: DifficultyModifiers = DifficultyModifiers {
        damage_taken: 1.0,
        healing_received: 1.0,
        rewards: 1.0,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub safe: DifficultyModifiers,
    pub normal: DifficultyModifiers,
    pub heroic: DifficultyModifiers,
}

impl DifficultyTable {
    /// Easier settings must take no more damage and receive no less healing
    pub fn is_monotonic(&self) -> bool {
        let order = [self.safe, self.normal, self.heroic];
        order.windows(2).all(|pair| {
            let (easier, harder) = (pair[0], pair[1]);
            easier.damage_taken >= 0.0
                && easier.damage_taken <= harder.damage_taken
                && harder.healing_received >= 0.0
                && easier.healing_received >= harder.healing_received
        })
    }

    pub fn get(&self, difficulty: Difficulty) -> DifficultyModifiers {
        match difficulty {
            Difficulty::Safe => self.safe,
            Difficulty::Normal => self.normal,
            Difficulty::Heroic => self.heroic,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        DifficultyTable {
            safe: DifficultyModifiers {
                damage_taken: 0.75,
                healing_received: 1.25,
                rewards: 0.8,
            },
            normal: DifficultyModifiers::NEUTRAL,
            heroic: DifficultyModifiers {
                damage_taken: 1.25,
                healing_received: 0.75,
                rewards: 1.5,
            },
        }
    }
}

/// Multipliers for one enemy tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierModifiers {
    pub health: f64,
    pub damage: f64,
    pub ability_frequency: f64,
    pub rewards: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub normal: TierModifiers,
    pub elite: TierModifiers,
    pub boss: TierModifiers,
}

impl TierTable {
    pub fn get(&self, tier: EnemyTier) -> TierModifiers {
        match tier {
            EnemyTier::Normal => self.normal,
            EnemyTier::Elite => self.elite,
            EnemyTier::Boss => self.boss,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        TierTable {
            normal: TierModifiers {
                health: 1.0,
                damage: 1.0,
                ability_frequency: 1.0,
                rewards: 1.0,
            },
            elite: TierModifiers {
                health: 2.5,
                damage: 1.5,
                ability_frequency: 1.25,
                rewards: 2.5,
            },
            boss: TierModifiers {
                health: 6.0,
                damage: 2.0,
                ability_frequency: 1.5,
                rewards: 5.0,
            },
        }
    }
}

/// Level-difference reward scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConstants {
    /// Bonus per level the enemy is above the character
    pub bonus_per_level_above: f64,
    pub max_factor: f64,
    /// Penalty per level the enemy is below the character
    pub penalty_per_level_below: f64,
    pub min_factor: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            bonus_per_level_above: 0.10,
            max_factor: 1.5,
            penalty_per_level_below: 0.15,
            min_factor: 0.1,
        }
    }
}

/// XP curve: `xp_to_next(level) = round(base_xp * level^exponent)`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConstants {
    pub base_xp: f64,
    pub exponent: f64,
    pub max_level: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            base_xp: 100.0,
            exponent: 1.5,
            max_level: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConstants {
    /// Catch-up window cap in seconds (18 hours)
    pub max_offline_seconds: f64,
}

impl Default for OfflineConstants {
    fn default() -> Self {
        OfflineConstants {
            max_offline_seconds: 64_800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.stats.crit_ceiling - 100.0).abs() < f64::EPSILON);
        assert!((constants.offline.max_offline_seconds - 64_800.0).abs() < f64::EPSILON);
        assert!((constants.combat.tick_seconds - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builtin_matches_defaults() {
        let builtin = GameConstants::builtin().unwrap();
        let defaults = GameConstants::default();
        assert_eq!(builtin.difficulty.get(Difficulty::Heroic), defaults.difficulty.heroic);
        assert_eq!(builtin.tiers.get(EnemyTier::Elite), defaults.tiers.elite);
        assert_eq!(builtin.progression.max_level, defaults.progression.max_level);
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
[combat]
tick_seconds = 0.5

[offline]
max_offline_seconds = 3600
"#;
        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.combat.tick_seconds - 0.5).abs() < f64::EPSILON);
        assert!((constants.offline.max_offline_seconds - 3600.0).abs() < f64::EPSILON);
        // Unnamed fields keep their defaults
        assert!((constants.combat.base_miss_chance - 5.0).abs() < f64::EPSILON);
        assert!((constants.armor.base_constant - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let mut constants = GameConstants::default();
        constants.combat.tick_seconds = 0.0;
        assert!(constants.validate().is_err());
        assert!(GameConstants::default().validate().is_ok());
    }

    #[test]
    fn test_difficulty_is_monotonic() {
        let table = DifficultyTable::default();
        assert!(table.is_monotonic());
        assert!(table.safe.damage_taken < table.normal.damage_taken);
        assert!(table.normal.damage_taken < table.heroic.damage_taken);
        assert!(table.safe.healing_received > table.heroic.healing_received);
    }

    #[test]
    fn test_validate_rejects_inverted_difficulty() {
        let mut constants = GameConstants::default();
        constants.difficulty.heroic.healing_received = 2.0;
        assert!(matches!(constants.validate(), Err(ConfigError::ValidationError(_))));

        let mut constants = GameConstants::default();
        constants.difficulty.safe.damage_taken = 1.5;
        assert!(constants.validate().is_err());
    }
}
