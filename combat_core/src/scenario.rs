//! Scenario - A named character and encounter resolved against content tables
//!
//! Scenarios are what the CLI reads: everything is referenced by id and
//! resolved here, so unknown ids surface as [`ConfigError`]s instead of
//! silently falling back to defaults.

use crate::combat::{CombatSettings, CombatSimulationInput, CombatantSnapshot, Consumables};
use crate::config::{ConfigError, GameContent};
use crate::source::{BuffEffect, TalentBonuses};
use crate::stats::{calculate_combat_stats, AggregatedStats, CharacterData, EquipmentSet};
use crate::types::{Difficulty, EnemyTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_max_duration() -> f64 {
    120.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub character: CharacterData,
    /// Worn gear; the class's starter gear when absent
    #[serde(default)]
    pub equipment: Option<EquipmentSet>,
    /// Talent id to points spent
    #[serde(default)]
    pub talents: BTreeMap<String, u32>,
    /// Out-of-combat buffs folded into the stat snapshot
    #[serde(default)]
    pub buffs: Vec<BuffEffect>,
    /// Rotation by ability id; the class's ability list when absent
    #[serde(default)]
    pub abilities: Option<Vec<String>>,
    pub enemy: String,
    /// Override the enemy's configured tier
    #[serde(default)]
    pub enemy_tier: Option<EnemyTier>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub settings: CombatSettings,
    #[serde(default)]
    pub consumables: Consumables,
    #[serde(default = "default_max_duration")]
    pub max_duration_seconds: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Scenario {
    /// Gear the character fights in
    pub fn resolve_equipment(&self, content: &GameContent) -> Result<EquipmentSet, ConfigError> {
        match &self.equipment {
            Some(equipment) => Ok(equipment.clone()),
            None => Ok(content.classes.get(&self.character.class_id)?.starter_equipment()),
        }
    }

    /// Aggregate the character's stats from class, gear, talents and buffs
    pub fn aggregate(&self, content: &GameContent) -> Result<AggregatedStats, ConfigError> {
        let class = content.classes.get(&self.character.class_id)?;
        let equipment = self.resolve_equipment(content)?;
        let talents = if self.talents.is_empty() {
            None
        } else {
            Some(TalentBonuses::from_allocation(class, &self.talents)?)
        };
        calculate_combat_stats(
            &self.character,
            &equipment,
            talents.as_ref(),
            &self.buffs,
            &content.classes,
            &content.constants,
        )
    }

    /// Resolve every id and produce a simulator input
    pub fn build_input(&self, content: &GameContent) -> Result<CombatSimulationInput, ConfigError> {
        let class = content.classes.get(&self.character.class_id)?;
        let aggregated = self.aggregate(content)?;
        let ability_ids = self.abilities.as_ref().unwrap_or(&class.abilities);
        let abilities = content.abilities.resolve(ability_ids)?;

        let mut enemy = content.enemies.get(&self.enemy)?.clone();
        if let Some(tier) = self.enemy_tier {
            enemy = enemy.with_tier(tier);
        }

        tracing::debug!(
            class = %class.id,
            enemy = %enemy.id,
            abilities = abilities.len(),
            "scenario resolved"
        );

        Ok(CombatSimulationInput {
            combatant: CombatantSnapshot {
                class_id: class.id.clone(),
                level: self.character.level,
                stats: aggregated.stats,
            },
            abilities,
            enemy,
            max_duration_seconds: self.max_duration_seconds,
            difficulty: self.difficulty,
            settings: self.settings.clone(),
            consumables: self.consumables.clone(),
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(json: &str) -> Scenario {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_scenario_uses_class_defaults() {
        let content = GameContent::builtin().unwrap();
        let s = scenario(
            r#"{
                "character": { "name": "Brom", "class_id": "warrior", "level": 15 },
                "enemy": "forest_bandit"
            }"#,
        );
        let input = s.build_input(&content).unwrap();
        let warrior = content.classes.get("warrior").unwrap();

        assert_eq!(input.abilities.len(), warrior.abilities.len());
        assert_eq!(input.enemy.id, "forest_bandit");
        assert_eq!(input.difficulty, Difficulty::Normal);
        assert!((input.max_duration_seconds - 120.0).abs() < f64::EPSILON);
        // Starter weapon, not bare hands
        assert!(input.combatant.stats.weapon_damage_max > content.constants.stats.unarmed_damage_max);
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let content = GameContent::builtin().unwrap();
        let bad_enemy = scenario(
            r#"{ "character": { "name": "A", "class_id": "mage", "level": 5 }, "enemy": "dragon" }"#,
        );
        assert!(matches!(bad_enemy.build_input(&content), Err(ConfigError::UnknownEnemy(_))));

        let bad_class = scenario(
            r#"{ "character": { "name": "A", "class_id": "bard", "level": 5 }, "enemy": "forest_bandit" }"#,
        );
        assert!(matches!(bad_class.build_input(&content), Err(ConfigError::UnknownClass(_))));

        let bad_ability = scenario(
            r#"{
                "character": { "name": "A", "class_id": "mage", "level": 5 },
                "abilities": ["fireball", "meteor"],
                "enemy": "forest_bandit"
            }"#,
        );
        assert!(matches!(bad_ability.build_input(&content), Err(ConfigError::UnknownAbility(id)) if id == "meteor"));
    }

    #[test]
    fn test_enemy_tier_override() {
        let content = GameContent::builtin().unwrap();
        let s = scenario(
            r#"{
                "character": { "name": "A", "class_id": "rogue", "level": 10 },
                "enemy": "timber_wolf",
                "enemy_tier": "boss"
            }"#,
        );
        let input = s.build_input(&content).unwrap();
        assert_eq!(input.enemy.tier, EnemyTier::Boss);
    }

    #[test]
    fn test_empty_equipment_fights_unarmed() {
        let content = GameContent::builtin().unwrap();
        let s = scenario(
            r#"{
                "character": { "name": "A", "class_id": "warrior", "level": 5 },
                "equipment": {},
                "enemy": "timber_wolf"
            }"#,
        );
        let stats = s.aggregate(&content).unwrap().stats;
        assert!((stats.weapon_speed - content.constants.stats.unarmed_speed).abs() < f64::EPSILON);
    }
}
