//! Analytic estimates derived from combat stats

use super::{CombatStats, EquipmentSet};
use crate::config::{ArmorConstants, ClassDefinition, PowerSource};
use crate::defense::armor_reduction;

/// Crit damage bonus assumed by the estimate (a crit deals double damage)
const ESTIMATED_CRIT_BONUS: f64 = 1.0;

/// Health a character of a level is expected to have with average gear
fn reference_health(level: u32) -> f64 {
    100.0 + 25.0 * level.max(1) as f64
}

/// Approximate sustained damage per second from weapon swings
///
/// Uses the class's primary power and matching crit chance. This ignores
/// abilities, misses and enemy mitigation.
pub fn estimate_dps(stats: &CombatStats, class: &ClassDefinition) -> f64 {
    let (power, crit) = match class.primary_power {
        PowerSource::Attack => (stats.attack_power, stats.melee_crit_chance),
        PowerSource::Spell => (stats.spell_power, stats.spell_crit_chance),
    };
    let average_hit = (stats.weapon_damage_min + stats.weapon_damage_max) / 2.0;
    let scaled = average_hit * (1.0 + power / 100.0);
    let crit_factor = 1.0 + (crit / 100.0) * ESTIMATED_CRIT_BONUS;
    if stats.weapon_speed <= 0.0 {
        return 0.0;
    }
    scaled * crit_factor / stats.weapon_speed
}

/// Survivability score in [0, 100]
///
/// Effective health (health after armor and dodge) relative to what a
/// character of `level` is expected to have; 50 means on par. Armor uses the
/// same curve as the simulator, against an attacker of the same level.
pub fn estimate_survivability(stats: &CombatStats, level: u32, armor: &ArmorConstants) -> f64 {
    let reduction = armor_reduction(stats.armor, level, armor);
    let avoid = (stats.dodge_chance / 100.0).clamp(0.0, 0.95);
    let effective_health = stats.max_health / (1.0 - reduction) / (1.0 - avoid);
    (effective_health / reference_health(level) * 50.0).clamp(0.0, 100.0)
}

/// Mean item level of everything equipped; 0 when nothing is equipped
pub fn calculate_average_item_level(equipment: &EquipmentSet) -> f64 {
    if equipment.is_empty() {
        return 0.0;
    }
    let total: f64 = equipment
        .iter()
        .map(|(_, item)| item.item_level as f64)
        .sum();
    total / equipment.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EquippedItem;
    use crate::types::{EquipmentSlot, ResourceType};
    use proptest::prelude::*;

    fn stats() -> CombatStats {
        CombatStats {
            max_health: 400.0,
            resource_type: ResourceType::Rage,
            max_resource: 100.0,
            resource_regen: 0.0,
            attack_power: 50.0,
            spell_power: 0.0,
            melee_crit_chance: 10.0,
            spell_crit_chance: 0.0,
            dodge_chance: 5.0,
            armor: 200.0,
            weapon_damage_min: 10.0,
            weapon_damage_max: 20.0,
            weapon_speed: 2.0,
        }
    }

    fn item(level: u32) -> EquippedItem {
        EquippedItem {
            template_id: format!("item_{level}"),
            name: "Item".to_string(),
            item_level: level,
            modifiers: vec![],
            weapon: None,
        }
    }

    #[test]
    fn test_average_item_level_empty() {
        assert!((calculate_average_item_level(&EquipmentSet::new()) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_item_level_mean() {
        let mut equipment = EquipmentSet::new();
        equipment.equip(EquipmentSlot::Head, item(10));
        equipment.equip(EquipmentSlot::Chest, item(20));
        assert!((calculate_average_item_level(&equipment) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_survivability_bounds() {
        let mut tank = stats();
        tank.max_health = 1_000_000.0;
        assert!((estimate_survivability(&tank, 10, &ArmorConstants::default()) - 100.0).abs() < f64::EPSILON);

        let mut paper = stats();
        paper.max_health = 1.0;
        paper.armor = 0.0;
        paper.dodge_chance = 0.0;
        let score = estimate_survivability(&paper, 60, &ArmorConstants::default());
        assert!((0.0..5.0).contains(&score));
    }

    #[test]
    fn test_more_armor_more_survivable() {
        let low = stats();
        let mut high = stats();
        high.armor = 2000.0;
        let armor = ArmorConstants::default();
        assert!(estimate_survivability(&high, 10, &armor) > estimate_survivability(&low, 10, &armor));
    }

    #[test]
    fn test_survivability_follows_armor_constants() {
        let mut s = stats();
        s.max_health = 150.0;
        s.armor = 1_000.0;
        let defaults = ArmorConstants::default();
        let softer = ArmorConstants {
            base_constant: 4_000.0,
            ..ArmorConstants::default()
        };
        let capped = ArmorConstants {
            max_reduction: 0.0,
            ..ArmorConstants::default()
        };
        let baseline = estimate_survivability(&s, 10, &defaults);
        assert!(estimate_survivability(&s, 10, &softer) < baseline);

        let mut bare = s.clone();
        bare.armor = 0.0;
        let no_armor = estimate_survivability(&bare, 10, &defaults);
        assert!((estimate_survivability(&s, 10, &capped) - no_armor).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_average_within_min_max(levels in prop::collection::vec(1u32..80, 1..10)) {
            let mut equipment = EquipmentSet::new();
            for (slot, level) in EquipmentSlot::all().iter().zip(levels.iter()) {
                equipment.equip(*slot, item(*level));
            }
            let used: Vec<u32> = levels.iter().take(equipment.len()).copied().collect();
            let min = *used.iter().min().unwrap() as f64;
            let max = *used.iter().max().unwrap() as f64;
            let avg = calculate_average_item_level(&equipment);
            prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9);
        }

        #[test]
        fn prop_survivability_clamped(health in 1.0f64..100_000.0, armor in 0.0f64..10_000.0, level in 1u32..60) {
            let mut s = stats();
            s.max_health = health;
            s.armor = armor;
            let score = estimate_survivability(&s, level, &ArmorConstants::default());
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
