//! BaseStatsSource - Stats from class and character level

use crate::config::ClassDefinition;
use crate::source::StatSource;
use crate::stats::{StatAccumulator, StatLayer};
use crate::types::{Attribute, ModifierKind, ResourceType, StatType};

/// Class starting values plus per-level growth
pub struct BaseStatsSource<'a> {
    pub class: &'a ClassDefinition,
    /// Character level (1 and up)
    pub level: u32,
}

impl<'a> BaseStatsSource<'a> {
    /// Create a new base stats source
    pub fn new(class: &'a ClassDefinition, level: u32) -> Self {
        BaseStatsSource { class, level }
    }

    fn levels_gained(&self) -> f64 {
        self.level.saturating_sub(1) as f64
    }
}

impl StatSource for BaseStatsSource<'_> {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        let levels = self.levels_gained();
        let class = self.class;

        for &attribute in Attribute::all() {
            let value = class.base_attributes.get(attribute)
                + class.attributes_per_level.get(attribute) * levels;
            stats.add_attribute(StatLayer::Base, attribute, value);
        }

        let flat = |stats: &mut StatAccumulator, stat: StatType, value: f64| {
            stats.apply_stat_type(StatLayer::Base, stat, ModifierKind::Flat, value);
        };
        flat(stats, StatType::Health, class.base_health + class.health_per_level * levels);
        if class.resource_type == ResourceType::Mana {
            flat(stats, StatType::Resource, class.base_mana + class.mana_per_level * levels);
        }
        flat(stats, StatType::CritChance, class.base_crit_chance);
        flat(stats, StatType::SpellCritChance, class.base_spell_crit);
        flat(stats, StatType::DodgeChance, class.base_dodge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_classes;

    #[test]
    fn test_base_stats_level_scaling() {
        let classes = default_classes().unwrap();
        let warrior = classes.get("warrior").unwrap();

        let mut level_one = StatAccumulator::new();
        BaseStatsSource::new(warrior, 1).apply(&mut level_one);
        let mut level_ten = StatAccumulator::new();
        BaseStatsSource::new(warrior, 10).apply(&mut level_ten);

        let expected_gain = warrior.health_per_level * 9.0;
        assert!((level_ten.health.flat - level_one.health.flat - expected_gain).abs() < 1e-9);

        let strength_gain = level_ten.attributes().strength.base - level_one.attributes().strength.base;
        assert!((strength_gain - warrior.attributes_per_level.strength * 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_rage_class_gets_no_mana() {
        let classes = default_classes().unwrap();
        let warrior = classes.get("warrior").unwrap();
        let mut acc = StatAccumulator::new();
        BaseStatsSource::new(warrior, 30).apply(&mut acc);
        assert!((acc.resource.flat - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_stats_priority() {
        let classes = default_classes().unwrap();
        let source = BaseStatsSource::new(classes.get("mage").unwrap(), 1);
        assert_eq!(source.priority(), -100);
    }
}
