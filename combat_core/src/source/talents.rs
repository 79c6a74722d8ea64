//! TalentBonuses - Stats from allocated talent points

use crate::config::{ClassDefinition, ConfigError};
use crate::source::StatSource;
use crate::stats::{StatAccumulator, StatLayer};
use crate::types::StatModifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Modifiers granted by a character's talent allocation
///
/// Built from a per-talent point map against a class's talent table. Points
/// above a talent's maximum are capped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TalentBonuses {
    pub modifiers: Vec<StatModifier>,
    pub points_spent: u32,
}

impl TalentBonuses {
    /// Resolve a talent point allocation into stat modifiers
    pub fn from_allocation(
        class: &ClassDefinition,
        points: &BTreeMap<String, u32>,
    ) -> Result<Self, ConfigError> {
        let mut bonuses = TalentBonuses::default();

        for (talent_id, &requested) in points {
            let talent = class
                .talent(talent_id)
                .ok_or_else(|| ConfigError::UnknownTalent {
                    class: class.id.clone(),
                    talent: talent_id.clone(),
                })?;

            let spent = requested.min(talent.max_points);
            if spent < requested {
                tracing::warn!(
                    talent = %talent_id,
                    requested,
                    max = talent.max_points,
                    "talent points above maximum were capped"
                );
            }
            if spent == 0 {
                continue;
            }

            bonuses.points_spent += spent;
            for modifier in &talent.per_point {
                bonuses.modifiers.push(StatModifier {
                    stat: modifier.stat,
                    value: modifier.value * spent as f64,
                    kind: modifier.kind,
                });
            }
        }

        Ok(bonuses)
    }
}

impl StatSource for TalentBonuses {
    fn id(&self) -> &str {
        "talents"
    }

    fn priority(&self) -> i32 {
        100 // Talents apply after gear
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for modifier in &self.modifiers {
            stats.apply_modifier(StatLayer::Talents, modifier);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_classes;

    #[test]
    fn test_points_are_capped() {
        let classes = default_classes().unwrap();
        let warrior = classes.get("warrior").unwrap();
        let talent = &warrior.talents[0];

        let mut points = BTreeMap::new();
        points.insert(talent.id.clone(), talent.max_points + 10);
        let bonuses = TalentBonuses::from_allocation(warrior, &points).unwrap();

        assert_eq!(bonuses.points_spent, talent.max_points);
        let expected = talent.per_point[0].value * talent.max_points as f64;
        assert!((bonuses.modifiers[0].value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_talent_rejected() {
        let classes = default_classes().unwrap();
        let mage = classes.get("mage").unwrap();
        let mut points = BTreeMap::new();
        points.insert("shield_wall".to_string(), 1);
        let err = TalentBonuses::from_allocation(mage, &points).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTalent { talent, .. } if talent == "shield_wall"));
    }

    #[test]
    fn test_empty_allocation() {
        let classes = default_classes().unwrap();
        let rogue = classes.get("rogue").unwrap();
        let bonuses = TalentBonuses::from_allocation(rogue, &BTreeMap::new()).unwrap();
        assert!(bonuses.modifiers.is_empty());
        assert_eq!(bonuses.priority(), 100);
    }
}
