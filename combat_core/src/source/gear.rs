//! GearSource - Stats from equipped items

use crate::source::StatSource;
use crate::stats::{EquippedItem, StatAccumulator, StatLayer};
use crate::types::EquipmentSlot;

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The equipped item
    pub item: &'a EquippedItem,
}

impl<'a> GearSource<'a> {
    /// Create a new gear source
    pub fn new(slot: EquipmentSlot, item: &'a EquippedItem) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        &self.item.template_id
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for modifier in &self.item.modifiers {
            stats.apply_modifier(StatLayer::Gear, modifier);
        }

        // Only the main hand weapon drives auto-attacks
        if self.slot == EquipmentSlot::MainHand {
            if let Some(weapon) = self.item.weapon {
                stats.weapon = Some(weapon);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::WeaponStats;
    use crate::types::{StatModifier, StatType};

    fn axe() -> EquippedItem {
        EquippedItem {
            template_id: "worn_axe".to_string(),
            name: "Worn Axe".to_string(),
            item_level: 4,
            modifiers: vec![
                StatModifier::flat(StatType::Strength, 3.0),
                StatModifier::percent(StatType::AttackPower, 5.0),
            ],
            weapon: Some(WeaponStats {
                min_damage: 5.0,
                max_damage: 9.0,
                speed: 2.8,
            }),
        }
    }

    #[test]
    fn test_gear_source_id() {
        let item = axe();
        let source = GearSource::new(EquipmentSlot::MainHand, &item);
        assert_eq!(source.id(), "worn_axe");
    }

    #[test]
    fn test_main_hand_sets_weapon() {
        let item = axe();
        let mut acc = StatAccumulator::new();
        GearSource::new(EquipmentSlot::MainHand, &item).apply(&mut acc);
        assert_eq!(acc.weapon.map(|w| w.speed), Some(2.8));
        assert!((acc.attributes().strength.gear - 3.0).abs() < f64::EPSILON);
        assert!((acc.attack_power.percent - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_other_slot_keeps_modifiers_only() {
        let item = axe();
        let mut acc = StatAccumulator::new();
        GearSource::new(EquipmentSlot::OffHand, &item).apply(&mut acc);
        assert!(acc.weapon.is_none());
        assert!((acc.attributes().strength.gear - 3.0).abs() < f64::EPSILON);
    }
}
