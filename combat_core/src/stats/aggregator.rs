//! StatAccumulator - Collects stat modifications before deriving combat stats

use super::{AggregatedStats, AttributeSet, AttributeTable, AttributeValue, CombatStats, WeaponStats};
use crate::config::{ClassDefinition, GameConstants};
use crate::types::{Attribute, ModifierKind, ResourceType, StatModifier, StatType};

/// Which attribute layer a source contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatLayer {
    Base,
    Gear,
    Talents,
    Buffs,
}

impl StatLayer {
    fn index(self) -> usize {
        match self {
            StatLayer::Base => 0,
            StatLayer::Gear => 1,
            StatLayer::Talents => 2,
            StatLayer::Buffs => 3,
        }
    }
}

/// A secondary stat being accumulated: `(derived + flat) * (1 + percent / 100)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SecondaryValue {
    pub flat: f64,
    /// Percent bonus (10.0 = +10%)
    pub percent: f64,
}

impl SecondaryValue {
    pub fn add(&mut self, kind: ModifierKind, value: f64) {
        match kind {
            ModifierKind::Flat => self.flat += value,
            ModifierKind::Percent => self.percent += value,
        }
    }

    /// Combine with the amount derived from attributes
    pub fn compute(&self, derived: f64) -> f64 {
        (derived + self.flat) * (1.0 + self.percent / 100.0)
    }
}

/// Accumulates stat modifications from various sources
///
/// Attribute modifiers are kept per layer so the final [`AttributeSet`]
/// can report where each point came from.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    // === Attributes ===
    attribute_flat: [AttributeTable; 4],
    attribute_percent: [AttributeTable; 4],

    // === Pools ===
    pub health: SecondaryValue,
    pub resource: SecondaryValue,
    pub resource_regen: SecondaryValue,

    // === Offense ===
    pub attack_power: SecondaryValue,
    pub spell_power: SecondaryValue,
    pub crit_chance: SecondaryValue,
    pub spell_crit_chance: SecondaryValue,

    // === Defense ===
    pub armor: SecondaryValue,
    pub dodge_chance: SecondaryValue,

    // === Weapon ===
    pub weapon: Option<WeaponStats>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    /// Add a flat amount to one attribute on a layer
    pub fn add_attribute(&mut self, layer: StatLayer, attribute: Attribute, value: f64) {
        self.attribute_flat[layer.index()].add(attribute, value);
    }

    /// Apply a typed modifier on behalf of a source in `layer`
    pub fn apply_modifier(&mut self, layer: StatLayer, modifier: &StatModifier) {
        self.apply_stat_type(layer, modifier.stat, modifier.kind, modifier.value);
    }

    /// Apply a raw value for a stat type
    pub fn apply_stat_type(&mut self, layer: StatLayer, stat: StatType, kind: ModifierKind, value: f64) {
        let tables = match kind {
            ModifierKind::Flat => &mut self.attribute_flat,
            ModifierKind::Percent => &mut self.attribute_percent,
        };
        match stat {
            StatType::AllAttributes => tables[layer.index()].add_all(value),
            StatType::Strength
            | StatType::Agility
            | StatType::Intellect
            | StatType::Stamina
            | StatType::Spirit => {
                if let Some(attribute) = stat.attribute() {
                    tables[layer.index()].add(attribute, value);
                }
            }
            StatType::Health => self.health.add(kind, value),
            StatType::Resource => self.resource.add(kind, value),
            StatType::ResourceRegen => self.resource_regen.add(kind, value),
            StatType::AttackPower => self.attack_power.add(kind, value),
            StatType::SpellPower => self.spell_power.add(kind, value),
            StatType::CritChance => self.crit_chance.add(kind, value),
            StatType::SpellCritChance => self.spell_crit_chance.add(kind, value),
            StatType::Armor => self.armor.add(kind, value),
            StatType::DodgeChance => self.dodge_chance.add(kind, value),
        }
    }

    /// Build the layered attribute set
    ///
    /// Percent bonuses scale the flat sum of all layers and are credited to
    /// the layer that granted them.
    pub fn attributes(&self) -> AttributeSet {
        let mut set = AttributeSet::default();
        for &attribute in Attribute::all() {
            let flat: Vec<f64> = self
                .attribute_flat
                .iter()
                .map(|table| table.get(attribute))
                .collect();
            let flat_total: f64 = flat.iter().sum();
            let layer = |i: usize| {
                flat[i] + flat_total * self.attribute_percent[i].get(attribute) / 100.0
            };
            *set.get_mut(attribute) = AttributeValue::from_layers(layer(0), layer(1), layer(2), layer(3));
        }
        set
    }

    /// Derive the flat combat stats using a class's scaling coefficients
    pub fn finalize(&self, class: &ClassDefinition, constants: &GameConstants) -> AggregatedStats {
        let attributes = self.attributes();
        let scaling = &class.scaling;
        let limits = &constants.stats;

        let strength = attributes.total(Attribute::Strength);
        let agility = attributes.total(Attribute::Agility);
        let intellect = attributes.total(Attribute::Intellect);
        let stamina = attributes.total(Attribute::Stamina);
        let spirit = attributes.total(Attribute::Spirit);

        let max_health = self
            .health
            .compute(stamina * scaling.health_per_stamina)
            .max(1.0);

        let (max_resource, resource_regen) = match class.resource_type {
            ResourceType::Mana => (
                self.resource
                    .compute(intellect * scaling.mana_per_intellect + spirit * scaling.mana_per_spirit),
                self.resource_regen.compute(spirit * scaling.mana_regen_per_spirit),
            ),
            ResourceType::Energy => (
                limits.capped_resource_max,
                self.resource_regen.compute(limits.energy_regen),
            ),
            ResourceType::Rage => (limits.capped_resource_max, self.resource_regen.compute(0.0)),
        };

        let attack_power = self.attack_power.compute(
            strength * scaling.attack_power_per_strength + agility * scaling.attack_power_per_agility,
        );
        let spell_power = self
            .spell_power
            .compute(intellect * scaling.spell_power_per_intellect);
        let melee_crit_chance = self
            .crit_chance
            .compute(agility * scaling.crit_per_agility)
            .clamp(0.0, limits.crit_ceiling);
        let spell_crit_chance = self
            .spell_crit_chance
            .compute(intellect * scaling.spell_crit_per_intellect)
            .clamp(0.0, limits.crit_ceiling);
        let dodge_chance = self
            .dodge_chance
            .compute(agility * scaling.dodge_per_agility)
            .clamp(0.0, limits.dodge_cap);
        let armor = self.armor.compute(agility * scaling.armor_per_agility).max(0.0);

        let weapon = self
            .weapon
            .map(|w| w.normalized(limits.unarmed_speed))
            .unwrap_or(WeaponStats {
                min_damage: limits.unarmed_damage_min,
                max_damage: limits.unarmed_damage_max,
                speed: limits.unarmed_speed,
            });

        AggregatedStats {
            stats: CombatStats {
                max_health,
                resource_type: class.resource_type,
                max_resource: max_resource.max(0.0),
                resource_regen: resource_regen.max(0.0),
                attack_power: attack_power.max(0.0),
                spell_power: spell_power.max(0.0),
                melee_crit_chance,
                spell_crit_chance,
                dodge_chance,
                armor,
                weapon_damage_min: weapon.min_damage,
                weapon_damage_max: weapon.max_damage,
                weapon_speed: weapon.speed,
            },
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_modifiers_land_on_their_layer() {
        let mut acc = StatAccumulator::new();
        acc.add_attribute(StatLayer::Base, Attribute::Stamina, 20.0);
        acc.apply_modifier(StatLayer::Gear, &StatModifier::flat(StatType::Stamina, 5.0));
        acc.apply_modifier(StatLayer::Buffs, &StatModifier::flat(StatType::AllAttributes, 2.0));

        let set = acc.attributes();
        assert!((set.stamina.base - 20.0).abs() < f64::EPSILON);
        assert!((set.stamina.gear - 5.0).abs() < f64::EPSILON);
        assert!((set.stamina.buffs - 2.0).abs() < f64::EPSILON);
        assert!((set.stamina.total - 27.0).abs() < f64::EPSILON);
        assert!((set.spirit.total - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_applies_after_flat_sum() {
        let mut acc = StatAccumulator::new();
        acc.add_attribute(StatLayer::Base, Attribute::Strength, 80.0);
        acc.add_attribute(StatLayer::Gear, Attribute::Strength, 20.0);
        acc.apply_modifier(
            StatLayer::Talents,
            &StatModifier::percent(StatType::Strength, 10.0),
        );

        let set = acc.attributes();
        // 10% of (80 + 20) credited to talents
        assert!((set.strength.talents - 10.0).abs() < 1e-9);
        assert!((set.strength.total - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_secondary_value_compute() {
        let mut value = SecondaryValue::default();
        value.add(ModifierKind::Flat, 50.0);
        value.add(ModifierKind::Percent, 20.0);
        assert!((value.compute(150.0) - 240.0).abs() < 1e-9);
    }
}
