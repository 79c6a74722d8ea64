//! AttributeValue - The layered attribute container (Base + Gear + Talents + Buffs)

use crate::types::Attribute;
use serde::{Deserialize, Serialize};

/// Represents one attribute split into its contributing layers
///
/// Final value is calculated as:
/// `total = base + gear + talents + buffs`
///
/// - `base`: class starting value plus level growth
/// - `gear`: flat bonuses from equipped items
/// - `talents`: flat talent bonuses plus any talent percent bonus
/// - `buffs`: temporary buff bonuses (may be negative for debuffs)
///
/// `total` never drops below zero. A debuff large enough to push it negative
/// is clamped on the `buffs` layer so the sum still matches `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub base: f64,
    pub gear: f64,
    pub talents: f64,
    pub buffs: f64,
    pub total: f64,
}

impl AttributeValue {
    /// Build a value from its four layers
    pub fn from_layers(base: f64, gear: f64, talents: f64, buffs: f64) -> Self {
        let mut value = AttributeValue {
            base,
            gear,
            talents,
            buffs,
            total: 0.0,
        };
        value.recompute();
        value
    }

    /// Create a value that only has a base layer
    pub fn with_base(base: f64) -> Self {
        Self::from_layers(base, 0.0, 0.0, 0.0)
    }

    /// Recalculate `total`, clamping the buff layer if the sum would be negative
    pub fn recompute(&mut self) {
        let sum = self.base + self.gear + self.talents + self.buffs;
        if sum < 0.0 {
            self.buffs -= sum;
            self.total = 0.0;
        } else {
            self.total = sum;
        }
    }
}

/// The full five-attribute set of a character
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    pub strength: AttributeValue,
    pub agility: AttributeValue,
    pub intellect: AttributeValue,
    pub stamina: AttributeValue,
    pub spirit: AttributeValue,
}

impl AttributeSet {
    /// Get the value for an attribute
    pub fn get(&self, attribute: Attribute) -> &AttributeValue {
        match attribute {
            Attribute::Strength => &self.strength,
            Attribute::Agility => &self.agility,
            Attribute::Intellect => &self.intellect,
            Attribute::Stamina => &self.stamina,
            Attribute::Spirit => &self.spirit,
        }
    }

    /// Get a mutable value for an attribute
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut AttributeValue {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intellect => &mut self.intellect,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Spirit => &mut self.spirit,
        }
    }

    /// Shorthand for the total of an attribute
    pub fn total(&self, attribute: Attribute) -> f64 {
        self.get(attribute).total
    }
}

/// Plain per-attribute numbers, used for class tables and accumulator layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeTable {
    pub strength: f64,
    pub agility: f64,
    pub intellect: f64,
    pub stamina: f64,
    pub spirit: f64,
}

impl AttributeTable {
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intellect => self.intellect,
            Attribute::Stamina => self.stamina,
            Attribute::Spirit => self.spirit,
        }
    }

    pub fn add(&mut self, attribute: Attribute, value: f64) {
        match attribute {
            Attribute::Strength => self.strength += value,
            Attribute::Agility => self.agility += value,
            Attribute::Intellect => self.intellect += value,
            Attribute::Stamina => self.stamina += value,
            Attribute::Spirit => self.spirit += value,
        }
    }

    /// Add the same value to every attribute
    pub fn add_all(&mut self, value: f64) {
        for attribute in Attribute::all() {
            self.add(*attribute, value);
        }
    }
}
