//! Core enums and small value types shared across the engine

use serde::{Deserialize, Serialize};

/// Primary character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Agility,
    Intellect,
    Stamina,
    Spirit,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Strength,
            Attribute::Agility,
            Attribute::Intellect,
            Attribute::Stamina,
            Attribute::Spirit,
        ]
    }
}

/// Class-specific secondary resource pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Mana,
    Rage,
    Energy,
}

impl ResourceType {
    /// Rage and energy have a fixed ceiling that stats cannot raise
    pub fn is_capped(&self) -> bool {
        matches!(self, ResourceType::Rage | ResourceType::Energy)
    }

    /// Amount of the resource a fighter enters combat with, given its pool size
    pub fn starting_amount(&self, max: f64) -> f64 {
        match self {
            ResourceType::Rage => 0.0,
            ResourceType::Mana | ResourceType::Energy => max,
        }
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Neck,
    Shoulders,
    Back,
    Chest,
    Wrists,
    Hands,
    Waist,
    Legs,
    Feet,
    Ring1,
    Ring2,
    Trinket,
    MainHand,
    OffHand,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Head,
            EquipmentSlot::Neck,
            EquipmentSlot::Shoulders,
            EquipmentSlot::Back,
            EquipmentSlot::Chest,
            EquipmentSlot::Wrists,
            EquipmentSlot::Hands,
            EquipmentSlot::Waist,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
            EquipmentSlot::Trinket,
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
        ]
    }
}

/// Stat a modifier can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    // Attributes
    Strength,
    Agility,
    Intellect,
    Stamina,
    Spirit,
    AllAttributes,
    // Pools
    Health,
    Resource,
    ResourceRegen,
    // Offense
    AttackPower,
    SpellPower,
    CritChance,
    SpellCritChance,
    // Defense
    Armor,
    DodgeChance,
}

impl StatType {
    /// The attribute this stat raises, if it is an attribute stat
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            StatType::Strength => Some(Attribute::Strength),
            StatType::Agility => Some(Attribute::Agility),
            StatType::Intellect => Some(Attribute::Intellect),
            StatType::Stamina => Some(Attribute::Stamina),
            StatType::Spirit => Some(Attribute::Spirit),
            _ => None,
        }
    }

    /// Whether this stat feeds the attribute layers rather than a derived stat
    pub fn is_attribute(&self) -> bool {
        self.attribute().is_some() || matches!(self, StatType::AllAttributes)
    }
}

/// How a modifier value combines with the stat it targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Added before any percentage scaling
    #[default]
    Flat,
    /// Percentage of the flat total (value 10.0 = +10%)
    Percent,
}

/// A single stat bonus from gear, talents or buffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatType,
    pub value: f64,
    #[serde(default)]
    pub kind: ModifierKind,
}

impl StatModifier {
    /// Create a flat modifier
    pub fn flat(stat: StatType, value: f64) -> Self {
        StatModifier {
            stat,
            value,
            kind: ModifierKind::Flat,
        }
    }

    /// Create a percent modifier (value in percent, e.g. 10.0 = +10%)
    pub fn percent(stat: StatType, value: f64) -> Self {
        StatModifier {
            stat,
            value,
            kind: ModifierKind::Percent,
        }
    }
}

/// Damage/danger profile chosen by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Safe,
    #[default]
    Normal,
    Heroic,
}

/// Enemy strength tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTier {
    #[default]
    Normal,
    Elite,
    Boss,
}

/// Which side of a fight performed an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatSide {
    Player,
    Enemy,
}
