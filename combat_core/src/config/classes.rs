//! Class configuration loading

use super::ConfigError;
use crate::stats::{AttributeTable, EquipmentSet, EquippedItem};
use crate::types::{EquipmentSlot, ResourceType, StatModifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Which power stat a class's abilities scale with by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSource {
    #[default]
    Attack,
    Spell,
}

/// Attribute to secondary stat conversion rates for a class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingCoefficients {
    pub health_per_stamina: f64,
    pub mana_per_intellect: f64,
    pub mana_per_spirit: f64,
    /// Mana regenerated per second per point of spirit
    pub mana_regen_per_spirit: f64,
    pub attack_power_per_strength: f64,
    pub attack_power_per_agility: f64,
    pub spell_power_per_intellect: f64,
    /// Crit chance (percent) per point of agility
    pub crit_per_agility: f64,
    /// Spell crit chance (percent) per point of intellect
    pub spell_crit_per_intellect: f64,
    /// Dodge chance (percent) per point of agility
    pub dodge_per_agility: f64,
    pub armor_per_agility: f64,
}

/// A talent node a class can invest points into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentDefinition {
    pub id: String,
    /// Talent tree the node belongs to
    #[serde(default)]
    pub tree: String,
    pub max_points: u32,
    /// Modifiers granted for every point spent
    pub per_point: Vec<StatModifier>,
}

/// Item placed in a slot when a character of the class is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterItem {
    pub slot: EquipmentSlot,
    pub item: EquippedItem,
}

/// Static description of a playable class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub primary_power: PowerSource,
    /// Attributes at level 1
    pub base_attributes: AttributeTable,
    /// Attributes gained per level after the first
    pub attributes_per_level: AttributeTable,
    pub base_health: f64,
    pub health_per_level: f64,
    /// Mana pool before intellect/spirit (ignored for rage and energy users)
    #[serde(default)]
    pub base_mana: f64,
    #[serde(default)]
    pub mana_per_level: f64,
    pub scaling: ScalingCoefficients,
    #[serde(default)]
    pub base_crit_chance: f64,
    #[serde(default)]
    pub base_spell_crit: f64,
    #[serde(default)]
    pub base_dodge: f64,
    /// Default rotation, highest priority first
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub talents: Vec<TalentDefinition>,
    #[serde(default)]
    pub starter_gear: Vec<StarterItem>,
}

impl ClassDefinition {
    /// Find a talent by id
    pub fn talent(&self, id: &str) -> Option<&TalentDefinition> {
        self.talents.iter().find(|t| t.id == id)
    }

    /// Equipment a fresh character of this class wears
    pub fn starter_equipment(&self) -> EquipmentSet {
        let mut equipment = EquipmentSet::new();
        for starter in &self.starter_gear {
            equipment.equip(starter.slot, starter.item.clone());
        }
        equipment
    }

    /// Check the definition for values aggregation cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        for starter in &self.starter_gear {
            if let Some(weapon) = &starter.item.weapon {
                if weapon.min_damage > weapon.max_damage || weapon.speed <= 0.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "class '{}' starter weapon '{}' has invalid damage {}-{} at speed {}",
                        self.id,
                        starter.item.template_id,
                        weapon.min_damage,
                        weapon.max_damage,
                        weapon.speed
                    )));
                }
            }
        }
        if let Some(talent) = self.talents.iter().find(|t| t.max_points == 0) {
            return Err(ConfigError::ValidationError(format!(
                "class '{}' talent '{}' has max_points 0",
                self.id, talent.id
            )));
        }
        Ok(())
    }
}

/// Class lookup table
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassDefinition>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        ClassRegistry {
            classes: HashMap::new(),
        }
    }

    pub fn register(&mut self, class: ClassDefinition) {
        self.classes.insert(class.id.clone(), class);
    }

    /// Get a class by id, rejecting unknown ids
    pub fn get(&self, id: &str) -> Result<&ClassDefinition, ConfigError> {
        self.classes
            .get(id)
            .ok_or_else(|| ConfigError::UnknownClass(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Container for class configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassesConfig {
    classes: Vec<ClassDefinition>,
}

fn build_registry(config: ClassesConfig) -> Result<ClassRegistry, ConfigError> {
    let mut registry = ClassRegistry::new();
    for class in config.classes {
        class.validate()?;
        registry.register(class);
    }
    Ok(registry)
}

/// Load class configurations from a TOML file
pub fn load_class_configs(path: &Path) -> Result<ClassRegistry, ConfigError> {
    build_registry(super::load_toml(path)?)
}

/// Load class configurations from a TOML string
pub fn parse_class_configs(content: &str) -> Result<ClassRegistry, ConfigError> {
    build_registry(super::parse_toml(content)?)
}

/// Get default class configurations
pub fn default_classes() -> Result<ClassRegistry, ConfigError> {
    parse_class_configs(include_str!("../../config/classes.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatType;

    const MINIMAL: &str = r#"
[[classes]]
id = "monk"
name = "Monk"
resource_type = "energy"
base_attributes = { strength = 12, agility = 16, stamina = 12 }
attributes_per_level = { agility = 2, stamina = 1 }
base_health = 60
health_per_level = 12
scaling = { health_per_stamina = 10, attack_power_per_agility = 2 }
abilities = ["palm_strike"]

[[classes.talents]]
id = "swift_hands"
max_points = 5
per_point = [{ stat = "crit_chance", value = 1.0 }]

[[classes.starter_gear]]
slot = "main_hand"
item = { template_id = "wraps", name = "Cloth Wraps", item_level = 1, weapon = { min_damage = 3, max_damage = 5, speed = 1.5 } }
"#;

    #[test]
    fn test_parse_classes() {
        let classes = parse_class_configs(MINIMAL).unwrap();
        let monk = classes.get("monk").unwrap();
        assert_eq!(monk.resource_type, ResourceType::Energy);
        assert!((monk.base_attributes.agility - 16.0).abs() < f64::EPSILON);
        assert!((monk.base_attributes.intellect - 0.0).abs() < f64::EPSILON);
        assert_eq!(monk.primary_power, PowerSource::Attack);

        let talent = monk.talent("swift_hands").unwrap();
        assert_eq!(talent.per_point[0].stat, StatType::CritChance);

        let gear = monk.starter_equipment();
        assert!(gear.get(EquipmentSlot::MainHand).is_some());
    }

    #[test]
    fn test_unknown_class() {
        let classes = parse_class_configs(MINIMAL).unwrap();
        assert!(matches!(
            classes.get("paladin"),
            Err(ConfigError::UnknownClass(id)) if id == "paladin"
        ));
    }

    #[test]
    fn test_inverted_starter_weapon_rejected() {
        let toml = MINIMAL.replace("min_damage = 3, max_damage = 5", "min_damage = 9, max_damage = 5");
        assert!(matches!(
            parse_class_configs(&toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_classes_load() {
        let classes = default_classes().unwrap();
        for id in ["warrior", "mage", "rogue"] {
            assert!(classes.get(id).is_ok(), "missing class {id}");
        }
    }
}
