//! Stats - Aggregated combat stats from all sources
//!
//! Attributes are tracked in four additive layers (base, gear, talents,
//! buffs) and then converted into the flat [`CombatStats`] the simulator
//! consumes.

mod aggregator;
mod attribute_value;
mod computed;

pub use aggregator::{SecondaryValue, StatAccumulator, StatLayer};
pub use attribute_value::{AttributeSet, AttributeTable, AttributeValue};
pub use computed::{calculate_average_item_level, estimate_dps, estimate_survivability};

use crate::config::{ClassRegistry, ConfigError, GameConstants};
use crate::source::{BaseStatsSource, BuffEffect, GearSource, StatSource, TalentBonuses};
use crate::types::{EquipmentSlot, ResourceType, StatModifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of the character whose stats are aggregated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub name: String,
    pub class_id: String,
    pub level: u32,
}

/// Damage range and swing speed of a weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub min_damage: f64,
    pub max_damage: f64,
    /// Seconds between swings
    pub speed: f64,
}

impl WeaponStats {
    /// Swap an inverted range and replace an unusable speed
    pub fn normalized(self, fallback_speed: f64) -> Self {
        let (min_damage, max_damage) = if self.min_damage > self.max_damage {
            (self.max_damage, self.min_damage)
        } else {
            (self.min_damage, self.max_damage)
        };
        let speed = if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            fallback_speed
        };
        WeaponStats {
            min_damage: min_damage.max(0.0),
            max_damage: max_damage.max(0.0),
            speed,
        }
    }
}

/// An item worn in an equipment slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub item_level: u32,
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
}

/// Equipped items by slot; unequipped slots are absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentSet {
    items: BTreeMap<EquipmentSlot, EquippedItem>,
}

impl EquipmentSet {
    pub fn new() -> Self {
        EquipmentSet {
            items: BTreeMap::new(),
        }
    }

    /// Equip an item, returning whatever was in the slot before
    pub fn equip(&mut self, slot: EquipmentSlot, item: EquippedItem) -> Option<EquippedItem> {
        self.items.insert(slot, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquippedItem> {
        self.items.remove(&slot)
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.items.get(&slot)
    }

    /// Items in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&EquipmentSlot, &EquippedItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Flattened stats consumed by the combat simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub max_health: f64,
    pub resource_type: ResourceType,
    pub max_resource: f64,
    /// Resource regenerated per second
    pub resource_regen: f64,
    pub attack_power: f64,
    pub spell_power: f64,
    /// Percent, clamped to the crit ceiling
    pub melee_crit_chance: f64,
    /// Percent, clamped to the crit ceiling
    pub spell_crit_chance: f64,
    /// Percent
    pub dodge_chance: f64,
    pub armor: f64,
    pub weapon_damage_min: f64,
    pub weapon_damage_max: f64,
    /// Seconds between auto-attacks
    pub weapon_speed: f64,
}

/// Result of stat aggregation: derived stats plus the layered attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub stats: CombatStats,
    pub attributes: AttributeSet,
}

/// Aggregate a character's class, level, gear, talents and buffs into combat stats
///
/// Sources are applied in priority order (base, gear, talents, buffs).
/// Fails only when the character's class is not in `classes`.
pub fn calculate_combat_stats(
    character: &CharacterData,
    equipment: &EquipmentSet,
    talents: Option<&TalentBonuses>,
    buffs: &[BuffEffect],
    classes: &ClassRegistry,
    constants: &GameConstants,
) -> Result<AggregatedStats, ConfigError> {
    let class = classes.get(&character.class_id)?;

    let base = BaseStatsSource::new(class, character.level);
    let gear: Vec<GearSource<'_>> = equipment
        .iter()
        .map(|(slot, item)| GearSource::new(*slot, item))
        .collect();

    let mut sources: Vec<&dyn StatSource> = Vec::with_capacity(gear.len() + buffs.len() + 2);
    sources.push(&base);
    sources.extend(gear.iter().map(|g| g as &dyn StatSource));
    if let Some(talents) = talents {
        sources.push(talents);
    }
    sources.extend(buffs.iter().map(|b| b as &dyn StatSource));
    sources.sort_by_key(|s| s.priority());

    let mut accumulator = StatAccumulator::new();
    for source in sources {
        tracing::trace!(source = source.id(), "applying stat source");
        source.apply(&mut accumulator);
    }

    let aggregated = accumulator.finalize(class, constants);
    tracing::debug!(
        character = %character.name,
        class = %class.id,
        level = character.level,
        max_health = aggregated.stats.max_health,
        "aggregated combat stats"
    );
    Ok(aggregated)
}
