//! Mutable per-fight state for both sides

use super::input::{BuffPotion, CombatSimulationInput};
use crate::ability::AbilityState;
use crate::config::{GameConstants, TierModifiers};
use crate::enemy::EnemyDefinition;
use crate::stats::CombatStats;
use crate::types::{ModifierKind, ResourceType, StatType};

/// A buff potion currently affecting the player
#[derive(Debug, Clone)]
pub struct ActiveBuff {
    pub potion: BuffPotion,
    pub remaining: f64,
}

/// The player during a fight
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub level: u32,
    /// Stats before buff potions
    pub base_stats: CombatStats,
    /// Stats with active buff potions applied
    pub stats: CombatStats,
    pub health: f64,
    /// Health as it would stand at normal difficulty. Rotation triggers,
    /// potion thresholds and flee read this, so one seed makes the same
    /// choices at every difficulty.
    pub baseline_health: f64,
    pub resource: f64,
    pub swing_timer: f64,
    pub abilities: Vec<AbilityState>,
    pub health_potions: u32,
    pub resource_potions: u32,
    pub potion_cooldown: f64,
    pub buffs: Vec<ActiveBuff>,
}

impl PlayerState {
    pub fn new(input: &CombatSimulationInput) -> Self {
        let stats = input.combatant.stats.clone();
        PlayerState {
            level: input.combatant.level,
            health: stats.max_health,
            baseline_health: stats.max_health,
            resource: stats.resource_type.starting_amount(stats.max_resource),
            swing_timer: 0.0,
            abilities: input
                .abilities
                .iter()
                .cloned()
                .map(AbilityState::new)
                .collect(),
            health_potions: input.consumables.health_potions,
            resource_potions: input.consumables.resource_potions,
            potion_cooldown: 0.0,
            buffs: Vec::new(),
            base_stats: stats.clone(),
            stats,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.stats.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.stats.max_health).clamp(0.0, 1.0)
    }

    pub fn baseline_health_fraction(&self) -> f64 {
        if self.stats.max_health <= 0.0 {
            return 0.0;
        }
        (self.baseline_health / self.stats.max_health).clamp(0.0, 1.0)
    }

    pub fn resource_fraction(&self) -> f64 {
        if self.stats.max_resource <= 0.0 {
            return 0.0;
        }
        (self.resource / self.stats.max_resource).clamp(0.0, 1.0)
    }

    pub fn gain_resource(&mut self, amount: f64) {
        self.resource = (self.resource + amount).clamp(0.0, self.stats.max_resource);
    }

    /// Apply `amount` of mitigated damage scaled by `taken`; returns the
    /// health actually lost
    pub fn take_damage(&mut self, amount: f64, taken: f64) -> f64 {
        let damage = amount * taken;
        self.health -= damage;
        self.baseline_health -= amount;
        damage
    }

    /// Restore `amount` of health scaled by `received`; returns the health
    /// actually restored
    pub fn heal(&mut self, amount: f64, received: f64) -> f64 {
        let before = self.health;
        self.health = (self.health + amount * received).min(self.stats.max_health);
        self.baseline_health = (self.baseline_health + amount).min(self.stats.max_health);
        self.health - before
    }

    /// Recompute effective stats from the active buffs
    ///
    /// Growing a pool also fills it by the same amount; shrinking clamps the
    /// current value.
    pub fn refresh_stats(&mut self, constants: &GameConstants) {
        let old_max_health = self.stats.max_health;
        let old_max_resource = self.stats.max_resource;

        let mut stats = self.base_stats.clone();
        let mut flat = SecondaryTotals::default();
        let mut percent = SecondaryTotals::default();
        for buff in &self.buffs {
            for modifier in &buff.potion.modifiers {
                let totals = match modifier.kind {
                    ModifierKind::Flat => &mut flat,
                    ModifierKind::Percent => &mut percent,
                };
                totals.add(modifier.stat, modifier.value);
            }
        }

        let apply = |value: f64, stat: StatType| {
            (value + flat.get(stat)) * (1.0 + percent.get(stat) / 100.0)
        };
        stats.max_health = apply(stats.max_health, StatType::Health).max(1.0);
        if stats.resource_type == ResourceType::Mana {
            stats.max_resource = apply(stats.max_resource, StatType::Resource).max(0.0);
        }
        stats.resource_regen = apply(stats.resource_regen, StatType::ResourceRegen).max(0.0);
        stats.attack_power = apply(stats.attack_power, StatType::AttackPower).max(0.0);
        stats.spell_power = apply(stats.spell_power, StatType::SpellPower).max(0.0);
        stats.melee_crit_chance =
            apply(stats.melee_crit_chance, StatType::CritChance).clamp(0.0, constants.stats.crit_ceiling);
        stats.spell_crit_chance = apply(stats.spell_crit_chance, StatType::SpellCritChance)
            .clamp(0.0, constants.stats.crit_ceiling);
        stats.dodge_chance =
            apply(stats.dodge_chance, StatType::DodgeChance).clamp(0.0, constants.stats.dodge_cap);
        stats.armor = apply(stats.armor, StatType::Armor).max(0.0);
        self.stats = stats;

        let health_delta = self.stats.max_health - old_max_health;
        if health_delta > 0.0 {
            self.health += health_delta;
            self.baseline_health += health_delta;
        }
        self.health = self.health.min(self.stats.max_health);
        self.baseline_health = self.baseline_health.min(self.stats.max_health);

        let resource_delta = self.stats.max_resource - old_max_resource;
        if resource_delta > 0.0 {
            self.resource += resource_delta;
        }
        self.resource = self.resource.min(self.stats.max_resource);
    }
}

/// Secondary stat totals from buff potions
#[derive(Debug, Clone, Copy, Default)]
struct SecondaryTotals {
    health: f64,
    resource: f64,
    resource_regen: f64,
    attack_power: f64,
    spell_power: f64,
    crit_chance: f64,
    spell_crit_chance: f64,
    armor: f64,
    dodge_chance: f64,
}

impl SecondaryTotals {
    fn slot(&mut self, stat: StatType) -> Option<&mut f64> {
        match stat {
            StatType::Health => Some(&mut self.health),
            StatType::Resource => Some(&mut self.resource),
            StatType::ResourceRegen => Some(&mut self.resource_regen),
            StatType::AttackPower => Some(&mut self.attack_power),
            StatType::SpellPower => Some(&mut self.spell_power),
            StatType::CritChance => Some(&mut self.crit_chance),
            StatType::SpellCritChance => Some(&mut self.spell_crit_chance),
            StatType::Armor => Some(&mut self.armor),
            StatType::DodgeChance => Some(&mut self.dodge_chance),
            _ => None,
        }
    }

    fn add(&mut self, stat: StatType, value: f64) {
        if let Some(slot) = self.slot(stat) {
            *slot += value;
        }
    }

    fn get(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Health => self.health,
            StatType::Resource => self.resource,
            StatType::ResourceRegen => self.resource_regen,
            StatType::AttackPower => self.attack_power,
            StatType::SpellPower => self.spell_power,
            StatType::CritChance => self.crit_chance,
            StatType::SpellCritChance => self.spell_crit_chance,
            StatType::Armor => self.armor,
            StatType::DodgeChance => self.dodge_chance,
            _ => 0.0,
        }
    }
}

/// The enemy during a fight, with tier scaling applied
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub level: u32,
    pub health: f64,
    pub max_health: f64,
    pub damage: f64,
    pub damage_multiplier: f64,
    pub attack_speed: f64,
    pub armor: f64,
    pub resistance: f64,
    pub swing_timer: f64,
    pub abilities: Vec<AbilityState>,
}

impl EnemyState {
    pub fn new(definition: &EnemyDefinition, tier: TierModifiers) -> Self {
        let max_health = (definition.health * tier.health).max(0.0);
        EnemyState {
            level: definition.level,
            health: max_health,
            max_health,
            damage: definition.base_damage * tier.damage,
            damage_multiplier: tier.damage,
            attack_speed: definition.attack_speed,
            armor: definition.armor,
            resistance: definition.resistance,
            swing_timer: 0.0,
            abilities: definition
                .abilities
                .iter()
                .cloned()
                .map(|ability| AbilityState::with_frequency(ability, tier.ability_frequency))
                .collect(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}
