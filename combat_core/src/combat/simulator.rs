//! Combat simulator - Second-by-second fight loop
//!
//! Each step runs the same phases in order:
//! 1. tick cooldowns, swing timers, regeneration and buff durations
//! 2. enemy auto-attack, then its first ready ability
//! 3. player ability from the rotation, otherwise an auto-attack
//! 4. potions
//! 5. termination checks (death, flee, timeout)
//!
//! Every attack draws exactly two numbers from the RNG (attack table and
//! damage spread) whatever the outcome. Difficulty only scales the health the
//! player loses and regains, and the player's choices read the normal
//! difficulty health track, so one seed replays the same fight at every
//! difficulty and an easier setting never ends with less health.

use super::input::CombatSimulationInput;
use super::log::{CombatLog, CombatLogEntry, HighlightKind, LogKind, AUTO_ATTACK};
use super::result::{CombatOutcome, CombatResult, PotionUsage, KILLED_IN_COMBAT};
use super::rewards::roll_rewards;
use super::state::{ActiveBuff, EnemyState, PlayerState};
use crate::ability::{AbilityEffect, DamageSchool, PriorityRotation, RotationContext, RotationStrategy};
use crate::config::{DifficultyModifiers, GameConstants, TierModifiers};
use crate::defense::{apply_armor, apply_resistance, miss_chance, AttackOutcome, AttackTable};
use crate::types::{CombatSide, ResourceType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Simulate one fight, seeding the RNG from `input.seed` (random when absent)
pub fn simulate_combat(input: &CombatSimulationInput, constants: &GameConstants) -> CombatResult {
    let seed = input.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate_combat_with_rng(input, constants, &mut rng)
}

/// Simulate one fight with a provided RNG (for deterministic testing)
pub fn simulate_combat_with_rng(
    input: &CombatSimulationInput,
    constants: &GameConstants,
    rng: &mut impl Rng,
) -> CombatResult {
    simulate_combat_with_strategy(input, constants, &PriorityRotation, rng)
}

/// Simulate one fight with a custom player rotation
pub fn simulate_combat_with_strategy(
    input: &CombatSimulationInput,
    constants: &GameConstants,
    strategy: &dyn RotationStrategy,
    rng: &mut impl Rng,
) -> CombatResult {
    CombatSimulator::new(input, constants, strategy, true).run(rng)
}

/// Simulate without recording log entries; highlights are still kept
pub(crate) fn simulate_combat_unlogged(
    input: &CombatSimulationInput,
    constants: &GameConstants,
    rng: &mut impl Rng,
) -> CombatResult {
    CombatSimulator::new(input, constants, &PriorityRotation, false).run(rng)
}

/// Draw the two numbers every attack consumes: an attack table roll in
/// [0, 100) and a damage spread in [0, 1)
fn attack_rolls(rng: &mut impl Rng) -> (f64, f64) {
    let table_roll = rng.gen_range(0.0..100.0);
    let spread = rng.gen::<f64>();
    (table_roll, spread)
}

fn interpolate(min: f64, max: f64, spread: f64) -> f64 {
    min + (max - min) * spread
}

struct CombatSimulator<'a> {
    input: &'a CombatSimulationInput,
    constants: &'a GameConstants,
    strategy: &'a dyn RotationStrategy,
    difficulty: DifficultyModifiers,
    tier: TierModifiers,
    player: PlayerState,
    enemy: EnemyState,
    log: CombatLog,
    elapsed: f64,
    damage_dealt: f64,
    damage_taken: f64,
    potions: PotionUsage,
}

impl<'a> CombatSimulator<'a> {
    fn new(
        input: &'a CombatSimulationInput,
        constants: &'a GameConstants,
        strategy: &'a dyn RotationStrategy,
        record_log: bool,
    ) -> Self {
        let tier = constants.tiers.get(input.enemy.tier);
        CombatSimulator {
            input,
            constants,
            strategy,
            difficulty: constants.difficulty.get(input.difficulty),
            tier,
            player: PlayerState::new(input),
            enemy: EnemyState::new(&input.enemy, tier),
            log: CombatLog::new(record_log),
            elapsed: 0.0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            potions: PotionUsage::default(),
        }
    }

    fn run(mut self, rng: &mut impl Rng) -> CombatResult {
        let tick = if self.constants.combat.tick_seconds > 0.0 {
            self.constants.combat.tick_seconds
        } else {
            1.0
        };
        let max_steps = if self.input.max_duration_seconds > 0.0 {
            ((self.input.max_duration_seconds / tick).ceil() as u64).max(1)
        } else {
            1
        };

        self.apply_buff_potions();

        let mut outcome = CombatOutcome::Timeout;
        for step in 1..=max_steps {
            self.elapsed = step as f64 * tick;
            self.advance_timers(tick);

            if self.enemy.is_alive() {
                self.enemy_turn(rng);
            }
            if !self.player.is_alive() {
                outcome = CombatOutcome::Defeat;
                break;
            }
            self.note_near_death();

            self.player_turn(rng);
            if !self.enemy.is_alive() {
                outcome = CombatOutcome::Victory;
                break;
            }

            self.use_potions();

            if self.input.settings.flee_enabled
                && self.player.baseline_health_fraction() < self.input.settings.flee_threshold
            {
                self.log.highlight(
                    self.elapsed,
                    HighlightKind::Fled,
                    format!("Fled from {} at {:.0}% health", self.input.enemy.name, self.player.health_fraction() * 100.0),
                );
                outcome = CombatOutcome::Fled;
                break;
            }
        }

        self.finish(outcome, rng)
    }

    fn apply_buff_potions(&mut self) {
        for potion in &self.input.consumables.buff_potions {
            if potion.duration_seconds <= 0.0 {
                tracing::debug!(potion = %potion.id, "skipping buff potion with no duration");
                continue;
            }
            let mut potion = potion.clone();
            potion.modifiers.retain(|modifier| {
                if modifier.stat.is_attribute() {
                    tracing::warn!(
                        potion = %potion.id,
                        stat = ?modifier.stat,
                        "attribute modifiers on in-fight buffs are ignored"
                    );
                    false
                } else {
                    true
                }
            });
            self.log.push(CombatLogEntry {
                timestamp: 0.0,
                source: CombatSide::Player,
                ability: potion.id.clone(),
                kind: LogKind::Buff,
                damage: 0.0,
                healing: 0.0,
            });
            self.potions.buff += 1;
            self.player.buffs.push(ActiveBuff {
                remaining: potion.duration_seconds,
                potion,
            });
        }
        if !self.player.buffs.is_empty() {
            self.player.refresh_stats(self.constants);
        }
    }

    fn advance_timers(&mut self, tick: f64) {
        for ability in &mut self.player.abilities {
            ability.tick(tick);
        }
        for ability in &mut self.enemy.abilities {
            ability.tick(tick);
        }
        // Carry at most one step of swing overflow
        self.player.swing_timer = (self.player.swing_timer - tick).max(-tick);
        self.enemy.swing_timer = (self.enemy.swing_timer - tick).max(-tick);
        self.player.potion_cooldown = (self.player.potion_cooldown - tick).max(0.0);

        let regen = self.player.stats.resource_regen * tick;
        self.player.gain_resource(regen);

        let before = self.player.buffs.len();
        for buff in &mut self.player.buffs {
            buff.remaining -= tick;
        }
        self.player.buffs.retain(|buff| buff.remaining > 0.0);
        if self.player.buffs.len() != before {
            self.player.refresh_stats(self.constants);
        }
    }

    fn enemy_turn(&mut self, rng: &mut impl Rng) {
        if self.enemy.swing_timer <= 0.0 {
            let variance = self.constants.combat.damage_variance;
            let min = self.enemy.damage * (1.0 - variance);
            let max = self.enemy.damage * (1.0 + variance);
            self.enemy_strike(AUTO_ATTACK, min, max, DamageSchool::Physical, rng);
            let speed = self.enemy.attack_speed.max(f64::EPSILON);
            self.enemy.swing_timer += speed;
        }
        if !self.player.is_alive() {
            return;
        }

        let health_fraction = self.enemy.health_fraction();
        let elapsed = self.elapsed;
        let Some(index) = self
            .enemy
            .abilities
            .iter()
            .position(|ability| ability.is_ready(elapsed, 1.0, health_fraction))
        else {
            return;
        };

        self.enemy.abilities[index].mark_used(elapsed);
        let definition = self.enemy.abilities[index].definition.clone();
        match definition.effect {
            AbilityEffect::Damage { min, max, school, .. } => {
                let scale = self.enemy.damage_multiplier;
                self.enemy_strike(&definition.id, min * scale, max * scale, school, rng);
            }
            AbilityEffect::Heal { min, max, .. } => {
                let (_, spread) = attack_rolls(rng);
                let amount = interpolate(min, max, spread);
                let before = self.enemy.health;
                self.enemy.health = (self.enemy.health + amount).min(self.enemy.max_health);
                self.log.push(CombatLogEntry {
                    timestamp: self.elapsed,
                    source: CombatSide::Enemy,
                    ability: definition.id.clone(),
                    kind: LogKind::Heal,
                    damage: 0.0,
                    healing: self.enemy.health - before,
                });
            }
        }
    }

    fn enemy_strike(&mut self, ability: &str, min: f64, max: f64, school: DamageSchool, rng: &mut impl Rng) {
        let (table_roll, spread) = attack_rolls(rng);
        let combat = &self.constants.combat;
        let dodge = match school {
            DamageSchool::Physical => self.player.stats.dodge_chance,
            DamageSchool::Spell => 0.0,
        };
        let table = AttackTable::new(
            miss_chance(self.enemy.level, self.player.level, combat),
            dodge,
            combat.enemy_crit_chance,
        );

        let outcome = table.resolve(table_roll);
        let (kind, damage) = match outcome {
            AttackOutcome::Miss => (LogKind::Miss, 0.0),
            AttackOutcome::Dodge => (LogKind::Dodge, 0.0),
            AttackOutcome::Crit | AttackOutcome::Hit => {
                let crit = outcome == AttackOutcome::Crit;
                let multiplier = if crit { combat.enemy_crit_multiplier } else { 1.0 };
                let raw = interpolate(min, max, spread) * multiplier;
                let mitigated = match school {
                    DamageSchool::Physical => {
                        apply_armor(raw, self.player.stats.armor, self.enemy.level, &self.constants.armor)
                    }
                    DamageSchool::Spell => raw,
                };
                let kind = if crit { LogKind::Crit } else { LogKind::Damage };
                (kind, mitigated)
            }
        };

        let damage = if matches!(outcome, AttackOutcome::Crit | AttackOutcome::Hit) {
            let lost = self.player.take_damage(damage, self.difficulty.damage_taken);
            self.damage_taken += lost;
            if self.player.stats.resource_type == ResourceType::Rage {
                self.player.gain_resource(self.constants.combat.rage_per_hit_taken);
            }
            lost
        } else {
            damage
        };

        self.log.push(CombatLogEntry {
            timestamp: self.elapsed,
            source: CombatSide::Enemy,
            ability: ability.to_string(),
            kind,
            damage,
            healing: 0.0,
        });
    }

    fn player_turn(&mut self, rng: &mut impl Rng) {
        let choice = {
            let context = RotationContext {
                abilities: &self.player.abilities,
                elapsed: self.elapsed,
                resource: self.player.resource,
                max_resource: self.player.stats.max_resource,
                health_fraction: self.player.baseline_health_fraction(),
                use_cooldowns: self.input.settings.use_cooldowns,
            };
            self.strategy
                .next_ability(&context)
                .filter(|&index| context.is_usable(index))
        };

        match choice {
            Some(index) => self.use_ability(index, rng),
            None if self.player.swing_timer <= 0.0 => {
                let stats = &self.player.stats;
                let (min, max) = (stats.weapon_damage_min, stats.weapon_damage_max);
                self.player_strike(AUTO_ATTACK, min, max, 1.0, DamageSchool::Physical, rng);
                self.player.swing_timer += self.player.stats.weapon_speed.max(f64::EPSILON);
            }
            None => {}
        }
    }

    fn use_ability(&mut self, index: usize, rng: &mut impl Rng) {
        let definition = self.player.abilities[index].definition.clone();
        tracing::trace!(ability = %definition.id, elapsed = self.elapsed, "player uses ability");

        self.player.resource = (self.player.resource - definition.resource_cost).max(0.0);
        self.player.abilities[index].mark_used(self.elapsed);

        match definition.effect {
            AbilityEffect::Damage {
                min,
                max,
                coefficient,
                school,
            } => self.player_strike(&definition.id, min, max, coefficient, school, rng),
            AbilityEffect::Heal { min, max, coefficient } => {
                let (table_roll, spread) = attack_rolls(rng);
                let crit = table_roll < self.player.stats.spell_crit_chance;
                let multiplier = if crit { self.constants.stats.crit_multiplier } else { 1.0 };
                let amount = interpolate(min, max, spread)
                    * (1.0 + self.player.stats.spell_power * coefficient / 100.0)
                    * multiplier;
                let healed = self.player.heal(amount, self.difficulty.healing_received);
                self.log.push(CombatLogEntry {
                    timestamp: self.elapsed,
                    source: CombatSide::Player,
                    ability: definition.id.clone(),
                    kind: LogKind::Heal,
                    damage: 0.0,
                    healing: healed,
                });
            }
        }
    }

    fn player_strike(
        &mut self,
        ability: &str,
        min: f64,
        max: f64,
        coefficient: f64,
        school: DamageSchool,
        rng: &mut impl Rng,
    ) {
        let (table_roll, spread) = attack_rolls(rng);
        let stats = &self.player.stats;
        let combat = &self.constants.combat;
        let (power, crit_chance, dodge) = match school {
            DamageSchool::Physical => (stats.attack_power, stats.melee_crit_chance, combat.enemy_dodge_chance),
            DamageSchool::Spell => (stats.spell_power, stats.spell_crit_chance, 0.0),
        };
        let table = AttackTable::new(
            miss_chance(self.player.level, self.enemy.level, combat),
            dodge,
            crit_chance,
        );

        let outcome = table.resolve(table_roll);
        let (kind, damage) = match outcome {
            AttackOutcome::Miss => (LogKind::Miss, 0.0),
            AttackOutcome::Dodge => (LogKind::Dodge, 0.0),
            AttackOutcome::Crit | AttackOutcome::Hit => {
                let crit = outcome == AttackOutcome::Crit;
                let multiplier = if crit { self.constants.stats.crit_multiplier } else { 1.0 };
                let raw = interpolate(min, max, spread)
                    * (1.0 + power * coefficient / 100.0)
                    * multiplier;
                let mitigated = match school {
                    DamageSchool::Physical => {
                        apply_armor(raw, self.enemy.armor, self.player.level, &self.constants.armor)
                    }
                    DamageSchool::Spell => {
                        apply_resistance(raw, self.enemy.resistance, combat.max_resistance)
                    }
                };
                let kind = if crit { LogKind::Crit } else { LogKind::Damage };
                (kind, mitigated)
            }
        };

        let landed = matches!(outcome, AttackOutcome::Crit | AttackOutcome::Hit);
        if landed {
            self.damage_dealt += damage.min(self.enemy.health.max(0.0));
            self.enemy.health -= damage;

            if self.player.stats.resource_type == ResourceType::Rage {
                self.player.gain_resource(self.constants.combat.rage_per_hit_dealt);
            }
            if outcome == AttackOutcome::Crit {
                self.log.highlight(
                    self.elapsed,
                    HighlightKind::CriticalHit,
                    format!("{} critically hit for {:.0}", ability, damage),
                );
            }
            if !self.enemy.is_alive() {
                self.log.highlight(
                    self.elapsed,
                    HighlightKind::KillingBlow,
                    format!("{} defeated {}", ability, self.input.enemy.name),
                );
            }
        }

        self.log.push(CombatLogEntry {
            timestamp: self.elapsed,
            source: CombatSide::Player,
            ability: ability.to_string(),
            kind,
            damage,
            healing: 0.0,
        });
    }

    fn use_potions(&mut self) {
        if self.player.potion_cooldown > 0.0 {
            return;
        }
        let settings = &self.input.settings;
        let potion_constants = &self.constants.potions;

        if self.player.health_potions > 0
            && self.player.baseline_health_fraction() < settings.health_potion_threshold
        {
            self.player.health_potions -= 1;
            self.potions.health += 1;
            self.player.potion_cooldown = potion_constants.cooldown;
            let restore = self.player.stats.max_health * potion_constants.health_restore;
            let healed = self.player.heal(restore, self.difficulty.healing_received);
            self.log.push(CombatLogEntry {
                timestamp: self.elapsed,
                source: CombatSide::Player,
                ability: "health_potion".to_string(),
                kind: LogKind::Heal,
                damage: 0.0,
                healing: healed,
            });
            self.log.highlight(
                self.elapsed,
                HighlightKind::PotionUsed,
                format!("Drank a health potion for {:.0}", healed),
            );
        } else if self.player.resource_potions > 0
            && self.player.stats.max_resource > 0.0
            && self.player.resource_fraction() < settings.resource_potion_threshold
        {
            self.player.resource_potions -= 1;
            self.potions.resource += 1;
            self.player.potion_cooldown = potion_constants.cooldown;
            let before = self.player.resource;
            self.player
                .gain_resource(self.player.stats.max_resource * potion_constants.resource_restore);
            self.log.push(CombatLogEntry {
                timestamp: self.elapsed,
                source: CombatSide::Player,
                ability: "resource_potion".to_string(),
                kind: LogKind::Resource,
                damage: 0.0,
                healing: self.player.resource - before,
            });
            self.log.highlight(
                self.elapsed,
                HighlightKind::PotionUsed,
                "Drank a resource potion".to_string(),
            );
        }
    }

    fn note_near_death(&mut self) {
        let fraction = self.player.health_fraction();
        if fraction > 0.0
            && fraction < self.constants.combat.near_death_threshold
            && !self.log.has_highlight(HighlightKind::NearDeath)
        {
            self.log.highlight(
                self.elapsed,
                HighlightKind::NearDeath,
                format!("Survived at {:.0}% health", fraction * 100.0),
            );
        }
    }

    fn finish(self, outcome: CombatOutcome, rng: &mut impl Rng) -> CombatResult {
        let rewards = (outcome == CombatOutcome::Victory).then(|| {
            roll_rewards(
                &self.input.enemy,
                self.player.level,
                self.tier,
                self.difficulty,
                &self.constants.rewards,
                rng,
            )
        });
        let death_reason = (outcome == CombatOutcome::Defeat).then(|| KILLED_IN_COMBAT.to_string());

        let duration = self.elapsed;
        let dps = if duration > 0.0 { self.damage_dealt / duration } else { 0.0 };
        let player_health_percent = (self.player.health_fraction() * 100.0).clamp(0.0, 100.0);

        tracing::debug!(
            enemy = %self.input.enemy.id,
            outcome = ?outcome,
            duration,
            dps,
            player_health_percent,
            "combat finished"
        );

        let (combat_log, highlights) = self.log.into_parts();
        CombatResult {
            duration_seconds: duration,
            victory: outcome == CombatOutcome::Victory,
            outcome,
            total_damage_dealt: self.damage_dealt,
            total_damage_taken: self.damage_taken,
            dps,
            player_health_percent,
            death_reason,
            rewards,
            combat_log,
            highlights,
            potions_used: self.potions,
        }
    }
}
