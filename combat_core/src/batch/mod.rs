//! Batch simulation - Repeated fights and offline catch-up
//!
//! A batch runs the same fight back-to-back, drawing every cycle from one
//! RNG stream, and stops at the first death.

mod offline;
mod progression;

pub use offline::{
    calculate_offline_progress, calculate_offline_progress_seeded, OfflineCharacter, OfflineProgressResult,
};
pub use progression::{apply_experience, xp_to_next_level, LevelProgress};

use crate::combat::{simulate_combat_unlogged, CombatOutcome, CombatResult, CombatSimulationInput};
use crate::config::GameConstants;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The same fight repeated `cycle_count` times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCombatInput {
    /// Fight to repeat; its `seed` is ignored in favour of the batch RNG
    pub combat_input: CombatSimulationInput,
    pub cycle_count: u32,
}

/// Aggregate of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchCombatResult {
    /// Cycles that ran, including the one that ended in death
    pub cycles_completed: u32,
    pub victories: u32,
    pub deaths: u32,
    pub fled: u32,
    pub timeouts: u32,
    pub total_xp: u64,
    pub total_gold: u64,
    pub items_found: Vec<String>,
    /// Mean DPS over every cycle that ran
    pub avg_dps: f64,
    pub death_reason: Option<String>,
}

impl BatchCombatResult {
    fn record(&mut self, result: CombatResult) {
        self.cycles_completed += 1;
        match result.outcome {
            CombatOutcome::Victory => self.victories += 1,
            CombatOutcome::Defeat => self.deaths += 1,
            CombatOutcome::Fled => self.fled += 1,
            CombatOutcome::Timeout => self.timeouts += 1,
        }
        if let Some(rewards) = result.rewards {
            self.total_xp += rewards.experience;
            self.total_gold += rewards.gold;
            self.items_found.extend(rewards.items);
        }
        // Running mean keeps the sum bounded for long batches
        self.avg_dps += (result.dps - self.avg_dps) / self.cycles_completed as f64;
        if result.death_reason.is_some() {
            self.death_reason = result.death_reason;
        }
    }

    /// Whether the batch ended early because the character died
    pub fn died(&self) -> bool {
        self.deaths > 0
    }
}

/// Run `input.cycle_count` fights back-to-back
///
/// Cycles do not carry health, resources or potions between them. The
/// first death ends the batch and its cycle is counted as completed.
pub fn simulate_batch_combat(
    input: &BatchCombatInput,
    constants: &GameConstants,
    rng: &mut impl Rng,
) -> BatchCombatResult {
    let mut batch = BatchCombatResult::default();

    for cycle in 0..input.cycle_count {
        let result = simulate_combat_unlogged(&input.combat_input, constants, rng);
        let died = result.died();
        tracing::trace!(cycle, outcome = ?result.outcome, "batch cycle finished");
        batch.record(result);
        if died {
            tracing::debug!(cycle, "batch interrupted by death");
            break;
        }
    }

    tracing::info!(
        enemy = %input.combat_input.enemy.id,
        cycles = batch.cycles_completed,
        requested = input.cycle_count,
        victories = batch.victories,
        deaths = batch.deaths,
        total_xp = batch.total_xp,
        total_gold = batch.total_gold,
        "batch combat complete"
    );
    batch
}
