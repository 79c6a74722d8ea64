//! combat-sim - Run stat, fight, batch and offline simulations from scenario files
//!
//! Every command reads a scenario JSON file and prints JSON to stdout.
//! Logs go to stderr; set `RUST_LOG=combat_core=debug` for details.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use combat_core::batch::{calculate_offline_progress_seeded, simulate_batch_combat, BatchCombatInput, OfflineCharacter};
use combat_core::combat::simulate_combat;
use combat_core::config::GameContent;
use combat_core::scenario::Scenario;
use combat_core::stats::{calculate_average_item_level, estimate_dps, estimate_survivability, AggregatedStats};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Combat simulation and offline progress driver
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Simulate fights and offline progress for idle RPG characters", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate a character's stats
    Stats(ScenarioArgs),

    /// Simulate a single fight
    Fight {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Drop the per-event combat log from the output
        #[arg(long)]
        no_log: bool,
    },

    /// Repeat a fight until the cycle count or the first death
    Batch {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Number of fights to run
        #[arg(long, default_value_t = 10)]
        cycles: u32,
    },

    /// Catch a character up on time spent away
    Offline {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Activity id the character was left doing
        #[arg(long)]
        activity: Option<String>,

        /// Experience into the current level
        #[arg(long, default_value_t = 0)]
        experience: u64,

        /// When the character was last online (RFC 3339)
        #[arg(long, conflicts_with = "hours")]
        since: Option<DateTime<Utc>>,

        /// Hours away, counted back from now
        #[arg(long)]
        hours: Option<f64>,
    },
}

#[derive(Args)]
struct ScenarioArgs {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Directory with classes.toml, abilities.toml, enemies.toml and activities.toml
    #[arg(long)]
    content: Option<PathBuf>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

impl ScenarioArgs {
    fn load(&self) -> Result<(Scenario, GameContent)> {
        let content = match &self.content {
            Some(dir) => GameContent::load_from_dir(dir)
                .with_context(|| format!("failed to load content from {}", dir.display()))?,
            None => GameContent::builtin().context("built-in content is invalid")?,
        };
        let mut scenario = read_scenario(&self.scenario)?;
        if self.seed.is_some() {
            scenario.seed = self.seed;
        }
        Ok((scenario, content))
    }
}

fn read_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid scenario {}", path.display()))
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    aggregated: AggregatedStats,
    estimated_dps: f64,
    survivability: f64,
    average_item_level: f64,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_stats(args: &ScenarioArgs) -> Result<()> {
    let (scenario, content) = args.load()?;
    let class = content.classes.get(&scenario.character.class_id)?;
    let aggregated = scenario.aggregate(&content)?;
    let equipment = scenario.resolve_equipment(&content)?;
    let report = StatsReport {
        estimated_dps: estimate_dps(&aggregated.stats, class),
        survivability: estimate_survivability(
            &aggregated.stats,
            scenario.character.level,
            &content.constants.armor,
        ),
        average_item_level: calculate_average_item_level(&equipment),
        aggregated,
    };
    print_json(&report)
}

fn run_fight(args: &ScenarioArgs, no_log: bool) -> Result<()> {
    let (scenario, content) = args.load()?;
    let input = scenario.build_input(&content)?;
    let mut result = simulate_combat(&input, &content.constants);
    if no_log {
        result.combat_log.clear();
    }
    print_json(&result)
}

fn run_batch(args: &ScenarioArgs, cycles: u32) -> Result<()> {
    let (scenario, content) = args.load()?;
    let input = BatchCombatInput {
        combat_input: scenario.build_input(&content)?,
        cycle_count: cycles,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(scenario.seed.unwrap_or_else(rand::random));
    let result = simulate_batch_combat(&input, &content.constants, &mut rng);
    print_json(&result)
}

/// The instant `hours` before `returned_at`
fn hours_before(returned_at: DateTime<Utc>, hours: f64) -> Result<DateTime<Utc>> {
    let millis = hours * 3_600_000.0;
    if !millis.is_finite() || millis < 0.0 || millis >= i64::MAX as f64 {
        bail!("--hours must be a non-negative number of hours, got {hours}");
    }
    let away = Duration::try_milliseconds(millis as i64)
        .with_context(|| format!("--hours {hours} is too long"))?;
    returned_at
        .checked_sub_signed(away)
        .with_context(|| format!("--hours {hours} reaches before the earliest representable date"))
}

fn run_offline(
    args: &ScenarioArgs,
    activity: Option<String>,
    experience: u64,
    since: Option<DateTime<Utc>>,
    hours: Option<f64>,
) -> Result<()> {
    let (scenario, content) = args.load()?;
    let returned_at = Utc::now();
    let last_online_at = match (since, hours) {
        (Some(since), _) => since,
        (None, Some(hours)) => hours_before(returned_at, hours)?,
        (None, None) => bail!("one of --since or --hours is required"),
    };

    let character = OfflineCharacter {
        level: scenario.character.level,
        experience,
        combat_input: Some(scenario.build_input(&content)?),
        activity_performed: activity,
    };
    let seed = scenario.seed.unwrap_or_else(rand::random);
    let result = calculate_offline_progress_seeded(
        &character,
        &content.activities,
        &content.constants,
        last_online_at,
        returned_at,
        seed,
    )?;
    print_json(&result)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Stats(args) => run_stats(&args),
        Command::Fight { scenario, no_log } => run_fight(&scenario, no_log),
        Command::Batch { scenario, cycles } => run_batch(&scenario, cycles),
        Command::Offline {
            scenario,
            activity,
            experience,
            since,
            hours,
        } => run_offline(&scenario, activity, experience, since, hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hours_before() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(hours_before(now, 2.0).unwrap(), now - Duration::hours(2));
        assert_eq!(hours_before(now, 0.0).unwrap(), now);
    }

    #[test]
    fn test_hours_before_rejects_bad_values() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(hours_before(now, -1.0).is_err());
        assert!(hours_before(now, f64::NAN).is_err());
        assert!(hours_before(now, f64::INFINITY).is_err());
        // Representable as a duration but far past the earliest date
        assert!(hours_before(now, 1e10).is_err());
        assert!(hours_before(now, 1e20).is_err());
    }
}
