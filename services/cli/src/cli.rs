use crate::infra::{load_engine, SnapshotSource};
use crate::report::{render_family, render_leaderboard, render_rewards, render_stats};
use clap::{Args, Parser, Subcommand};
use family_quest::config::AppConfig;
use family_quest::error::AppError;
use family_quest::progression::{FamilyId, RecomputeScope};
use family_quest::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "family-quest",
    about = "Inspect family progress, levels and reward eligibility from a dashboard snapshot",
    version
)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Dashboard snapshot (JSON). Defaults to QUEST_SNAPSHOT_PATH, then the built-in sample.
    #[arg(long, global = true)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank families by recomputed score
    Leaderboard,
    /// Show score, badges and levels for one family
    Family {
        /// Family id
        id: u32,
    },
    /// Evaluate every reward for one family
    Rewards {
        /// Family id
        family_id: u32,
    },
    /// Dashboard counters and recent activity
    Stats,
    /// Print the snapshot with refreshed family aggregates
    Export,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let source = SnapshotSource::resolve(cli.source.snapshot, config.snapshot_path.clone());
    let mut engine = load_engine(&source, &config)?;
    let refreshed = engine.request_recompute(RecomputeScope::All)?;
    info!(
        environment = ?config.environment,
        source = %source,
        families = refreshed.len(),
        "snapshot loaded"
    );

    let json = cli.source.json;
    match cli.command {
        Command::Leaderboard => render_leaderboard(&engine.leaderboard(), json),
        Command::Family { id } => render_family(&engine.family_progress(FamilyId(id))?, json),
        Command::Rewards { family_id } => {
            let family_id = FamilyId(family_id);
            let evaluations = engine.reward_evaluations(family_id)?;
            render_rewards(&engine, family_id, &evaluations, json)
        }
        Command::Stats => render_stats(&engine.stats(), &engine.recent_activity(), json),
        Command::Export => {
            let document = engine.store().snapshot().to_json_pretty()?;
            println!("{document}");
            Ok(())
        }
    }
}
