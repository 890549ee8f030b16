use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use court_scheduler::config::AppConfig;
use court_scheduler::generator::generate_round;
use court_scheduler::parse_id_list;
use court_scheduler::scoring::{score_breakdown, ScoreBreakdown, ScoringContext};
use court_scheduler::snapshot::{EventSnapshot, RoundPlan};

#[derive(Parser)]
#[command(name = "court-scheduler")]
#[command(about = "Generate balanced doubles/singles rounds for club events")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./court-scheduler.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the next round from an event snapshot
    Generate {
        /// Event snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Courts available this round (defaults to the snapshot, then the config)
        #[arg(long)]
        courts: Option<u32>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Score a specific match proposal against an event snapshot
    Score {
        /// Event snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Team 1 player ids (comma-separated)
        #[arg(long)]
        team1: String,

        /// Team 2 player ids (comma-separated)
        #[arg(long)]
        team2: String,
    },

    /// Load and validate the configuration file
    CheckConfig,
}

#[derive(Serialize)]
struct ScoreReport {
    total: f64,
    #[serde(flatten)]
    components: ScoreBreakdown,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting court-scheduler v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Generate {
            snapshot,
            courts,
            pretty,
        } => {
            let snap = EventSnapshot::from_file(&snapshot)
                .with_context(|| format!("Failed to load snapshot {:?}", snapshot))?;

            let input = snap.to_round_input(
                courts,
                config.scheduler.courts_available,
                config.scheduler.weights,
            );
            let result = generate_round(&input)?;

            if result.is_empty() {
                tracing::warn!("No more matches can be generated for this event");
            }

            let plan = RoundPlan::new(snap.next_round_number(), &result);
            print_json(&plan, pretty)?;
        }

        Commands::Score {
            snapshot,
            team1,
            team2,
        } => {
            let snap = EventSnapshot::from_file(&snapshot)
                .with_context(|| format!("Failed to load snapshot {:?}", snapshot))?;

            let team1 = snap.players_by_id(&parse_id_list(&team1), "team1")?;
            let team2 = snap.players_by_id(&parse_id_list(&team2), "team2")?;
            if team1.is_empty() || team2.is_empty() {
                bail!("Both teams need at least one player");
            }

            let games_played = snap.games_played_map();
            let history = snap.match_history();
            let ctx = ScoringContext::new(&games_played, &history);

            let components = score_breakdown(&team1, &team2, &config.scheduler.weights, &ctx);
            let report = ScoreReport {
                total: components.total(),
                components,
            };
            print_json(&report, true)?;
        }

        Commands::CheckConfig => {
            let config = AppConfig::from_file(&cli.config)
                .with_context(|| format!("Invalid config {:?}", cli.config))?;
            tracing::info!(
                "Config OK: {} courts, weights sum {:.3}",
                config.scheduler.courts_available,
                config.scheduler.weights.sum()
            );
        }
    }

    Ok(())
}
