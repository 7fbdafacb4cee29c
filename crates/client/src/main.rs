//! Offline arena battle harness.
//!
//! Loads a roster, picks two combatants and either resolves one battle
//! (printing the full result with its event log) or runs a series and prints
//! the summary. Output is JSON on stdout; logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # One battle, reproducible
//! arena roster.ron "Iron Warden" 2 --seed 7
//!
//! # 1000 battles across 8 workers
//! ARENA_WORKERS=8 arena roster.ron 1 2 1000
//! ```

mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use arena_content::RosterLoader;
use arena_runtime::{RuntimeConfig, RuntimeError, SeriesRunner};
use clap::Parser;

use report::{BattleReport, SeriesReport};

/// Resolve arena battles between roster combatants
#[derive(Parser)]
#[command(name = "arena")]
#[command(version)]
struct Cli {
    /// Roster file (RON)
    roster: PathBuf,

    /// First combatant, by id or name
    first: String,

    /// Second combatant, by id or name
    second: String,

    /// Number of battles; more than one prints a series summary
    #[arg(default_value_t = 1)]
    battles: u32,

    /// Base seed (overrides ARENA_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Worker tasks for series (overrides ARENA_WORKERS)
    #[arg(long)]
    workers: Option<usize>,

    /// Leave the event log out of single-battle output
    #[arg(long)]
    no_events: bool,

    /// Restore both combatants to full HP and shield before fighting
    #[arg(long)]
    full: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (ARENA_* overrides, RUST_LOG)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env();
    if let Some(seed) = cli.seed {
        config = config.with_base_seed(seed);
    }
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }

    let roster = RosterLoader::load(&cli.roster)?;
    let mut first = roster.lookup(&cli.first)?;
    let mut second = roster.lookup(&cli.second)?;
    if cli.full {
        first = first.at_full_resources();
        second = second.at_full_resources();
    }
    let runner = SeriesRunner::new(config);

    let mut out = std::io::stdout().lock();
    if cli.battles == 1 {
        let seed = runner.config().base_seed.unwrap_or_else(rand::random);
        tracing::info!(first = %first.name, second = %second.name, seed, "running battle");

        let mut result = runner
            .battle(&first, &second, seed)
            .await
            .inspect_err(log_rejection)?;
        if cli.no_events {
            result.events.clear();
        }
        serde_json::to_writer_pretty(&mut out, &BattleReport { seed, result })?;
    } else {
        let summary = runner
            .run(&first, &second, cli.battles)
            .await
            .inspect_err(log_rejection)?;
        serde_json::to_writer_pretty(&mut out, &SeriesReport::from(summary))?;
    }
    writeln!(out)?;

    Ok(())
}

fn log_rejection(err: &RuntimeError) {
    tracing::error!(
        code = err.error_code(),
        severity = err.severity().as_str(),
        "battle rejected: {err}"
    );
}
