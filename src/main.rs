//! # Autoplay
//!
//! Reads exported listening histories and reports which tracks are played
//! close together in time.
//!
//! ## Usage
//!
//! ```bash
//! autoplay proximity history.json --window-minutes 20 --top 25
//! autoplay frequency history.json --top 10
//! autoplay overlap alice.json bob.json
//! autoplay completion fish > ~/.config/fish/completions/autoplay.fish
//! ```

use anyhow::{Context, Result};
use autoplay::cli::{self, HistoryArgs};
use autoplay::config::AppConfig;
use autoplay::history::{filter_by_date, PlayHistory};
use autoplay::proximity::{ProximityEngine, ProximityWindow};
use autoplay::{completion, overlap, record};
use clap::{CommandFactory, Parser};
use log::info;
use std::path::Path;

/// Listener name for a history file: explicit `--user`, else the file stem.
fn username_for(path: &Path, user: Option<&str>) -> String {
    user.map(str::to_string).unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    })
}

/// Load the history named by `args` and apply its date bounds.
fn load_filtered_history(args: &HistoryArgs) -> Result<PlayHistory> {
    let username = username_for(&args.file, args.user.as_deref());
    let history = record::load_history(&args.file, &username)?;

    let from = args
        .from
        .as_deref()
        .map(record::parse_timestamp)
        .transpose()
        .context("Invalid --from timestamp")?;
    let to = args
        .to
        .as_deref()
        .map(record::parse_timestamp)
        .transpose()
        .context("Invalid --to timestamp")?;

    if from.is_none() && to.is_none() {
        return Ok(history);
    }
    Ok(filter_by_date(&history, from, to))
}

/// Main entry point.
///
/// Logging goes through `env_logger`, controlled via `RUST_LOG`:
/// - `RUST_LOG=debug autoplay proximity history.json`
/// - `RUST_LOG=autoplay::proximity=trace autoplay proximity history.json`
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Proximity {
            history,
            window_minutes,
            strategy,
            top,
            json,
        } => {
            let mut config = AppConfig::load(args.config.as_deref())?;
            if let Some(minutes) = window_minutes {
                config.window_minutes = minutes;
            }
            if let Some(strategy) = strategy {
                config.strategy = strategy.into();
            }
            config.validate()?;
            let window: ProximityWindow = config.window()?;

            let plays = load_filtered_history(&history)?;
            info!(
                "Computing proximities for `{}` ({} plays) with a {} minute window",
                plays.username(),
                plays.len(),
                config.window_minutes
            );

            let table = ProximityEngine::new(config.engine_config())
                .compute(&plays, window)
                .context("Proximity computation failed")?;

            if json && top.is_none() {
                println!("{}", serde_json::to_string_pretty(&table)?);
                return Ok(());
            }

            let mut pairs = table.sorted_pairs();
            if let Some(n) = top {
                pairs.truncate(n);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&pairs)?);
            } else if pairs.is_empty() {
                println!("No tracks were played within {} minutes of each other", config.window_minutes);
            } else {
                for entry in &pairs {
                    println!("{:>12.6}  {}  ->  {}", entry.score, entry.from, entry.to);
                }
            }
        }
        cli::Command::Frequency { history, top } => {
            let plays = load_filtered_history(&history)?;

            let mut counts: Vec<_> = plays.frequency().into_iter().collect();
            counts.sort_by(|(ta, a), (tb, b)| b.cmp(a).then_with(|| ta.cmp(tb)));
            if let Some(n) = top {
                counts.truncate(n);
            }

            for (track, count) in counts {
                println!("{count:>6}  {track}");
            }
        }
        cli::Command::Overlap { first, second } => {
            let a = record::load_history(&first, &username_for(&first, None))?;
            let b = record::load_history(&second, &username_for(&second, None))?;
            println!("{:.6}", overlap(&a, &b));
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
