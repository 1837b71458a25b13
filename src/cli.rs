//! # Command-Line Interface Module
//!
//! Clap definitions for the `autoplay` binary. Every command reads an
//! exported listening history (a JSON array of records) from disk.
//!
//! ## Commands
//!
//! - `proximity`: Time-proximity scores between tracks
//! - `frequency`: Play counts per track
//! - `overlap`: Song-level overlap between two listeners
//! - `completion`: Shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! autoplay proximity history.json --window-minutes 20 --top 25
//! autoplay frequency history.json --from "01 Jan 2021, 00:00"
//! autoplay overlap alice.json bob.json
//! ```

use crate::proximity::Strategy;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Aggregation strategy selectable from the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum StrategyArg {
    /// Compare every play against the whole history
    Naive,
    /// Binary-search each window in time-sorted plays
    SlidingWindow,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Naive => Strategy::Naive,
            StrategyArg::SlidingWindow => Strategy::SlidingWindow,
        }
    }
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Autoplay: time-proximity track associations from listening history")]
#[command(version)]
pub struct Args {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "AUTOPLAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// History input shared by the analysis commands.
#[derive(ClapArgs, Debug, Clone)]
pub struct HistoryArgs {
    /// JSON file holding an array of play records
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Listener name attached to the history (defaults to the file stem)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Drop plays before this instant (RFC 3339 or "03 Mar 2021, 17:45")
    #[arg(long)]
    pub from: Option<String>,

    /// Drop plays after this instant (RFC 3339 or "03 Mar 2021, 17:45")
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute time-proximity scores between tracks
    ///
    /// Lower scores mean two tracks tend to be played closer together.
    /// Pairs are printed lowest score first.
    Proximity {
        #[command(flatten)]
        history: HistoryArgs,

        /// Window width in minutes (overrides the config file)
        #[arg(short, long)]
        window_minutes: Option<i64>,

        /// Aggregation strategy (overrides the config file)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Only print the N closest pairs
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Print the pairs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count plays per track
    Frequency {
        #[command(flatten)]
        history: HistoryArgs,

        /// Only print the N most played tracks
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Song-level overlap between two listening histories
    Overlap {
        /// First listener's history
        #[arg(value_hint = clap::ValueHint::FilePath)]
        first: PathBuf,

        /// Second listener's history
        #[arg(value_hint = clap::ValueHint::FilePath)]
        second: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Usage: autoplay completion bash > ~/.local/share/bash-completion/completions/autoplay
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
