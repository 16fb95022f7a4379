//! Command-line surface of the `arena` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "arena",
    version,
    about = "Texas Hold'em bot tournament runner"
)]
pub struct ArenaCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a freeze-out tournament between built-in bots
    Run(RunArgs),
    /// List bot strategies, or check roster entries with --check
    Bots {
        /// Roster entries to validate (name=strategy)
        #[arg(long = "check", value_name = "ENTRY")]
        check: Vec<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Deal one hand to N players and verify deck integrity
    Deal {
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate 5 to 7 cards, e.g. `arena eval-hand AS KS QS JS TS 2H 3D`
    EvalHand {
        #[arg(required = true, num_args = 1.., value_name = "CARD")]
        cards: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Entrant as name=strategy; repeat for each seat
    #[arg(long = "bot", value_name = "ENTRY", required = true)]
    pub bots: Vec<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Stop after this many hands (0 plays until one player remains)
    #[arg(long)]
    pub max_hands: Option<u64>,
    #[arg(long)]
    pub starting_chips: Option<u32>,
    /// Per-decision time limit in seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,
    /// Append one JSON line per hand to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Write final standings as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub standings: Option<PathBuf>,
}
