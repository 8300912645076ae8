//! Command-line interface for noughts.

use clap::Parser;

/// Noughts - tic-tac-toe on an animated terminal canvas
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Keyboard-driven tic-tac-toe against a heuristic opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seed for the side roll and the opponent's dice; omit for a
    /// fresh game every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a timed stand-in ad break of this many seconds around
    /// every round start
    #[arg(long, value_name = "SECS")]
    pub intermission_secs: Option<u64>,
}
