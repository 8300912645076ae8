//! Noughts - tic-tac-toe on an animated terminal canvas.

#![warn(missing_docs)]

mod cli;
mod tui;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let intermission = cli.intermission_secs.map(Duration::from_secs);
    tui::run(cli.seed, intermission)
}
