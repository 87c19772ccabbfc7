use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Testament: Building and executing BDD tests.
#[derive(Parser, Debug)]
#[command(name = "testament")]
#[command(about = "Building and executing BDD tests")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity. Use multiple times for more detail (e.g., -vv for debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run BDD testcases
    Run {
        /// Path to the scenario file to execute
        path: PathBuf,
    },
}
