use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "approval-workflow")]
#[command(about = "Multi-step approval workflows driven by votes and force-approvals")]
#[command(long_about = "Runs approval workflows where each step needs a number of distinct votes \
                       before moving on. Replay a scenario file with 'approval-workflow run' or \
                       inspect the configured workflow with 'approval-workflow status'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scenario file against a fresh workflow
    Run {
        /// Path to the scenario TOML document
        scenario: PathBuf,
        /// Print the full report as JSON instead of one line per action
        #[arg(long, help = "Emit the replay report as JSON")]
        json: bool,
    },
    /// Show the workflow built from the current configuration
    Status {
        /// Print the snapshot as JSON
        #[arg(long, help = "Emit the workflow snapshot as JSON")]
        json: bool,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, help = "Overwrite existing configuration")]
        force: bool,
    },
}
