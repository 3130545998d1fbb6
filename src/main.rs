use anyhow::Result;
use clap::Parser;

use approval_workflow::cli::commands::{
    init::InitCommand, run::RunCommand, show_how_to_use, status::StatusCommand,
};
use approval_workflow::cli::{Cli, Commands};
use approval_workflow::config::ApprovalWorkflowConfig;
use approval_workflow::telemetry::init_telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = ApprovalWorkflowConfig::load_env_file() {
        eprintln!("⚠️  Ignoring unreadable .env file: {e}");
    }
    let config = ApprovalWorkflowConfig::load()?;
    init_telemetry(&config.observability)?;

    match cli.command {
        None => show_how_to_use(),
        Some(Commands::Run { scenario, json }) => RunCommand::new(scenario).with_json(json).execute(),
        Some(Commands::Status { json }) => StatusCommand::new().with_json(json).execute(&config),
        Some(Commands::Init { force }) => InitCommand::new(force).execute(),
    }
}
