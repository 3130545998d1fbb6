use anyhow::Result;

pub mod init;
pub mod run;
pub mod status;

pub fn show_how_to_use() -> Result<()> {
    println!("🗳️  Approval Workflow - multi-step vote/force state machine");
    println!();
    println!("To get started:");
    println!("  ⚙️  approval-workflow init              # Write approval-workflow.toml");
    println!("  📊 approval-workflow status            # Show the configured workflow");
    println!("  ▶️  approval-workflow run <file.toml>   # Replay a scenario");
    println!();
    println!("💡 See demos/ for ready-made scenario files.");
    Ok(())
}
