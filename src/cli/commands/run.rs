use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::approval::Transition;
use crate::scenario::{ActionKind, Scenario};

pub struct RunCommand {
    pub scenario: PathBuf,
    pub json: bool,
}

impl RunCommand {
    pub fn new(scenario: PathBuf) -> Self {
        Self {
            scenario,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute(&self) -> Result<()> {
        let scenario = Scenario::load(&self.scenario)
            .with_context(|| format!("Failed to load scenario {}", self.scenario.display()))?;

        let report = scenario.run()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        let title = report.name.as_deref().unwrap_or("scenario");
        println!("▶️  Replaying {title} ({} actions)", report.actions.len());
        println!("────────────────────────────");
        for record in &report.actions {
            let verb = match record.action {
                ActionKind::Approve => "approve",
                ActionKind::Reject => "reject ",
            };
            let marker = match record.transition {
                Transition::Ignored { .. } => "⚪",
                Transition::VoteRecorded { .. } => "🗳️ ",
                Transition::Advanced { .. } => "🟢",
                Transition::RolledBack { .. } => "🔴",
            };
            println!(
                "{marker} #{:<3} {verb} by {:<12} {} → step {}",
                record.index, record.actor, record.transition, record.current_step
            );
        }
        println!();

        let outcome = &report.outcome;
        if outcome.finished {
            println!("✅ Workflow finished ({} steps)", outcome.step_count);
        } else {
            println!(
                "⏳ Workflow on step {} of {}",
                outcome.current_step + 1,
                outcome.step_count
            );
        }
        Ok(())
    }
}
