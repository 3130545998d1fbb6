use anyhow::Result;

use crate::config::ApprovalWorkflowConfig;

pub struct StatusCommand {
    pub json: bool,
}

impl StatusCommand {
    pub fn new() -> Self {
        Self { json: false }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute(&self, config: &ApprovalWorkflowConfig) -> Result<()> {
        let snapshot = config.workflow.build().snapshot();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            return Ok(());
        }

        println!("📊 APPROVAL WORKFLOW");
        println!("────────────────────");
        if snapshot.step_count == 0 {
            println!("✅ No steps configured - workflow is finished from the start");
            return Ok(());
        }

        for step in &snapshot.steps {
            let marker = if step.index == snapshot.current_step { "👉" } else { "  " };
            println!(
                "{marker} Step {} - {} vote(s) required, {} cast",
                step.index, step.required, step.votes
            );
        }
        println!();
        println!("   🎯 Total steps: {}", snapshot.step_count);
        println!("   🏁 Finished: {}", snapshot.finished);
        Ok(())
    }
}

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}
