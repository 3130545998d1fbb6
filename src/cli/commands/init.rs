use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::config::{ApprovalWorkflowConfig, CONFIG_FILE};

pub struct InitCommand {
    pub force: bool,
    pub path: PathBuf,
}

impl InitCommand {
    pub fn new(force: bool) -> Self {
        Self {
            force,
            path: PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    pub fn execute(&self) -> Result<()> {
        if self.path.exists() && !self.force {
            bail!(
                "{} already exists. Use --force to overwrite it",
                self.path.display()
            );
        }

        let mut config = ApprovalWorkflowConfig::default();
        config.workflow.steps = vec![1];
        config.save_to_file(&self.path)?;

        println!("✅ Wrote {}", self.path.display());
        Ok(())
    }
}
