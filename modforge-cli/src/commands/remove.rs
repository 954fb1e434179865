//! Module removal command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use modforge::{ModforgeConfig, ModuleOptions, ModuleSpec};

pub struct RemoveCommand {
    modules: Vec<String>,
}

impl RemoveCommand {
    pub fn new(modules: Vec<String>) -> Self {
        Self { modules }
    }

    pub fn execute(&self) -> Result<()> {
        let config = ModforgeConfig::load().context("Failed to load configuration")?;

        for module in &self.modules {
            let spec = ModuleSpec::new(module, ModuleOptions::default(), &config);
            let target = Path::new(&config.modules_path).join(&spec.path);

            if target.is_dir() {
                fs::remove_dir_all(&target)
                    .with_context(|| format!("Failed to remove {}", target.display()))?;
                println!(
                    "{} removed {}",
                    style("✓").green(),
                    style(target.display()).dim()
                );
            } else {
                println!(
                    "{} {} has no generated files",
                    style("!").yellow().bold(),
                    style(module).yellow()
                );
            }
        }
        Ok(())
    }
}
