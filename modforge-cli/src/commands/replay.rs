//! Replay command
//!
//! Re-runs a generation that was parked because its table did not exist.
//! The parked filter stays recorded until a run actually sees the table;
//! the `make` flow clears it on success.

use anyhow::{Context, Result};
use console::style;
use modforge::pending::PendingFilters;
use modforge::ModforgeConfig;

use super::MakeCommand;

pub struct ReplayCommand {
    table: String,
}

impl ReplayCommand {
    pub fn new(table: String) -> Self {
        Self { table }
    }

    pub async fn execute(&self) -> Result<()> {
        let config = ModforgeConfig::load().context("Failed to load configuration")?;
        let pending = PendingFilters::load(&config.pending_index_path())
            .context("Failed to load the pending-filter index")?;

        let Some(filter) = pending.get(&self.table).cloned() else {
            println!(
                "{} nothing recorded for table {}",
                style("!").yellow().bold(),
                style(&self.table).yellow()
            );
            return Ok(());
        };

        println!(
            "{} replaying {} for table {}",
            style("Replay").cyan().bold(),
            style(&filter.module).green().bold(),
            style(&self.table).green()
        );

        let make = MakeCommand::new(
            vec![filter.module.clone()],
            csv(&filter.only),
            csv(&filter.except),
            Some(self.table.clone()),
            false,
            false,
        );
        make.execute().await
    }
}

fn csv(names: &[String]) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join(","))
    }
}
