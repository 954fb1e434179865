//! Pending component filters
//!
//! When a module is generated before its table exists, only a migration
//! scaffold is written and the requested component filter is parked here,
//! keyed by table name. Once the table is created the filter is taken back
//! out and generation replays with the original selection. The index lives
//! as a JSON side file next to the generated modules.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModforgeError;
use crate::stubs::StubKind;

/// Component filter recorded for a not-yet-created table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedFilter {
    pub module: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub only: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub except: Vec<String>,
}

impl RecordedFilter {
    /// Parses the recorded component names back into kinds, dropping any
    /// entry that no longer names a known component.
    #[must_use]
    pub fn only_kinds(&self) -> Vec<StubKind> {
        parse_kinds(&self.only)
    }

    #[must_use]
    pub fn except_kinds(&self) -> Vec<StubKind> {
        parse_kinds(&self.except)
    }
}

fn parse_kinds(names: &[String]) -> Vec<StubKind> {
    names.iter().filter_map(|n| n.parse().ok()).collect()
}

/// Table-keyed index of parked filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingFilters {
    filters: HashMap<String, RecordedFilter>,
}

impl PendingFilters {
    /// Loads the index from `path`; a missing file is an empty index.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ModforgeError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Persists the index to `path`, removing the file when empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ModforgeError> {
        if self.filters.is_empty() {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Parks a filter under `table`, replacing any previous entry.
    pub fn record(&mut self, table: &str, filter: RecordedFilter) {
        tracing::debug!(table, module = %filter.module, "recording pending filter");
        self.filters.insert(table.to_string(), filter);
    }

    /// Removes and returns the filter parked under `table`.
    pub fn take(&mut self, table: &str) -> Option<RecordedFilter> {
        self.filters.remove(table)
    }

    #[must_use]
    pub fn get(&self, table: &str) -> Option<&RecordedFilter> {
        self.filters.get(table)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
