//! Test support
//!
//! An in-memory [`SchemaBackend`] so generation and introspection can be
//! exercised without a live database.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::schema::{RawColumn, SchemaBackend, SchemaError};

/// In-memory schema backend backed by fixture tables
#[derive(Debug, Default, Clone)]
pub struct FixtureBackend {
    tables: HashMap<String, Vec<RawColumn>>,
}

impl FixtureBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixture table
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, columns: Vec<RawColumn>) -> Self {
        self.tables.insert(name.into(), columns);
        self
    }
}

#[async_trait]
impl SchemaBackend for FixtureBackend {
    async fn has_table(&self, table: &str) -> Result<bool, SchemaError> {
        Ok(self.tables.contains_key(table))
    }

    async fn raw_columns(&self, table: &str) -> Result<Vec<RawColumn>, SchemaError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| SchemaError::TableNotFound {
                table: table.to_string(),
            })
    }
}
