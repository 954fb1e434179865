//! Module file generation
//!
//! Renders the selected stubs for a module into concrete artifacts and
//! writes them under the configured modules path. Existing files are
//! preserved unless the module was requested with `force`; skipping is the
//! default safety policy, not an error.

pub mod placeholders;

pub use placeholders::{render, replacements};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::ModforgeConfig;
use crate::error::ModforgeError;
use crate::module::ModuleSpec;
use crate::schema::SchemaDescriptor;
use crate::stubs::{StubContent, StubKind, StubStore};

/// One rendered output file, not yet on disk
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Path relative to the project root
    pub path: PathBuf,
    pub content: String,
    /// Human-readable label for console output
    pub description: String,
}

/// Result of writing a single artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// File already existed and `force` was not set
    Skipped,
}

/// Renders and writes the artifacts for one module.
pub struct ModuleGenerator<'a> {
    spec: &'a ModuleSpec,
    schema: Option<&'a SchemaDescriptor>,
    stubs: &'a StubStore,
    config: &'a ModforgeConfig,
}

impl<'a> ModuleGenerator<'a> {
    #[must_use]
    pub fn new(
        spec: &'a ModuleSpec,
        schema: Option<&'a SchemaDescriptor>,
        stubs: &'a StubStore,
        config: &'a ModforgeConfig,
    ) -> Self {
        Self {
            spec,
            schema,
            stubs,
            config,
        }
    }

    /// Renders every artifact for the module's selected components.
    ///
    /// # Errors
    ///
    /// Returns [`ModforgeError::EmptySelection`] when the component filters
    /// leave nothing to generate.
    pub fn render_all(&self) -> Result<Vec<GeneratedArtifact>, ModforgeError> {
        let kinds = self.spec.selected_kinds();
        if kinds.is_empty() {
            return Err(ModforgeError::EmptySelection);
        }

        let map = placeholders::replacements(self.spec, self.schema, self.config);
        let mut artifacts = Vec::new();
        for kind in kinds {
            match self.stubs.get(kind) {
                StubContent::Single(text) => {
                    artifacts.push(self.artifact(kind, None, &render(&text, &map)));
                }
                StubContent::Multi(subs) => {
                    for (sub, text) in subs {
                        artifacts.push(self.artifact(kind, Some(sub), &render(&text, &map)));
                    }
                }
            }
        }
        tracing::debug!(module = %self.spec.name, files = artifacts.len(), "rendered module");
        Ok(artifacts)
    }

    /// Renders the timestamped migration scaffold for the module's table.
    #[must_use]
    pub fn render_migration(&self) -> GeneratedArtifact {
        let map = placeholders::replacements(self.spec, self.schema, self.config);
        let stamp = Local::now().format("%Y_%m_%d_%H%M%S");
        let file = format!("{stamp}_create_{}_table.sql", self.spec.table);
        GeneratedArtifact {
            path: Path::new("migrations").join(&file),
            content: render(&self.stubs.migration(), &map),
            description: format!("Migration: migrations/{file}"),
        }
    }

    /// Writes one artifact under `root`, creating directories on demand.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory or the file itself cannot be
    /// created.
    pub fn write(
        &self,
        root: &Path,
        artifact: &GeneratedArtifact,
    ) -> Result<WriteOutcome, ModforgeError> {
        let target = root.join(&artifact.path);
        if target.exists() && !self.spec.force {
            tracing::debug!(path = %target.display(), "exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &artifact.content)?;
        Ok(WriteOutcome::Written)
    }

    fn artifact(&self, kind: StubKind, sub: Option<&str>, content: &str) -> GeneratedArtifact {
        let file = file_name(kind, sub, &self.spec.name);
        let path = Path::new(&self.config.modules_path)
            .join(&self.spec.path)
            .join(kind.output_dir())
            .join(&file);
        GeneratedArtifact {
            path,
            content: content.to_string(),
            description: format!("{kind}: {}/{file}", kind.output_dir()),
        }
    }
}

fn file_name(kind: StubKind, sub: Option<&str>, module: &str) -> String {
    match kind {
        StubKind::Model => format!("{module}.rs"),
        StubKind::Request => format!("{}{module}Request.rs", sub.unwrap_or_default()),
        StubKind::View => format!("{}.html", sub.unwrap_or_default()),
        StubKind::Email => format!("{module}Email.html"),
        _ => format!("{module}{kind}.rs"),
    }
}
