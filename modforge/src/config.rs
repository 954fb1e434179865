//! Configuration for the scaffolding engine
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MODFORGE_` prefix)
//! 2. `./modforge.toml` (project config)
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # modforge.toml
//! modules_path = "src/modules"
//! root_namespace = "App::Modules"
//! user_model = "App::Models::User"
//! stub_dir = "stubs"
//! database_url = "mysql://root@localhost/app"
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ModforgeError;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModforgeConfig {
    /// Directory that generated module trees are written under
    pub modules_path: String,

    /// Namespace prefix every generated module lives in
    pub root_namespace: String,

    /// Fully-qualified name of the authenticatable entity used by policies
    pub user_model: String,

    /// Optional on-disk stub directory overriding the builtin stubs
    pub stub_dir: Option<PathBuf>,

    /// Database connection URL for schema introspection
    pub database_url: Option<String>,
}

impl Default for ModforgeConfig {
    fn default() -> Self {
        Self {
            modules_path: "src/modules".to_string(),
            root_namespace: "App::Modules".to_string(),
            user_model: "App::Models::User".to_string(),
            stub_dir: None,
            database_url: None,
        }
    }
}

impl ModforgeConfig {
    /// Load configuration from `modforge.toml` and `MODFORGE_` env vars
    ///
    /// # Errors
    ///
    /// Returns an error if the config file or environment contains values
    /// that cannot be deserialized into the expected shape.
    pub fn load() -> Result<Self, ModforgeError> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("modforge.toml"))
            .merge(Env::prefixed("MODFORGE_"))
            .extract()?)
    }

    /// Path of the pending-filter index under the modules directory
    #[must_use]
    pub fn pending_index_path(&self) -> PathBuf {
        PathBuf::from(&self.modules_path).join(".pending.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conventional() {
        let config = ModforgeConfig::default();
        assert_eq!(config.modules_path, "src/modules");
        assert_eq!(config.root_namespace, "App::Modules");
        assert_eq!(config.user_model, "App::Models::User");
        assert!(config.stub_dir.is_none());
    }

    #[test]
    fn pending_index_lives_under_modules_path() {
        let config = ModforgeConfig::default();
        assert_eq!(
            config.pending_index_path(),
            PathBuf::from("src/modules/.pending.json")
        );
    }
}
