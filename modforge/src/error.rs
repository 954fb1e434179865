//! Error types for the scaffolding engine

use thiserror::Error;

/// Top-level engine error
#[derive(Debug, Error)]
pub enum ModforgeError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Invalid option combination, rejected before any side effect
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The only/except filter left nothing to generate
    #[error("no module component selected")]
    EmptySelection,

    /// Schema introspection error
    #[error(transparent)]
    Schema(#[from] crate::schema::SchemaError),

    /// Route registry error
    #[error(transparent)]
    Routes(#[from] crate::routes::RouteError),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Pending-filter index could not be read or written
    #[error("pending index error: {0}")]
    PendingIndex(#[from] serde_json::Error),
}
