//! Convention-driven module scaffolding.
//!
//! modforge generates the full vertical slice for a domain module —
//! controller, requests, service, datatable, repository, model, policy,
//! routes, and templates — from the database table behind it. The pieces:
//!
//! - [`naming`]: the rewrite graph mapping a fully-qualified name in one
//!   architectural role to its counterpart in another.
//! - [`schema`]: backend-specific introspection normalized into a
//!   [`schema::SchemaDescriptor`] (primary key, timestamp roles, columns).
//! - [`stubs`] and [`generator`]: token-based stub rendering and file
//!   emission, with skip-by-default overwrite safety.
//! - [`pending`]: parked component filters for tables that do not exist
//!   yet, replayed after the table's migration runs.
//! - [`routes`]: the deferred CRUD route registrar with policy-action
//!   inference.

pub mod config;
pub mod error;
pub mod generator;
pub mod module;
pub mod naming;
pub mod pending;
pub mod routes;
pub mod schema;
pub mod stubs;
pub mod testing;

pub use config::ModforgeConfig;
pub use error::ModforgeError;
pub use generator::{GeneratedArtifact, ModuleGenerator, WriteOutcome};
pub use module::{ModuleOptions, ModuleSpec};
