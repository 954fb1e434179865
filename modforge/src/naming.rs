//! Naming convention resolver
//!
//! Maps a fully-qualified name in one architectural role to its counterpart
//! in another role. Names are `::`-separated module paths, e.g.
//! `App::Modules::Post::Controllers::PostController`.
//!
//! The graph is an explicit table of rewrite rules rather than runtime
//! reflection: each edge is an ordered list of (search, replace) pairs applied
//! as sequential literal substring replacement, plus an optional suffix.
//! Pair order inside an edge is significant — a namespace-qualified segment
//! must be rewritten before its bare form.

use std::fmt;

/// Architectural role a fully-qualified name can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// HTTP controller
    Controller,
    /// Data model
    Model,
    /// Business-logic unit
    Service,
    /// Data accessor
    Repository,
    /// Authorization policy
    Policy,
    /// Save (create/update) request validator
    SaveRequest,
    /// Delete request validator
    DeleteRequest,
    /// Tabular listing unit
    Datatable,
    /// Presentation template path
    View,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Controller => "controller",
            Self::Model => "model",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Policy => "policy",
            Self::SaveRequest => "saveRequest",
            Self::DeleteRequest => "deleteRequest",
            Self::Datatable => "datatable",
            Self::View => "view",
        };
        write!(f, "{name}")
    }
}

/// One rewrite edge of the naming graph
struct Edge {
    pairs: Vec<(String, String)>,
    suffix: Option<&'static str>,
}

impl Edge {
    fn of(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
                .collect(),
            suffix: None,
        }
    }

    fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = Some(suffix);
        self
    }

    fn apply(&self, name: &str) -> String {
        let mut out = name.to_string();
        for (search, replace) in &self.pairs {
            out = out.replace(search.as_str(), replace);
        }
        if let Some(suffix) = self.suffix {
            out.push_str(suffix);
        }
        out
    }
}

/// Static rewrite-rule table mapping role pairs to name transformations
///
/// # Examples
///
/// ```
/// use modforge::naming::{NamingGraph, Role};
///
/// let graph = NamingGraph::new("App::Modules");
/// let model = graph.resolve(
///     Role::Controller,
///     Role::Model,
///     "App::Modules::Post::Controllers::PostController",
/// );
/// assert_eq!(model.as_deref(), Some("App::Modules::Post::Models::Post"));
/// ```
#[derive(Debug, Clone)]
pub struct NamingGraph {
    module_root: String,
}

impl NamingGraph {
    /// Create a graph rooted at the configured module namespace
    #[must_use]
    pub fn new(module_root: impl Into<String>) -> Self {
        Self {
            module_root: module_root.into(),
        }
    }

    /// Resolve `name` from `source` role to `target` role
    ///
    /// Returns `None` when no edge exists for the role pair. Callers must
    /// treat that as "capability absent", never as fatal.
    #[must_use]
    pub fn resolve(&self, source: Role, target: Role, name: &str) -> Option<String> {
        self.edge(source, target, name).map(|edge| edge.apply(name))
    }

    /// Last `::` segment of a fully-qualified name
    #[must_use]
    pub fn basename(name: &str) -> &str {
        name.rsplit("::").next().unwrap_or(name)
    }

    fn edge(&self, source: Role, target: Role, name: &str) -> Option<Edge> {
        use Role::{
            Controller, Datatable, DeleteRequest, Model, Policy, Repository, SaveRequest,
            Service, View,
        };

        let edge = match (source, target) {
            (Controller, Model) => Edge::of(&[("Controllers", "Models"), ("Controller", "")]),
            (Controller, Policy) => {
                Edge::of(&[("Controllers", "Policies"), ("Controller", "Policy")])
            }
            (Controller, Service) => {
                Edge::of(&[("Controllers", "Services"), ("Controller", "Service")])
            }
            (Controller, Repository) => {
                Edge::of(&[("Controllers", "Repositories"), ("Controller", "Repository")])
            }
            (Controller, SaveRequest) => Edge::of(&[
                ("Controllers::", "Requests::Save"),
                ("Controller", "Request"),
            ]),
            (Controller, DeleteRequest) => Edge::of(&[
                ("Controllers::", "Requests::Delete"),
                ("Controller", "Request"),
            ]),
            (Controller, View) => {
                let root = format!("{}::", self.module_root);
                let own = format!("::Controllers::{}", Self::basename(name));
                Edge {
                    pairs: vec![
                        (root, String::new()),
                        (own, String::new()),
                        ("::".to_string(), ".".to_string()),
                    ],
                    suffix: None,
                }
            }
            (Repository, Model) => Edge::of(&[("Repositories", "Models"), ("Repository", "")]),
            (Service, Repository) => {
                Edge::of(&[("Services", "Repositories"), ("Service", "Repository")])
            }
            (Service, Datatable) => {
                Edge::of(&[("Services", "Datatables"), ("Service", "Datatable")])
            }
            (Model, Policy) => Edge::of(&[("Models", "Policies")]).with_suffix("Policy"),
            (Policy, Model) => Edge::of(&[("Policies", "Models"), ("Policy", "")]),
            _ => return None,
        };

        Some(edge)
    }
}
