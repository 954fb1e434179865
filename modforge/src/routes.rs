//! Deferred CRUD route registration
//!
//! A route group is declared against a controller, optionally narrowed with
//! inclusion/exclusion filters, then registered. The lifecycle is an
//! explicit state machine: a group is `Pending` on declaration, becomes
//! `Configured` when a filter is applied, and is `Registered` exactly once,
//! when its declaring handle is dropped at the end of the declaring
//! statement or at the [`RouteRegistry::finalize`] barrier, whichever comes
//! first. Re-entry is a no-op.
//!
//! The registry is an explicit object handed through the route-declaration
//! phase, scoped to one boot, rather than process-global state.

use std::fmt;
use std::str::FromStr;

use http::Method;
use thiserror::Error;

use crate::naming::{NamingGraph, Role};

/// Route-declaration failure
#[derive(Debug, Error)]
pub enum RouteError {
    /// A CRUD group was already declared under this prefix
    #[error("route group '{prefix}' is already declared")]
    DuplicateGroup { prefix: String },
}

/// One of the six conventional CRUD routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRole {
    List,
    Data,
    Form,
    Detail,
    Save,
    Delete,
}

impl RouteRole {
    /// Full catalog, in registration order
    pub const ALL: [Self; 6] = [
        Self::List,
        Self::Data,
        Self::Form,
        Self::Detail,
        Self::Save,
        Self::Delete,
    ];

    /// Action keyword, used in route names and URI segments
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Data => "data",
            Self::Form => "form",
            Self::Detail => "detail",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }

    const fn method(self) -> Method {
        match self {
            Self::List | Self::Data | Self::Form | Self::Detail => Method::GET,
            Self::Save => Method::POST,
            Self::Delete => Method::DELETE,
        }
    }

    fn uri(self, prefix: &str, key: &str) -> String {
        match self {
            Self::List => prefix.to_string(),
            Self::Form => format!("{prefix}/form/{{{key}?}}"),
            Self::Detail => format!("{prefix}/detail/{{{key}}}"),
            Self::Data | Self::Save | Self::Delete => {
                format!("{prefix}/{}", self.keyword())
            }
        }
    }
}

impl fmt::Display for RouteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for RouteRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "data" => Ok(Self::Data),
            "form" => Ok(Self::Form),
            "detail" => Ok(Self::Detail),
            "save" => Ok(Self::Save),
            "delete" => Ok(Self::Delete),
            unknown => Err(format!(
                "unknown route '{unknown}'; valid routes: list, data, form, detail, save, delete"
            )),
        }
    }
}

/// Request-shaped input for default policy-action inference.
///
/// Inference compares each route's action keyword against the last URI
/// segment of the request being served when the group registers; outside a
/// request (route caching, tests) there is no segment and the comparison is
/// simply false.
#[derive(Debug, Clone, Default)]
pub struct PolicyContext {
    pub last_segment: Option<String>,
}

impl PolicyContext {
    #[must_use]
    pub fn for_segment(segment: impl Into<String>) -> Self {
        Self {
            last_segment: Some(segment.into()),
        }
    }

    fn matches(&self, role: RouteRole) -> bool {
        self.last_segment.as_deref() == Some(role.keyword())
    }
}

/// Authorization check attached to a registered route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCheck {
    /// Policy action name, inferred or explicitly overridden
    pub action: String,
    /// Fully-qualified model name the action is checked against
    pub model: String,
}

/// A route emitted by a registered group
#[derive(Debug, Clone)]
pub struct RegisteredRoute {
    /// Dotted name, `<prefix>.<action>`
    pub name: String,
    pub method: Method,
    pub uri: String,
    pub role: RouteRole,
    /// Fully-qualified controller handling the route
    pub controller: String,
    pub policy: Option<PolicyCheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    Pending,
    Configured,
    Registered,
}

#[derive(Debug)]
struct RouteGroup {
    prefix: String,
    controller: String,
    model: Option<String>,
    key: String,
    only: Option<Vec<RouteRole>>,
    except: Option<Vec<RouteRole>>,
    overrides: Vec<(RouteRole, String)>,
    state: GroupState,
}

impl RouteGroup {
    fn effective_roles(&self) -> Vec<RouteRole> {
        RouteRole::ALL
            .into_iter()
            .filter(|role| self.only.as_ref().map_or(true, |only| only.contains(role)))
            .filter(|role| {
                self.except
                    .as_ref()
                    .map_or(true, |except| !except.contains(role))
            })
            .collect()
    }

    fn action_for(&self, role: RouteRole, context: &PolicyContext) -> String {
        if let Some((_, action)) = self.overrides.iter().find(|(r, _)| *r == role) {
            return action.clone();
        }
        let matched = context.matches(role);
        let action = match role {
            RouteRole::List | RouteRole::Data | RouteRole::Detail => {
                if matched {
                    "view"
                } else {
                    "viewAny"
                }
            }
            RouteRole::Form | RouteRole::Save => {
                if matched {
                    "create"
                } else {
                    "update"
                }
            }
            RouteRole::Delete => "delete",
        };
        action.to_string()
    }
}

/// Boot-scoped CRUD route registry
#[derive(Debug)]
pub struct RouteRegistry {
    graph: NamingGraph,
    context: PolicyContext,
    groups: Vec<RouteGroup>,
    registered: Vec<RegisteredRoute>,
}

impl RouteRegistry {
    #[must_use]
    pub fn new(root_namespace: impl Into<String>, context: PolicyContext) -> Self {
        Self {
            graph: NamingGraph::new(root_namespace),
            context,
            groups: Vec::new(),
            registered: Vec::new(),
        }
    }

    /// Declares a CRUD group under `prefix` with the conventional `id` key.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateGroup`] when the prefix is already
    /// taken.
    pub fn crud(
        &mut self,
        prefix: impl Into<String>,
        controller: impl Into<String>,
    ) -> Result<CrudGroup<'_>, RouteError> {
        self.crud_with_key(prefix, controller, "id")
    }

    /// Declares a CRUD group whose parameterized routes use `key` as the
    /// primary-key segment name.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicateGroup`] when the prefix is already
    /// taken.
    pub fn crud_with_key(
        &mut self,
        prefix: impl Into<String>,
        controller: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<CrudGroup<'_>, RouteError> {
        let prefix = prefix.into();
        if self.groups.iter().any(|g| g.prefix == prefix) {
            return Err(RouteError::DuplicateGroup { prefix });
        }
        let controller = controller.into();
        let model = self.graph.resolve(Role::Controller, Role::Model, &controller);
        self.groups.push(RouteGroup {
            prefix,
            controller,
            model,
            key: key.into(),
            only: None,
            except: None,
            overrides: Vec::new(),
            state: GroupState::Pending,
        });
        let index = self.groups.len() - 1;
        Ok(CrudGroup {
            registry: self,
            index,
        })
    }

    /// End-of-route-loading barrier: registers any group whose declaring
    /// handle is still alive somewhere, then leaves the registry read-only
    /// in practice. Safe to call more than once.
    pub fn finalize(&mut self) {
        for index in 0..self.groups.len() {
            self.register(index);
        }
    }

    /// Routes registered so far, in declaration then catalog order
    #[must_use]
    pub fn routes(&self) -> &[RegisteredRoute] {
        &self.registered
    }

    fn register(&mut self, index: usize) {
        if self.groups[index].state == GroupState::Registered {
            return;
        }
        self.groups[index].state = GroupState::Registered;

        let group = &self.groups[index];
        let dotted = group.prefix.replace('/', ".");
        let mut emitted = Vec::new();
        for role in group.effective_roles() {
            let policy = group.model.as_ref().map(|model| PolicyCheck {
                action: group.action_for(role, &self.context),
                model: model.clone(),
            });
            emitted.push(RegisteredRoute {
                name: format!("{dotted}.{}", role.keyword()),
                method: role.method(),
                uri: role.uri(&group.prefix, &group.key),
                role,
                controller: group.controller.clone(),
                policy,
            });
        }
        tracing::debug!(prefix = %group.prefix, routes = emitted.len(), "registered route group");
        self.registered.extend(emitted);
    }
}

/// Declaring handle for one CRUD group.
///
/// Filters move the group to `Configured`; dropping the handle registers
/// it. Registration at drop rather than per filter call lets inclusion,
/// exclusion, and policy overrides compose within one declaring statement.
pub struct CrudGroup<'a> {
    registry: &'a mut RouteRegistry,
    index: usize,
}

impl CrudGroup<'_> {
    /// Restricts the group to the given routes.
    pub fn only(self, roles: &[RouteRole]) -> Self {
        let group = &mut self.registry.groups[self.index];
        group.only = Some(roles.to_vec());
        group.state = GroupState::Configured;
        self
    }

    /// Removes the given routes from the group.
    pub fn except(self, roles: &[RouteRole]) -> Self {
        let group = &mut self.registry.groups[self.index];
        group.except = Some(roles.to_vec());
        group.state = GroupState::Configured;
        self
    }

    /// Overrides the inferred policy action for specific routes.
    pub fn policy(self, overrides: &[(RouteRole, &str)]) -> Self {
        let group = &mut self.registry.groups[self.index];
        group
            .overrides
            .extend(overrides.iter().map(|(role, action)| (*role, (*action).to_string())));
        group.state = GroupState::Configured;
        self
    }
}

impl Drop for CrudGroup<'_> {
    fn drop(&mut self) {
        self.registry.register(self.index);
    }
}
