//! Stub template store
//!
//! Stubs are keyed by the component role they generate. Each role maps to a
//! single raw template, except the multi-file roles: request validators carry
//! `Save`/`Delete` sub-stubs and presentation templates carry
//! `list`/`form`/`detail` sub-stubs. Stub text is read from an on-disk stub
//! directory when one is configured, falling back to the builtin set.

pub mod builtin;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Component role a stub generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubKind {
    /// HTTP controller
    Controller,
    /// Save/Delete request validators (multi-file)
    Request,
    /// Business-logic unit
    Service,
    /// Tabular listing unit
    Datatable,
    /// Data accessor
    Repository,
    /// Data model
    Model,
    /// Authorization policy
    Policy,
    /// Route bindings
    Route,
    /// Notification email template
    Email,
    /// Presentation templates (multi-file)
    View,
}

impl StubKind {
    /// All roles in generation order
    pub const ALL: [Self; 10] = [
        Self::Controller,
        Self::Request,
        Self::Service,
        Self::Datatable,
        Self::Repository,
        Self::Model,
        Self::Policy,
        Self::Route,
        Self::Email,
        Self::View,
    ];

    /// Output subdirectory inside a module tree
    #[must_use]
    pub const fn output_dir(self) -> &'static str {
        match self {
            Self::Controller => "Controllers",
            Self::Request => "Requests",
            Self::Service => "Services",
            Self::Datatable => "Datatables",
            Self::Repository => "Repositories",
            Self::Model => "Models",
            Self::Policy => "Policies",
            Self::Route => "Routes",
            Self::Email => "Templates/Emails",
            Self::View => "Templates/Views",
        }
    }

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Controller => "Controller",
            Self::Request => "Request",
            Self::Service => "Service",
            Self::Datatable => "Datatable",
            Self::Repository => "Repository",
            Self::Model => "Model",
            Self::Policy => "Policy",
            Self::Route => "Route",
            Self::Email => "Email",
            Self::View => "View",
        }
    }
}

impl fmt::Display for StubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StubKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "controller" => Ok(Self::Controller),
            "request" => Ok(Self::Request),
            "service" => Ok(Self::Service),
            "datatable" => Ok(Self::Datatable),
            "repository" => Ok(Self::Repository),
            "model" => Ok(Self::Model),
            "policy" => Ok(Self::Policy),
            "route" => Ok(Self::Route),
            "email" => Ok(Self::Email),
            "view" => Ok(Self::View),
            unknown => Err(format!(
                "unknown component '{unknown}'; valid components: controller, request, \
                 service, datatable, repository, model, policy, route, email, view"
            )),
        }
    }
}

/// Raw stub text for one role
#[derive(Debug, Clone)]
pub enum StubContent {
    /// One template, one output file
    Single(String),
    /// Named sub-templates, one output file each
    Multi(Vec<(&'static str, String)>),
}

/// Role-keyed stub registry
#[derive(Debug, Clone, Default)]
pub struct StubStore {
    dir: Option<PathBuf>,
}

impl StubStore {
    /// Registry serving only the builtin stubs
    #[must_use]
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Registry preferring stubs from `dir` over the builtin set
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Stub text for a role
    #[must_use]
    pub fn get(&self, kind: StubKind) -> StubContent {
        match kind {
            StubKind::Controller => self.single("controller.stub", builtin::CONTROLLER),
            StubKind::Request => StubContent::Multi(vec![
                ("Save", self.read("requests/save.stub", builtin::SAVE_REQUEST)),
                (
                    "Delete",
                    self.read("requests/delete.stub", builtin::DELETE_REQUEST),
                ),
            ]),
            StubKind::Service => self.single("service.stub", builtin::SERVICE),
            StubKind::Datatable => self.single("datatable.stub", builtin::DATATABLE),
            StubKind::Repository => self.single("repository.stub", builtin::REPOSITORY),
            StubKind::Model => self.single("model.stub", builtin::MODEL),
            StubKind::Policy => self.single("policy.stub", builtin::POLICY),
            StubKind::Route => self.single("route.stub", builtin::ROUTE),
            StubKind::Email => self.single("email.stub", builtin::EMAIL),
            StubKind::View => StubContent::Multi(vec![
                ("list", self.read("views/list.stub", builtin::VIEW_LIST)),
                ("form", self.read("views/form.stub", builtin::VIEW_FORM)),
                ("detail", self.read("views/detail.stub", builtin::VIEW_DETAIL)),
            ]),
        }
    }

    /// Migration scaffold stub
    #[must_use]
    pub fn migration(&self) -> String {
        self.read("migration.stub", builtin::MIGRATION)
    }

    fn single(&self, file: &str, fallback: &str) -> StubContent {
        StubContent::Single(self.read(file, fallback))
    }

    fn read(&self, file: &str, fallback: &str) -> String {
        self.dir
            .as_deref()
            .map(|dir| dir.join(file))
            .filter(|path| path.is_file())
            .and_then(|path| read_stub(&path))
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn read_stub(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "unreadable stub override, using builtin");
            None
        }
    }
}
