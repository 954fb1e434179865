//! Module specification
//!
//! One [`ModuleSpec`] is built per requested module and stays immutable for
//! the whole generation run. The module argument may be slash-nested
//! (`admin/post`); each segment is normalized to studly case.

use inflector::Inflector;

use crate::config::ModforgeConfig;
use crate::stubs::StubKind;

/// Options shared by a generation run
#[derive(Debug, Clone, Default)]
pub struct ModuleOptions {
    /// Generate only these components
    pub only: Vec<StubKind>,
    /// Skip these components
    pub except: Vec<StubKind>,
    /// Explicit table name override
    pub table: Option<String>,
    /// Overwrite existing files
    pub force: bool,
}

/// Everything the generator needs to know about one module
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    /// Module name, e.g. `Post`
    pub name: String,
    /// Filesystem path relative to the modules directory, e.g. `Admin/Post`
    pub path: String,
    /// Fully-qualified namespace, e.g. `App::Modules::Admin::Post`
    pub namespace: String,
    /// URI prefix for the module's routes, e.g. `admin/post`
    pub route_prefix: String,
    /// Target table name (override or pluralized module name)
    pub table: String,
    /// Role inclusion filter
    pub only: Vec<StubKind>,
    /// Role exclusion filter
    pub except: Vec<StubKind>,
    /// Overwrite flag
    pub force: bool,
}

impl ModuleSpec {
    /// Build a spec from a module argument and run options
    #[must_use]
    pub fn new(module: &str, options: ModuleOptions, config: &ModforgeConfig) -> Self {
        let segments: Vec<String> = module
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| ucfirst(&s.to_lowercase()))
            .collect();

        let name = segments.last().cloned().unwrap_or_default();
        let path = segments.join("/");
        let namespace = format!("{}::{}", config.root_namespace, segments.join("::"));
        let route_prefix = path.to_lowercase();
        let table = options
            .table
            .unwrap_or_else(|| name.to_lowercase().to_plural());

        Self {
            name,
            path,
            namespace,
            route_prefix,
            table,
            only: options.only,
            except: options.except,
            force: options.force,
        }
    }

    /// Fully-qualified controller name for this module
    #[must_use]
    pub fn controller(&self) -> String {
        format!("{}::Controllers::{}Controller", self.namespace, self.name)
    }

    /// Components selected after applying the only/except filters, in
    /// catalog order
    #[must_use]
    pub fn selected_kinds(&self) -> Vec<StubKind> {
        StubKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.except.is_empty() || !self.except.contains(kind))
            .filter(|kind| self.only.is_empty() || self.only.contains(kind))
            .collect()
    }
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(module: &str, options: ModuleOptions) -> ModuleSpec {
        ModuleSpec::new(module, options, &ModforgeConfig::default())
    }

    #[test]
    fn nested_module_is_normalized() {
        let spec = spec("admin/post", ModuleOptions::default());
        assert_eq!(spec.name, "Post");
        assert_eq!(spec.path, "Admin/Post");
        assert_eq!(spec.namespace, "App::Modules::Admin::Post");
        assert_eq!(spec.route_prefix, "admin/post");
        assert_eq!(spec.table, "posts");
    }

    #[test]
    fn casing_is_forgiving() {
        let spec = spec("ADMIN/pOST", ModuleOptions::default());
        assert_eq!(spec.path, "Admin/Post");
    }

    #[test]
    fn table_override_wins() {
        let spec = spec(
            "post",
            ModuleOptions {
                table: Some("legacy_posts".to_string()),
                ..ModuleOptions::default()
            },
        );
        assert_eq!(spec.table, "legacy_posts");
    }

    #[test]
    fn controller_name_is_conventional() {
        let spec = spec("admin/post", ModuleOptions::default());
        assert_eq!(
            spec.controller(),
            "App::Modules::Admin::Post::Controllers::PostController"
        );
    }

    #[test]
    fn only_filter_restricts_selection() {
        let spec = spec(
            "post",
            ModuleOptions {
                only: vec![StubKind::Controller, StubKind::Model],
                ..ModuleOptions::default()
            },
        );
        assert_eq!(
            spec.selected_kinds(),
            vec![StubKind::Controller, StubKind::Model]
        );
    }

    #[test]
    fn except_filter_removes_components() {
        let spec = spec(
            "post",
            ModuleOptions {
                except: vec![StubKind::Datatable, StubKind::Email],
                ..ModuleOptions::default()
            },
        );
        let kinds = spec.selected_kinds();
        assert!(!kinds.contains(&StubKind::Datatable));
        assert!(!kinds.contains(&StubKind::Email));
        assert_eq!(kinds.len(), StubKind::ALL.len() - 2);
    }

    #[test]
    fn disjoint_filters_yield_empty_selection() {
        let spec = spec(
            "post",
            ModuleOptions {
                only: vec![StubKind::Policy],
                except: vec![StubKind::Policy],
                ..ModuleOptions::default()
            },
        );
        assert!(spec.selected_kinds().is_empty());
    }
}
