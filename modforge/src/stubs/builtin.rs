//! Builtin stub set
//!
//! Tokens use the `{{name}}` form and are replaced literally, so the stub
//! text never needs escaping. Schema-derived tokens render empty when no
//! table backs the module; blank-line normalization tidies up the gaps.

pub const CONTROLLER: &str = r#"//! HTTP controller for the {{moduleName}} module.
//!
//! Handles the CRUD surface under `{{routePrefix}}`; business logic lives
//! in the module service.

use crate::modules::prelude::*;

pub struct {{moduleName}}Controller {
    service: {{moduleName}}Service,
}

impl {{moduleName}}Controller {
    pub fn new(service: {{moduleName}}Service) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &{{moduleName}}Service {
        &self.service
    }
}
"#;

pub const SAVE_REQUEST: &str = r#"//! Save (create/update) validation for the {{moduleName}} module.

use crate::modules::prelude::*;

pub struct Save{{moduleName}}Request;

impl ValidatesInput for Save{{moduleName}}Request {
    fn rules() -> Vec<(&'static str, &'static str)> {
        vec![
            {{saveRules}}
        ]
    }
}
"#;

pub const DELETE_REQUEST: &str = r#"//! Delete validation for the {{moduleName}} module.

use crate::modules::prelude::*;

pub struct Delete{{moduleName}}Request;

impl ValidatesInput for Delete{{moduleName}}Request {
    fn rules() -> Vec<(&'static str, &'static str)> {
        vec![
            {{deleteRules}}
        ]
    }
}
"#;

pub const SERVICE: &str = r#"//! Business logic for the {{moduleName}} module.

use crate::modules::prelude::*;

pub struct {{moduleName}}Service {
    repository: {{moduleName}}Repository,
}

impl {{moduleName}}Service {
    pub fn new(repository: {{moduleName}}Repository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &{{moduleName}}Repository {
        &self.repository
    }
}
"#;

pub const DATATABLE: &str = r#"//! Tabular listing for the {{moduleName}} module.

use crate::modules::prelude::*;

pub struct {{moduleName}}Datatable {
    repository: {{moduleName}}Repository,
}

impl {{moduleName}}Datatable {
    pub fn new(repository: {{moduleName}}Repository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &{{moduleName}}Repository {
        &self.repository
    }
}
"#;

pub const REPOSITORY: &str = r#"//! Data access for the {{moduleName}} module.

use crate::modules::prelude::*;

pub struct {{moduleName}}Repository;

impl {{moduleName}}Repository {
    pub fn table(&self) -> &'static str {
        {{moduleName}}::TABLE
    }
}
"#;

pub const MODEL: &str = r#"//! {{moduleName}} model backed by the `{{tableName}}` table.

use crate::modules::prelude::*;{{useClasses}}

pub struct {{moduleName}};

impl Entity for {{moduleName}} {
    const TABLE: &'static str = "{{tableName}}";{{primaryKey}}{{keyType}}{{incrementing}}{{timestamps}}{{timestampFields}}

    const FILLABLE: &'static [&'static str] = &[
        {{fillable}}
    ];

    const CASTS: &'static [(&'static str, &'static str)] = &[
        {{casts}}
    ];
}
{{traits}}
"#;

pub const POLICY: &str = r#"//! Authorization policy for the {{moduleName}} module.

use crate::modules::prelude::*;
use {{userModel}};

pub struct {{moduleName}}Policy;

impl {{moduleName}}Policy {
    pub fn view_any(&self, _user: &User) -> bool {
        true
    }

    pub fn view(&self, _user: &User, _record: &{{moduleName}}) -> bool {
        true
    }

    pub fn create(&self, _user: &User) -> bool {
        true
    }

    pub fn update(&self, _user: &User, _record: &{{moduleName}}) -> bool {
        true
    }

    pub fn delete(&self, _user: &User, _record: &{{moduleName}}) -> bool {
        true
    }
}
"#;

pub const ROUTE: &str = r#"//! Route bindings for the {{moduleName}} module.

use modforge::routes::{RouteError, RouteRegistry};

/// Binds the {{moduleName}} CRUD group under `{{routePrefix}}`.
pub fn register(routes: &mut RouteRegistry) -> Result<(), RouteError> {
    routes.crud(
        "{{routePrefix}}",
        "{{moduleNamespace}}::Controllers::{{moduleName}}Controller",
    )?;
    Ok(())
}
"#;

pub const EMAIL: &str = r#"<!-- {{moduleName}} notification email -->
<html>
  <body>
    <h1>{{moduleName}}</h1>
    <p>A {{moduleVar}} record was saved.</p>
  </body>
</html>
"#;

pub const VIEW_LIST: &str = r#"<!-- {{moduleName}} list view -->
<section class="module module-list" data-module="{{moduleVar}}" data-route="{{routePrefix}}">
  <h1>{{moduleName}}</h1>
  <table class="datatable" data-source="/{{routePrefix}}/data" data-columns='{
      {{listColumns}}
  }'>
    <tbody></tbody>
  </table>
</section>
"#;

pub const VIEW_FORM: &str = r#"<!-- {{moduleName}} form view -->
<section class="module module-form" data-module="{{moduleVar}}" data-route="{{routePrefix}}">
  <h1>{{moduleName}}</h1>
  <form method="post" action="/{{routePrefix}}/save" data-fields='{
      {{formColumns}}
  }'>
    <button type="submit">Save</button>
  </form>
</section>
"#;

pub const VIEW_DETAIL: &str = r#"<!-- {{moduleName}} detail view -->
<section class="module module-detail" data-module="{{moduleVar}}" data-route="{{routePrefix}}">
  <h1>{{moduleName}}</h1>
  <dl class="record" data-columns='{
      {{listColumns}}
  }'>
  </dl>
</section>
"#;

pub const MIGRATION: &str = r#"-- Create the `{{tableName}}` table for the {{moduleName}} module.
-- Fill in the columns, then run the migration and replay the module
-- so the generated files pick up the real schema.

CREATE TABLE {{tableName}} (
    id BIGINT PRIMARY KEY,

    created_at TIMESTAMP NULL,
    updated_at TIMESTAMP NULL
);
"#;
