//! Placeholder derivation and stub rendering
//!
//! All stub tokens are derived here, in one place, so the token contract
//! between stubs and the rest of the crate is easy to audit. Tokens with no
//! schema behind them render empty; [`render`] then erases the blank lines
//! they leave behind.

use inflector::Inflector;

use crate::config::ModforgeConfig;
use crate::module::ModuleSpec;
use crate::schema::{KeyType, SchemaDescriptor};

/// Builds the full token table for one module.
#[must_use]
pub fn replacements(
    spec: &ModuleSpec,
    schema: Option<&SchemaDescriptor>,
    config: &ModforgeConfig,
) -> Vec<(&'static str, String)> {
    let table = schema.map_or_else(|| spec.table.clone(), |s| s.table.clone());
    vec![
        ("modulePath", spec.path.clone()),
        ("moduleName", spec.name.clone()),
        ("moduleVar", spec.name.to_camel_case()),
        ("moduleNamespace", spec.namespace.clone()),
        ("routePrefix", spec.route_prefix.clone()),
        ("tableName", table),
        ("useClasses", use_classes(schema)),
        ("traits", traits(spec, schema)),
        ("primaryKey", primary_key_override(schema)),
        ("keyType", key_type_override(schema)),
        ("incrementing", incrementing_override(schema)),
        ("timestamps", timestamps_override(schema)),
        ("timestampFields", timestamp_field_overrides(schema)),
        ("fillable", fillable(schema)),
        ("casts", casts(schema)),
        ("listColumns", view_columns(schema, ",\n      ")),
        ("formColumns", view_columns(schema, ",\n      ")),
        ("saveRules", save_rules(schema)),
        ("deleteRules", delete_rules(schema)),
        ("userModel", user_model(&config.user_model)),
    ]
}

/// Replaces `{{token}}` occurrences literally, then normalizes blank lines:
/// whitespace-only lines are erased, runs of blanks collapse to one, and the
/// result carries exactly one trailing newline.
#[must_use]
pub fn render(stub: &str, replacements: &[(&'static str, String)]) -> String {
    let mut text = stub.to_string();
    for (token, value) in replacements {
        text = text.replace(&format!("{{{{{token}}}}}"), value);
    }
    normalize(&text)
}

fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            pending_blank = true;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        out.push_str(line);
        pending_blank = false;
    }
    out.push('\n');
    out
}

fn use_classes(schema: Option<&SchemaDescriptor>) -> String {
    let mut lines = String::new();
    if let Some(schema) = schema {
        if schema.timestamps.has_soft_deletes() {
            lines.push_str("\nuse crate::modules::markers::SoftDeletes;");
        }
        if schema.primary_key.key_type == KeyType::Str {
            lines.push_str("\nuse crate::modules::markers::UuidKey;");
        }
    }
    lines
}

fn traits(spec: &ModuleSpec, schema: Option<&SchemaDescriptor>) -> String {
    let mut impls = String::new();
    if let Some(schema) = schema {
        if schema.timestamps.has_soft_deletes() {
            impls.push_str(&format!("\nimpl SoftDeletes for {} {{}}", spec.name));
        }
        if schema.primary_key.key_type == KeyType::Str {
            impls.push_str(&format!("\nimpl UuidKey for {} {{}}", spec.name));
        }
    }
    impls
}

// Convention overrides render only when the schema deviates from the
// defaults (`id`, int key, autoincrement, standard timestamp names), so a
// conventional table yields a model with no override lines at all.

fn primary_key_override(schema: Option<&SchemaDescriptor>) -> String {
    schema
        .filter(|s| s.primary_key.name != "id")
        .map_or_else(String::new, |s| {
            format!(
                "\n    const PRIMARY_KEY: &'static str = \"{}\";",
                s.primary_key.name
            )
        })
}

fn key_type_override(schema: Option<&SchemaDescriptor>) -> String {
    schema
        .filter(|s| s.primary_key.key_type == KeyType::Str)
        .map_or_else(String::new, |_| {
            "\n    const KEY_TYPE: &'static str = \"string\";".to_string()
        })
}

fn incrementing_override(schema: Option<&SchemaDescriptor>) -> String {
    schema
        .filter(|s| !s.primary_key.incrementing)
        .map_or_else(String::new, |_| {
            "\n    const INCREMENTING: bool = false;".to_string()
        })
}

fn timestamps_override(schema: Option<&SchemaDescriptor>) -> String {
    schema
        .filter(|s| !s.timestamps.has_timestamps())
        .map_or_else(String::new, |_| {
            "\n    const TIMESTAMPS: bool = false;".to_string()
        })
}

fn timestamp_field_overrides(schema: Option<&SchemaDescriptor>) -> String {
    let Some(schema) = schema else {
        return String::new();
    };
    if !schema.timestamps.has_timestamps() {
        return String::new();
    }
    let mut lines = String::new();
    push_field_override(&mut lines, "CREATED_AT", schema.timestamps.created.as_deref(), "created_at");
    push_field_override(&mut lines, "UPDATED_AT", schema.timestamps.updated.as_deref(), "updated_at");
    if let Some(deleted) = schema.timestamps.deleted.as_deref() {
        if deleted != "deleted_at" {
            lines.push_str(&format!(
                "\n    const DELETED_AT: Option<&'static str> = Some(\"{deleted}\");"
            ));
        }
    }
    lines
}

fn push_field_override(lines: &mut String, name: &str, column: Option<&str>, conventional: &str) {
    match column {
        Some(col) if col == conventional => {}
        Some(col) => lines.push_str(&format!(
            "\n    const {name}: Option<&'static str> = Some(\"{col}\");"
        )),
        None => lines.push_str(&format!("\n    const {name}: Option<&'static str> = None;")),
    }
}

fn fillable(schema: Option<&SchemaDescriptor>) -> String {
    schema.map_or_else(String::new, |s| {
        s.fillable()
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(",\n        ")
    })
}

fn casts(schema: Option<&SchemaDescriptor>) -> String {
    schema.map_or_else(String::new, |s| {
        s.columns
            .iter()
            .map(|col| format!("(\"{}\", \"{}\")", col.name, col.cast_token()))
            .collect::<Vec<_>>()
            .join(",\n        ")
    })
}

fn view_columns(schema: Option<&SchemaDescriptor>, separator: &str) -> String {
    schema.map_or_else(String::new, |s| {
        s.columns
            .iter()
            .map(|col| format!("\"{}\": \"{}\"", col.name, col.name.to_title_case()))
            .collect::<Vec<_>>()
            .join(separator)
    })
}

fn save_rules(schema: Option<&SchemaDescriptor>) -> String {
    let Some(schema) = schema else {
        return String::new();
    };
    let pk = &schema.primary_key;
    let mut rules = vec![format!(
        "(\"{}\", \"nullable|exists:{},{}\")",
        pk.name, schema.table, pk.name
    )];
    for col in &schema.columns {
        let mut rule = if col.nullable {
            String::from("nullable")
        } else {
            String::from("required")
        };
        if col.category.is_numeric() {
            rule.push_str("|numeric");
        }
        if col.category.is_date() {
            rule.push_str("|date");
        }
        if let Some(max) = col.max_length {
            rule.push_str(&format!("|max:{max}"));
        }
        if let Some(values) = &col.enum_values {
            rule.push_str(&format!("|in:{}", values.join(",")));
        }
        rules.push(format!("(\"{}\", \"{rule}\")", col.name));
    }
    rules.join(",\n            ")
}

fn delete_rules(schema: Option<&SchemaDescriptor>) -> String {
    let Some(schema) = schema else {
        return String::new();
    };
    let pk = &schema.primary_key;
    [
        format!("(\"{}\", \"required|array\")", pk.name),
        format!(
            "(\"{}.*\", \"{}|exists:{},{}\")",
            pk.name,
            pk.key_type.rule_token(),
            schema.table,
            pk.name
        ),
    ]
    .join(",\n            ")
}

fn user_model(configured: &str) -> String {
    if configured.ends_with("User") {
        configured.to_string()
    } else {
        format!("{configured} as User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleOptions;
    use crate::schema::RawColumn;

    fn posts_schema() -> SchemaDescriptor {
        SchemaDescriptor::from_raw(
            "posts",
            &[
                RawColumn::new("id", "bigint").primary().auto_increment(),
                RawColumn::new("title", "varchar").max_length(255),
                RawColumn::new("status", "enum").column_type("enum('draft','published')"),
                RawColumn::new("created_at", "datetime").nullable(),
                RawColumn::new("updated_at", "datetime").nullable(),
            ],
        )
    }

    fn posts_spec() -> ModuleSpec {
        ModuleSpec::new("post", ModuleOptions::default(), &ModforgeConfig::default())
    }

    fn token<'a>(map: &'a [(&'static str, String)], name: &str) -> &'a str {
        &map.iter().find(|(t, _)| *t == name).unwrap().1
    }

    #[test]
    fn save_rules_match_column_shapes() {
        let schema = posts_schema();
        let map = replacements(&posts_spec(), Some(&schema), &ModforgeConfig::default());

        let rules = token(&map, "saveRules");
        assert!(rules.contains("(\"id\", \"nullable|exists:posts,id\")"));
        assert!(rules.contains("(\"title\", \"required|max:255\")"));
        assert!(rules.contains("(\"status\", \"required|in:draft,published\")"));
    }

    #[test]
    fn delete_rules_follow_the_key_type() {
        let schema = posts_schema();
        let map = replacements(&posts_spec(), Some(&schema), &ModforgeConfig::default());
        let rules = token(&map, "deleteRules");
        assert!(rules.contains("(\"id\", \"required|array\")"));
        assert!(rules.contains("(\"id.*\", \"integer|exists:posts,id\")"));

        let uuid = SchemaDescriptor::from_raw(
            "tickets",
            &[
                RawColumn::new("uuid", "char").primary().max_length(36),
                RawColumn::new("subject", "varchar").max_length(120),
            ],
        );
        let map = replacements(&posts_spec(), Some(&uuid), &ModforgeConfig::default());
        assert!(token(&map, "deleteRules").contains("\"string|exists:tickets,uuid\""));
    }

    #[test]
    fn conventional_schema_emits_no_overrides() {
        let schema = posts_schema();
        let map = replacements(&posts_spec(), Some(&schema), &ModforgeConfig::default());
        for name in ["primaryKey", "keyType", "incrementing", "timestamps", "timestampFields"] {
            assert_eq!(token(&map, name), "", "{name} should be empty");
        }
        assert_eq!(token(&map, "useClasses"), "");
        assert_eq!(token(&map, "traits"), "");
    }

    #[test]
    fn deviating_schema_emits_override_consts() {
        let schema = SchemaDescriptor::from_raw(
            "tickets",
            &[
                RawColumn::new("uuid", "char").primary().max_length(36),
                RawColumn::new("subject", "varchar").max_length(120),
                RawColumn::new("created_time", "datetime").nullable(),
                RawColumn::new("deleted_at", "datetime").nullable(),
            ],
        );
        let map = replacements(&posts_spec(), Some(&schema), &ModforgeConfig::default());

        assert!(token(&map, "primaryKey").contains("PRIMARY_KEY: &'static str = \"uuid\""));
        assert!(token(&map, "keyType").contains("\"string\""));
        assert!(token(&map, "incrementing").contains("INCREMENTING: bool = false"));
        assert_eq!(token(&map, "timestamps"), "");
        let fields = token(&map, "timestampFields");
        assert!(fields.contains("CREATED_AT: Option<&'static str> = Some(\"created_time\")"));
        assert!(fields.contains("UPDATED_AT: Option<&'static str> = None"));
        assert!(!fields.contains("DELETED_AT"));
        assert!(token(&map, "traits").contains("impl SoftDeletes for Post {}"));
        assert!(token(&map, "traits").contains("impl UuidKey for Post {}"));
    }

    #[test]
    fn view_columns_title_case_their_labels() {
        let schema = SchemaDescriptor::from_raw(
            "posts",
            &[
                RawColumn::new("id", "bigint").primary().auto_increment(),
                RawColumn::new("published_at", "datetime").nullable(),
            ],
        );
        let map = replacements(&posts_spec(), Some(&schema), &ModforgeConfig::default());
        assert_eq!(token(&map, "listColumns"), "\"published_at\": \"Published At\"");
    }

    #[test]
    fn user_model_is_aliased_only_when_needed() {
        assert_eq!(user_model("App::Models::User"), "App::Models::User");
        assert_eq!(user_model("App::Models::Admin"), "App::Models::Admin as User");
    }

    #[test]
    fn schemaless_tokens_render_empty() {
        let map = replacements(&posts_spec(), None, &ModforgeConfig::default());
        for name in ["fillable", "casts", "saveRules", "deleteRules", "listColumns"] {
            assert_eq!(token(&map, name), "", "{name} should be empty");
        }
        assert_eq!(token(&map, "tableName"), "posts");
    }

    #[test]
    fn render_erases_and_collapses_blank_lines() {
        let stub = "header\n\n\n   \n{{gone}}\n\nbody\n\n\n";
        let out = render(stub, &[("gone", String::new())]);
        assert_eq!(out, "header\n\nbody\n");
    }

    #[test]
    fn render_replaces_tokens_literally() {
        let out = render(
            "hello {{name}} and {{name}}",
            &[("name", "world".to_string())],
        );
        assert_eq!(out, "hello world and world\n");
    }
}
