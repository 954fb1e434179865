//! Schema introspection
//!
//! Queries a relational backend for one table's structure and normalizes it
//! into a backend-independent [`SchemaDescriptor`]: primary key, timestamp
//! roles, and a catalog of the remaining columns in source order.

pub mod backend;
mod introspect;

pub use backend::{connect, MySqlBackend, PostgresBackend, RawColumn, SchemaBackend};
pub use introspect::introspect;

use thiserror::Error;

/// Schema introspection error
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Table absent under both the given and the pluralized name
    #[error("table [{table}] not found")]
    TableNotFound {
        /// The table name as originally requested
        table: String,
    },

    /// Database backend not recognized
    #[error("unsupported database backend: {0}")]
    UnsupportedBackend(String),

    /// Driver-level error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Inferred primary-key type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Integer key, conventionally autoincrementing
    Int,
    /// String key, conventionally a UUID
    Str,
}

impl KeyType {
    /// Validation-rule token for elements of a key array
    #[must_use]
    pub const fn rule_token(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Str => "string",
        }
    }
}

/// Broad type family a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// tinyint / int / bigint / smallint
    Integer,
    /// decimal / float / double
    Float,
    /// boolean
    Boolean,
    /// json / array
    Json,
    /// date / datetime / timestamp
    DateTime,
    /// everything else (char, varchar, text, enum, ...)
    Text,
}

impl TypeCategory {
    /// Classify a raw database type name
    #[must_use]
    pub fn parse(data_type: &str) -> Self {
        match data_type.to_lowercase().as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "int2"
            | "int4" | "int8" => Self::Integer,
            "decimal" | "numeric" | "float" | "double" | "real" | "double precision"
            | "float4" | "float8" => Self::Float,
            "boolean" | "bool" => Self::Boolean,
            "json" | "jsonb" | "array" => Self::Json,
            "date" | "datetime" | "datetime2" | "timestamp" | "timestamp without time zone"
            | "timestamp with time zone" | "timestamptz" => Self::DateTime,
            _ => Self::Text,
        }
    }

    /// Cast token this family maps to in generated models
    #[must_use]
    pub const fn cast_token(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Json => "array",
            Self::DateTime => "datetime",
            Self::Text => "string",
        }
    }

    /// Whether save-validation should require a numeric value
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Whether save-validation should require a date value
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::DateTime)
    }
}

/// Primary-key facts promoted out of the column catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Column name, `id` when no column is flagged primary
    pub name: String,
    /// Inferred key type
    pub key_type: KeyType,
    /// Identity / auto-increment marker
    pub incrementing: bool,
}

/// Timestamp role → column name assignments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timestamps {
    /// Creation timestamp column, if any
    pub created: Option<String>,
    /// Update timestamp column, if any
    pub updated: Option<String>,
    /// Soft-delete timestamp column, if any
    pub deleted: Option<String>,
}

impl Timestamps {
    /// Whether the table supports soft deletes
    #[must_use]
    pub const fn has_soft_deletes(&self) -> bool {
        self.deleted.is_some()
    }

    /// Whether the table carries created/updated bookkeeping
    #[must_use]
    pub const fn has_timestamps(&self) -> bool {
        self.created.is_some() || self.updated.is_some()
    }

    fn contains(&self, column: &str) -> bool {
        [&self.created, &self.updated, &self.deleted]
            .into_iter()
            .flatten()
            .any(|name| name == column)
    }
}

/// One catalog column (primary key and timestamps excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Type family
    pub category: TypeCategory,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Declared default, if any
    pub default: Option<String>,
    /// Character max length, if any
    pub max_length: Option<u32>,
    /// Allowed literals parsed from an `enum(...)` type descriptor
    pub enum_values: Option<Vec<String>>,
}

impl Column {
    /// Cast token for this column
    ///
    /// Enum columns always cast to the string form regardless of the
    /// underlying declared type.
    #[must_use]
    pub const fn cast_token(&self) -> &'static str {
        if self.enum_values.is_some() {
            "string"
        } else {
            self.category.cast_token()
        }
    }
}

/// Normalized description of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Table name actually found (possibly the pluralized hint)
    pub table: String,
    /// Primary-key facts
    pub primary_key: PrimaryKey,
    /// Timestamp role assignments
    pub timestamps: Timestamps,
    /// Remaining columns in source order
    pub columns: Vec<Column>,
}

impl SchemaDescriptor {
    /// Build a descriptor from raw catalog rows
    ///
    /// Raw order is preserved in the column catalog so downstream rendering
    /// stays deterministic.
    #[must_use]
    pub fn from_raw(table: impl Into<String>, raw: &[RawColumn]) -> Self {
        let primary_key = derive_primary_key(raw);
        let timestamps = derive_timestamps(raw);
        let columns = derive_columns(raw, &primary_key.name, &timestamps);

        Self {
            table: table.into(),
            primary_key,
            timestamps,
            columns,
        }
    }

    /// Names of the catalog columns, in schema order
    #[must_use]
    pub fn fillable(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

fn derive_primary_key(raw: &[RawColumn]) -> PrimaryKey {
    let Some(col) = raw.iter().find(|c| c.primary) else {
        return PrimaryKey {
            name: "id".to_string(),
            key_type: KeyType::Int,
            incrementing: false,
        };
    };

    let data_type = col.data_type.to_lowercase();
    let char_like = matches!(
        data_type.as_str(),
        "char" | "varchar" | "character" | "character varying"
    );

    // 36-char string keys follow the UUID convention.
    let key_type = if char_like && col.max_length == Some(36) {
        KeyType::Str
    } else if TypeCategory::parse(&data_type) == TypeCategory::Integer {
        KeyType::Int
    } else {
        KeyType::Str
    };

    PrimaryKey {
        name: col.name.clone(),
        key_type,
        incrementing: col.auto_increment,
    }
}

fn derive_timestamps(raw: &[RawColumn]) -> Timestamps {
    let mut timestamps = Timestamps::default();

    for col in raw {
        if !TypeCategory::parse(&col.data_type).is_date() {
            continue;
        }
        let lower = col.name.to_lowercase();
        // First qualifying column per role wins.
        if lower.contains("created") && timestamps.created.is_none() {
            timestamps.created = Some(col.name.clone());
        } else if lower.contains("updated") && timestamps.updated.is_none() {
            timestamps.updated = Some(col.name.clone());
        } else if lower.contains("deleted") && timestamps.deleted.is_none() {
            timestamps.deleted = Some(col.name.clone());
        }
    }

    timestamps
}

fn derive_columns(raw: &[RawColumn], primary_key: &str, timestamps: &Timestamps) -> Vec<Column> {
    raw.iter()
        .filter(|col| col.name != primary_key && !timestamps.contains(&col.name))
        .map(|col| Column {
            name: col.name.clone(),
            category: TypeCategory::parse(&col.data_type),
            nullable: col.nullable,
            default: col.default.clone(),
            max_length: col.max_length,
            enum_values: parse_enum_values(&col.column_type),
        })
        .collect()
}

/// Parse `enum('a','b')` type descriptors into their quote-trimmed literals
fn parse_enum_values(column_type: &str) -> Option<Vec<String>> {
    let body = column_type.strip_prefix("enum(")?.strip_suffix(')')?;
    if body.is_empty() {
        return None;
    }

    Some(
        body.split(',')
            .map(|v| v.trim().trim_matches('\'').to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts_raw() -> Vec<RawColumn> {
        vec![
            RawColumn::new("id", "bigint").primary().auto_increment(),
            RawColumn::new("title", "varchar").max_length(255),
            RawColumn::new("status", "varchar")
                .max_length(9)
                .column_type("enum('draft','published')"),
            RawColumn::new("created_at", "datetime").nullable(),
            RawColumn::new("updated_at", "datetime").nullable(),
        ]
    }

    #[test]
    fn primary_key_and_timestamps_are_promoted() {
        let schema = SchemaDescriptor::from_raw("posts", &posts_raw());

        assert_eq!(schema.primary_key.name, "id");
        assert_eq!(schema.primary_key.key_type, KeyType::Int);
        assert!(schema.primary_key.incrementing);
        assert_eq!(schema.timestamps.created.as_deref(), Some("created_at"));
        assert_eq!(schema.timestamps.updated.as_deref(), Some("updated_at"));
        assert_eq!(schema.timestamps.deleted, None);

        // Neither the key nor the timestamps leak into the catalog.
        assert_eq!(schema.fillable(), vec!["title", "status"]);
    }

    #[test]
    fn varchar_36_key_is_a_string_key() {
        let raw = vec![RawColumn::new("uuid", "char").primary().max_length(36)];
        let schema = SchemaDescriptor::from_raw("sessions", &raw);
        assert_eq!(schema.primary_key.key_type, KeyType::Str);
    }

    #[test]
    fn integer_family_key_is_int_regardless_of_length() {
        let raw = vec![RawColumn::new("id", "smallint").primary().max_length(36)];
        let schema = SchemaDescriptor::from_raw("sessions", &raw);
        assert_eq!(schema.primary_key.key_type, KeyType::Int);
    }

    #[test]
    fn non_integer_non_uuid_key_falls_back_to_string() {
        let raw = vec![RawColumn::new("code", "text").primary()];
        let schema = SchemaDescriptor::from_raw("things", &raw);
        assert_eq!(schema.primary_key.key_type, KeyType::Str);
    }

    #[test]
    fn first_qualifying_timestamp_per_role_wins() {
        let raw = vec![
            RawColumn::new("created_on", "timestamp"),
            RawColumn::new("created_at", "timestamp"),
            RawColumn::new("deleted_at", "datetime").nullable(),
        ];
        let schema = SchemaDescriptor::from_raw("logs", &raw);
        assert_eq!(schema.timestamps.created.as_deref(), Some("created_on"));
        assert!(schema.timestamps.has_soft_deletes());
        assert!(schema.timestamps.has_timestamps());
    }

    #[test]
    fn non_datetime_created_column_is_a_plain_column() {
        let raw = vec![RawColumn::new("created_by", "varchar").max_length(64)];
        let schema = SchemaDescriptor::from_raw("logs", &raw);
        assert_eq!(schema.timestamps, Timestamps::default());
        assert_eq!(schema.fillable(), vec!["created_by"]);
    }

    #[test]
    fn enum_values_are_parsed_and_quote_trimmed() {
        let schema = SchemaDescriptor::from_raw("posts", &posts_raw());
        let status = &schema.columns[1];
        assert_eq!(
            status.enum_values.as_deref(),
            Some(&["draft".to_string(), "published".to_string()][..])
        );
    }

    #[test]
    fn enum_columns_always_cast_to_string() {
        // An enum descriptor on a numeric-looking base type still casts to
        // the string form.
        let raw = vec![RawColumn::new("level", "tinyint").column_type("enum('1','2','3')")];
        let schema = SchemaDescriptor::from_raw("grades", &raw);
        assert_eq!(schema.columns[0].cast_token(), "string");
    }

    #[test]
    fn cast_tokens_follow_the_type_family() {
        assert_eq!(TypeCategory::parse("bigint").cast_token(), "integer");
        assert_eq!(TypeCategory::parse("decimal").cast_token(), "float");
        assert_eq!(TypeCategory::parse("boolean").cast_token(), "boolean");
        assert_eq!(TypeCategory::parse("json").cast_token(), "array");
        assert_eq!(TypeCategory::parse("timestamp").cast_token(), "datetime");
        assert_eq!(TypeCategory::parse("varchar").cast_token(), "string");
    }

    #[test]
    fn table_without_primary_key_defaults_to_id() {
        let raw = vec![RawColumn::new("name", "varchar").max_length(100)];
        let schema = SchemaDescriptor::from_raw("tags", &raw);
        assert_eq!(schema.primary_key.name, "id");
        assert_eq!(schema.primary_key.key_type, KeyType::Int);
        assert!(!schema.primary_key.incrementing);
    }
}
