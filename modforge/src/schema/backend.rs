//! Dialect-specific catalog queries
//!
//! Two backends are recognized: MySQL and PostgreSQL. Each answers the same
//! two questions — does a table exist, and what are its raw columns — behind
//! the [`SchemaBackend`] port, so the rest of the engine never sees a dialect.

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;
use sqlx::postgres::PgPool;
use sqlx::Row;

use super::SchemaError;

/// One raw catalog row, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    /// Column name
    pub name: String,
    /// Primary-key flag
    pub primary: bool,
    /// Backend data type name
    pub data_type: String,
    /// Character max length, if any
    pub max_length: Option<u32>,
    /// Declared default, if any
    pub default: Option<String>,
    /// Whether NULL is allowed
    pub nullable: bool,
    /// Full type descriptor, used to extract enum literals
    pub column_type: String,
    /// Identity / auto-increment marker
    pub auto_increment: bool,
}

impl RawColumn {
    /// Start a raw column with the conventional defaults
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            primary: false,
            column_type: data_type.clone(),
            data_type,
            max_length: None,
            default: None,
            nullable: false,
            auto_increment: false,
        }
    }

    /// Flag as primary key
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Flag as identity / auto-increment
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Allow NULL
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the character max length
    #[must_use]
    pub const fn max_length(mut self, length: u32) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Set the declared default
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the full type descriptor
    #[must_use]
    pub fn column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }
}

/// Port over a relational backend's catalog
#[async_trait]
pub trait SchemaBackend: Send + Sync {
    /// Whether `table` exists in the current schema
    async fn has_table(&self, table: &str) -> Result<bool, SchemaError>;

    /// Raw columns of `table` in ordinal order
    async fn raw_columns(&self, table: &str) -> Result<Vec<RawColumn>, SchemaError>;
}

/// Connect to the backend a database URL points at
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedBackend`] for any URL scheme other than
/// `mysql` or `postgres`, and a database error if the connection fails.
pub async fn connect(database_url: &str) -> Result<Box<dyn SchemaBackend>, SchemaError> {
    if database_url.starts_with("mysql:") {
        let pool = MySqlPool::connect(database_url).await?;
        return Ok(Box::new(MySqlBackend::new(pool)));
    }

    if database_url.starts_with("postgres:") || database_url.starts_with("postgresql:") {
        let pool = PgPool::connect(database_url).await?;
        return Ok(Box::new(PostgresBackend::new(pool)));
    }

    let scheme = database_url
        .split(':')
        .next()
        .unwrap_or(database_url)
        .to_string();
    Err(SchemaError::UnsupportedBackend(scheme))
}

/// MySQL catalog backend
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    /// Wrap an existing pool
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaBackend for MySqlBackend {
    async fn has_table(&self, table: &str) -> Result<bool, SchemaError> {
        tracing::debug!(table, "checking table existence (mysql)");

        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.try_get("n")?;
        Ok(count > 0)
    }

    async fn raw_columns(&self, table: &str) -> Result<Vec<RawColumn>, SchemaError> {
        tracing::debug!(table, "fetching raw columns (mysql)");

        let rows = sqlx::query(
            "SELECT COLUMN_NAME AS name, \
                    COLUMN_KEY AS column_key, \
                    DATA_TYPE AS data_type, \
                    CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS max_length, \
                    COLUMN_DEFAULT AS column_default, \
                    IS_NULLABLE AS is_nullable, \
                    COLUMN_TYPE AS column_type, \
                    EXTRA AS extra \
             FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
             ORDER BY ORDINAL_POSITION",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let column_key: String = row.try_get("column_key")?;
            let extra: String = row.try_get("extra")?;
            let is_nullable: String = row.try_get("is_nullable")?;
            let max_length: Option<i64> = row.try_get("max_length")?;

            columns.push(RawColumn {
                name: row.try_get("name")?,
                primary: column_key == "PRI",
                data_type: row.try_get("data_type")?,
                max_length: max_length.and_then(|n| u32::try_from(n).ok()),
                default: row.try_get("column_default")?,
                nullable: is_nullable == "YES",
                column_type: row.try_get("column_type")?,
                auto_increment: extra.contains("auto_increment"),
            });
        }

        Ok(columns)
    }
}

/// PostgreSQL catalog backend
///
/// Postgres has no inline `enum(...)` descriptor, so user-defined enum
/// columns are rebuilt into one from `pg_enum` to keep the normalized shape
/// identical across dialects.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Wrap an existing pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaBackend for PostgresBackend {
    async fn has_table(&self, table: &str) -> Result<bool, SchemaError> {
        tracing::debug!(table, "checking table existence (postgres)");

        let row = sqlx::query(
            "SELECT EXISTS ( \
                SELECT 1 FROM information_schema.tables \
                WHERE table_schema = current_schema() AND table_name = $1 \
             ) AS present",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        let present: bool = row.try_get("present")?;
        Ok(present)
    }

    async fn raw_columns(&self, table: &str) -> Result<Vec<RawColumn>, SchemaError> {
        tracing::debug!(table, "fetching raw columns (postgres)");

        let rows = sqlx::query(
            "SELECT c.column_name AS name, \
                    CASE WHEN k.column_name IS NOT NULL THEN 'PRI' ELSE '' END AS column_key, \
                    c.data_type AS data_type, \
                    c.character_maximum_length::bigint AS max_length, \
                    c.column_default AS column_default, \
                    c.is_nullable AS is_nullable, \
                    CASE WHEN c.data_type = 'USER-DEFINED' THEN \
                        COALESCE( \
                            'enum(' || ( \
                                SELECT string_agg('''' || e.enumlabel || '''', ',' ORDER BY e.enumsortorder) \
                                FROM pg_enum e \
                                JOIN pg_type t ON t.oid = e.enumtypid \
                                WHERE t.typname = c.udt_name \
                            ) || ')', \
                            c.udt_name \
                        ) \
                    ELSE c.data_type END AS column_type, \
                    CASE WHEN c.is_identity = 'YES' OR c.column_default LIKE 'nextval(%' \
                         THEN 'auto_increment' ELSE '' END AS extra \
             FROM information_schema.columns c \
             LEFT JOIN information_schema.table_constraints tc \
               ON tc.table_schema = c.table_schema \
              AND tc.table_name = c.table_name \
              AND tc.constraint_type = 'PRIMARY KEY' \
             LEFT JOIN information_schema.key_column_usage k \
               ON k.constraint_name = tc.constraint_name \
              AND k.table_schema = c.table_schema \
              AND k.table_name = c.table_name \
              AND k.column_name = c.column_name \
             WHERE c.table_schema = current_schema() AND c.table_name = $1 \
             ORDER BY c.ordinal_position",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let column_key: String = row.try_get("column_key")?;
            let extra: String = row.try_get("extra")?;
            let is_nullable: String = row.try_get("is_nullable")?;
            let max_length: Option<i64> = row.try_get("max_length")?;

            columns.push(RawColumn {
                name: row.try_get("name")?,
                primary: column_key == "PRI",
                data_type: row.try_get("data_type")?,
                max_length: max_length.and_then(|n| u32::try_from(n).ok()),
                default: row.try_get("column_default")?,
                nullable: is_nullable == "YES",
                column_type: row.try_get("column_type")?,
                auto_increment: extra.contains("auto_increment"),
            });
        }

        Ok(columns)
    }
}
