//! Table lookup and normalization

use inflector::Inflector;

use super::{SchemaBackend, SchemaDescriptor, SchemaError};

/// Introspect one table into a [`SchemaDescriptor`]
///
/// The hint is tried as given, then in pluralized form; the descriptor
/// carries whichever name was actually found. When neither exists the caller
/// decides the fallback (normally the migration-only path).
///
/// # Errors
///
/// Returns [`SchemaError::TableNotFound`] when the table is absent under
/// both names, or a database error if a catalog query fails.
pub async fn introspect(
    backend: &dyn SchemaBackend,
    table_hint: &str,
) -> Result<SchemaDescriptor, SchemaError> {
    let table = resolve_table(backend, table_hint).await?;
    let raw = backend.raw_columns(&table).await?;

    tracing::debug!(table, columns = raw.len(), "normalizing schema");
    Ok(SchemaDescriptor::from_raw(table, &raw))
}

async fn resolve_table(
    backend: &dyn SchemaBackend,
    table_hint: &str,
) -> Result<String, SchemaError> {
    if backend.has_table(table_hint).await? {
        return Ok(table_hint.to_string());
    }

    let plural = table_hint.to_plural();
    if plural != table_hint && backend.has_table(&plural).await? {
        return Ok(plural);
    }

    Err(SchemaError::TableNotFound {
        table: table_hint.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{KeyType, RawColumn};
    use crate::testing::FixtureBackend;

    #[tokio::test]
    async fn introspects_the_hint_as_given() {
        let backend = FixtureBackend::new().with_table(
            "posts",
            vec![
                RawColumn::new("id", "bigint").primary().auto_increment(),
                RawColumn::new("title", "varchar").max_length(255),
            ],
        );

        let schema = introspect(&backend, "posts").await.unwrap();
        assert_eq!(schema.table, "posts");
        assert_eq!(schema.primary_key.key_type, KeyType::Int);
    }

    #[tokio::test]
    async fn falls_back_to_the_pluralized_hint() {
        let backend = FixtureBackend::new().with_table(
            "categories",
            vec![RawColumn::new("id", "int").primary().auto_increment()],
        );

        let schema = introspect(&backend, "category").await.unwrap();
        assert_eq!(schema.table, "categories");
    }

    #[tokio::test]
    async fn missing_table_is_not_found() {
        let backend = FixtureBackend::new();
        let result = introspect(&backend, "ghosts").await;
        assert!(matches!(
            result,
            Err(SchemaError::TableNotFound { table }) if table == "ghosts"
        ));
    }
}
