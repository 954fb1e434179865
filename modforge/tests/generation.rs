//! End-to-end generation against an in-memory schema backend.

use modforge::pending::{PendingFilters, RecordedFilter};
use modforge::schema::{introspect, KeyType, RawColumn, SchemaError};
use modforge::stubs::{StubKind, StubStore};
use modforge::testing::FixtureBackend;
use modforge::{ModforgeConfig, ModuleGenerator, ModuleOptions, ModuleSpec, WriteOutcome};

fn posts_backend() -> FixtureBackend {
    FixtureBackend::new().with_table(
        "posts",
        vec![
            RawColumn::new("id", "bigint").primary().auto_increment(),
            RawColumn::new("title", "varchar").max_length(255),
            RawColumn::new("status", "enum").column_type("enum('draft','published')"),
            RawColumn::new("created_at", "datetime").nullable(),
            RawColumn::new("updated_at", "datetime").nullable(),
        ],
    )
}

#[tokio::test]
async fn posts_module_generates_the_full_slice() {
    let backend = posts_backend();
    let config = ModforgeConfig::default();
    let spec = ModuleSpec::new("post", ModuleOptions::default(), &config);

    let schema = introspect(&backend, &spec.table).await.unwrap();
    assert_eq!(schema.primary_key.name, "id");
    assert_eq!(schema.primary_key.key_type, KeyType::Int);
    assert!(schema.primary_key.incrementing);
    assert_eq!(schema.timestamps.created.as_deref(), Some("created_at"));
    assert_eq!(schema.timestamps.updated.as_deref(), Some("updated_at"));
    assert_eq!(schema.fillable(), vec!["title", "status"]);

    let stubs = StubStore::builtin();
    let generator = ModuleGenerator::new(&spec, Some(&schema), &stubs, &config);
    let artifacts = generator.render_all().unwrap();

    let root = tempfile::tempdir().unwrap();
    for artifact in &artifacts {
        assert_eq!(
            generator.write(root.path(), artifact).unwrap(),
            WriteOutcome::Written
        );
    }

    let module_dir = root.path().join("src/modules/Post");
    let model = std::fs::read_to_string(module_dir.join("Models/Post.rs")).unwrap();
    assert!(model.contains("const TABLE: &'static str = \"posts\";"));
    assert!(model.contains("(\"status\", \"string\")"));
    assert!(!model.contains("KEY_TYPE"));
    assert!(!model.contains("TIMESTAMPS"));

    let save = std::fs::read_to_string(module_dir.join("Requests/SavePostRequest.rs")).unwrap();
    assert!(save.contains("(\"id\", \"nullable|exists:posts,id\")"));
    assert!(save.contains("(\"title\", \"required|max:255\")"));
    assert!(save.contains("(\"status\", \"required|in:draft,published\")"));

    let delete =
        std::fs::read_to_string(module_dir.join("Requests/DeletePostRequest.rs")).unwrap();
    assert!(delete.contains("(\"id.*\", \"integer|exists:posts,id\")"));

    assert!(module_dir.join("Templates/Views/list.html").is_file());
    assert!(module_dir.join("Routes/PostRoute.rs").is_file());
}

#[tokio::test]
async fn regeneration_without_force_preserves_bytes() {
    let backend = posts_backend();
    let config = ModforgeConfig::default();
    let spec = ModuleSpec::new("post", ModuleOptions::default(), &config);
    let schema = introspect(&backend, &spec.table).await.unwrap();

    let stubs = StubStore::builtin();
    let generator = ModuleGenerator::new(&spec, Some(&schema), &stubs, &config);
    let artifacts = generator.render_all().unwrap();
    let root = tempfile::tempdir().unwrap();
    for artifact in &artifacts {
        generator.write(root.path(), artifact).unwrap();
    }

    let model_path = root.path().join("src/modules/Post/Models/Post.rs");
    std::fs::write(&model_path, "locally customized").unwrap();
    for artifact in &artifacts {
        assert_eq!(
            generator.write(root.path(), artifact).unwrap(),
            WriteOutcome::Skipped
        );
    }
    assert_eq!(
        std::fs::read_to_string(&model_path).unwrap(),
        "locally customized"
    );

    let forced_spec = ModuleSpec::new(
        "post",
        ModuleOptions {
            force: true,
            ..ModuleOptions::default()
        },
        &config,
    );
    let forced = ModuleGenerator::new(&forced_spec, Some(&schema), &stubs, &config);
    for artifact in &forced.render_all().unwrap() {
        assert_eq!(
            forced.write(root.path(), artifact).unwrap(),
            WriteOutcome::Written
        );
    }
    assert!(std::fs::read_to_string(&model_path)
        .unwrap()
        .contains("const TABLE"));
}

#[tokio::test]
async fn missing_table_yields_migration_and_parks_the_filter() {
    let backend = FixtureBackend::new();
    let config = ModforgeConfig::default();
    let options = ModuleOptions {
        only: vec![StubKind::Model, StubKind::Controller],
        ..ModuleOptions::default()
    };
    let spec = ModuleSpec::new("ghost", options, &config);

    let err = introspect(&backend, &spec.table).await.unwrap_err();
    assert!(matches!(err, SchemaError::TableNotFound { .. }));

    let stubs = StubStore::builtin();
    let generator = ModuleGenerator::new(&spec, None, &stubs, &config);
    let migration = generator.render_migration();
    let name = migration
        .path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(name.ends_with("_create_ghosts_table.sql"));
    assert!(migration.content.contains("CREATE TABLE ghosts"));

    let root = tempfile::tempdir().unwrap();
    generator.write(root.path(), &migration).unwrap();
    assert!(root.path().join(&migration.path).is_file());

    // The requested filter is parked under the table name for replay.
    let index_path = root.path().join(".pending.json");
    let mut pending = PendingFilters::default();
    pending.record(
        &spec.table,
        RecordedFilter {
            module: "ghost".to_string(),
            only: vec!["model".to_string(), "controller".to_string()],
            except: Vec::new(),
        },
    );
    pending.save(&index_path).unwrap();

    let mut reloaded = PendingFilters::load(&index_path).unwrap();
    let filter = reloaded.take("ghosts").unwrap();
    assert_eq!(
        filter.only_kinds(),
        vec![StubKind::Model, StubKind::Controller]
    );
}
