use contactmgr_core::config::{parse_config, DEFAULT_CONFIG_FILE};
use contactmgr_core::db::MAX_BUSY_TIMEOUT_MS;
use contactmgr_core::{load_config, AppConfig, ConfigError, DatabaseConfig, SchemaPolicy};
use std::path::PathBuf;

#[test]
fn empty_document_yields_defaults() {
    let config = parse_config("").unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.database.path, DatabaseConfig::DEFAULT_PATH);
    assert_eq!(config.database.schema, SchemaPolicy::Update);
    assert!(!config.database.show_sql);
    assert_eq!(
        config.database.busy_timeout_ms,
        DatabaseConfig::DEFAULT_BUSY_TIMEOUT_MS
    );
    assert_eq!(config.logging.level, None);
    assert_eq!(config.logging.dir, None);
}

#[test]
fn full_document_parses_every_key() {
    let config = parse_config(
        r#"
        [database]
        path = ":memory:"
        schema = "create"
        show_sql = true
        busy_timeout_ms = 250

        [logging]
        level = "warn"
        dir = "/var/log/contactmgr"
        "#,
    )
    .unwrap();

    assert_eq!(
        config.database,
        DatabaseConfig {
            path: ":memory:".to_string(),
            schema: SchemaPolicy::Create,
            show_sql: true,
            busy_timeout_ms: 250,
        }
    );
    assert_eq!(config.logging.level.as_deref(), Some("warn"));
    assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/contactmgr")));
}

#[test]
fn schema_policy_names_match_config_values() {
    for (name, policy) in [
        ("create", SchemaPolicy::Create),
        ("update", SchemaPolicy::Update),
        ("validate", SchemaPolicy::Validate),
        ("none", SchemaPolicy::Skip),
    ] {
        let config = parse_config(&format!("[database]\nschema = \"{name}\"\n")).unwrap();
        assert_eq!(config.database.schema, policy);
        assert_eq!(policy.as_str(), name);
    }
}

#[test]
fn unknown_keys_and_policies_are_rejected() {
    assert!(matches!(
        parse_config("[database]\nurl = \"x\"\n"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        parse_config("[database]\nschema = \"create-drop\"\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn empty_database_path_is_invalid() {
    let err = parse_config("[database]\npath = \"  \"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue(_)));
}

#[test]
fn busy_timeout_beyond_sqlite_range_is_invalid() {
    let err = parse_config("[database]\npath = \":memory:\"\nbusy_timeout_ms = 3000000000\n")
        .unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidValue(ref message) if message.contains("busy_timeout_ms")),
        "unexpected error: {err}"
    );

    let config =
        parse_config(&format!("[database]\nbusy_timeout_ms = {MAX_BUSY_TIMEOUT_MS}\n")).unwrap();
    assert_eq!(config.database.busy_timeout_ms, MAX_BUSY_TIMEOUT_MS);
}

#[test]
fn explicit_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Io { path: ref missing, .. } if missing == &path));
}

#[test]
fn relative_database_path_resolves_next_to_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    std::fs::write(&path, "[database]\npath = \"data/contacts.db\"\n").unwrap();

    let config = load_config(Some(path.as_path())).unwrap();

    assert_eq!(
        PathBuf::from(config.database.path),
        dir.path().join("data").join("contacts.db")
    );
}

#[test]
fn memory_path_is_not_resolved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    std::fs::write(&path, "[database]\npath = \":memory:\"\nschema = \"create\"\n").unwrap();

    let config = load_config(Some(path.as_path())).unwrap();

    assert_eq!(config.database, DatabaseConfig::in_memory(SchemaPolicy::Create));
}
