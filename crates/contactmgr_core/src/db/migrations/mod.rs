//! Schema registry and the DDL policy applied at factory build time.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply, reset or verify the schema according to [`SchemaPolicy`].
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Table holding one row per contact.
pub const CONTACT_TABLE: &str = "Contact";

const MANAGED_TABLES: &[&str] = &[CONTACT_TABLE];

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// What to do with the schema when a session factory is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Drop every managed table and recreate it empty.
    Create,
    /// Apply pending migrations, keeping existing rows.
    #[default]
    Update,
    /// Require the schema to be current; never modify it.
    Validate,
    /// Leave the database untouched.
    #[serde(rename = "none")]
    Skip,
}

impl SchemaPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Validate => "validate",
            Self::Skip => "none",
        }
    }
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Runs `policy` against `conn`.
pub fn apply_schema_policy(conn: &mut Connection, policy: SchemaPolicy) -> DbResult<()> {
    let before = current_user_version(conn)?;
    match policy {
        SchemaPolicy::Create => {
            reset_schema(conn)?;
            apply_migrations(conn)?;
        }
        SchemaPolicy::Update => apply_migrations(conn)?,
        SchemaPolicy::Validate => validate_schema(conn)?,
        SchemaPolicy::Skip => {}
    }

    info!(
        "event=schema_apply module=db status=ok policy={} from_version={} to_version={}",
        policy.as_str(),
        before,
        current_user_version(conn)?
    );
    Ok(())
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

/// Checks that the schema is at the latest version and every managed table exists.
pub fn validate_schema(conn: &Connection) -> DbResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(DbError::SchemaMismatch {
            expected_version,
            actual_version,
        });
    }

    for table in MANAGED_TABLES {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingTable(*table));
        }
    }

    Ok(())
}

fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    for table in MANAGED_TABLES {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    tx.execute_batch("PRAGMA user_version = 0;")?;
    tx.commit()?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
