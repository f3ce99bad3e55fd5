//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Resolve a configured database path into a [`DatabaseLocation`].
//! - Open connections with the busy timeout every session relies on.
//!
//! # Invariants
//! - Returned connections have a busy timeout set; timeouts SQLite cannot
//!   represent are rejected before a connection is opened.
//! - An in-memory location names one shared database; every connection
//!   opened against it sees the same rows while any of them is alive.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Largest busy timeout SQLite accepts (a C `int` of milliseconds).
pub const MAX_BUSY_TIMEOUT_MS: u64 = i32::MAX as u64;

/// Where the contact database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A SQLite file on disk.
    File(PathBuf),
    /// A named shared-cache in-memory database (`file:` URI).
    Memory(String),
}

impl DatabaseLocation {
    /// Configured path that selects an in-memory database.
    pub const MEMORY_PATH: &'static str = ":memory:";

    /// Maps a configured path to a location; `:memory:` gets a fresh name.
    pub fn from_config_path(path: &str) -> Self {
        if path.trim() == Self::MEMORY_PATH {
            Self::memory()
        } else {
            Self::File(PathBuf::from(path))
        }
    }

    /// Creates a uniquely named in-memory location.
    pub fn memory() -> Self {
        Self::Memory(format!(
            "file:contactmgr-{}?mode=memory&cache=shared",
            Uuid::new_v4().simple()
        ))
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory(_) => "memory",
        }
    }
}

impl Display for DatabaseLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory(uri) => f.write_str(uri),
        }
    }
}

/// Opens one configured connection to `location`.
///
/// Does not touch the schema.
///
/// # Errors
/// - `InvalidBusyTimeout` when `busy_timeout` exceeds [`MAX_BUSY_TIMEOUT_MS`].
/// - `Sqlite` when the database cannot be opened or configured.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_connection(
    location: &DatabaseLocation,
    busy_timeout: Duration,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = location.mode();

    let busy_timeout_ms = busy_timeout.as_millis();
    if busy_timeout_ms > u128::from(MAX_BUSY_TIMEOUT_MS) {
        error!(
            "event=db_open module=db status=error mode={mode} error_code=db_busy_timeout_invalid busy_timeout_ms={busy_timeout_ms}"
        );
        return Err(DbError::InvalidBusyTimeout {
            millis: busy_timeout_ms,
        });
    }

    let opened = match location {
        DatabaseLocation::File(path) => Connection::open(path),
        DatabaseLocation::Memory(uri) => Connection::open(uri),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }
    };

    if let Err(err) = configure_connection(&conn, busy_timeout) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_configure_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn configure_connection(conn: &Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.busy_timeout(busy_timeout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DatabaseLocation;
    use std::path::PathBuf;

    #[test]
    fn memory_path_maps_to_unique_shared_uris() {
        let first = DatabaseLocation::from_config_path(":memory:");
        let second = DatabaseLocation::from_config_path(" :memory: ");

        match (&first, &second) {
            (DatabaseLocation::Memory(a), DatabaseLocation::Memory(b)) => {
                assert_ne!(a, b);
                assert!(a.starts_with("file:contactmgr-"));
                assert!(a.ends_with("mode=memory&cache=shared"));
            }
            other => panic!("expected memory locations, got {other:?}"),
        }
    }

    #[test]
    fn other_paths_map_to_files() {
        assert_eq!(
            DatabaseLocation::from_config_path("data/contacts.db"),
            DatabaseLocation::File(PathBuf::from("data/contacts.db"))
        );
    }
}
