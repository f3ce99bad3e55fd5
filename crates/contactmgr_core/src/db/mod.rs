//! SQLite storage bootstrap, schema policy and unit-of-work sessions.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the contact store.
//! - Apply the configured schema policy once per session factory.
//! - Hand out short-lived sessions, one per gateway operation.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Contact data is never read or written before the schema policy ran.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod session;

pub use migrations::SchemaPolicy;
pub use open::{open_connection, DatabaseLocation, MAX_BUSY_TIMEOUT_MS};
pub use session::{Session, SessionFactory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    SchemaMismatch {
        expected_version: u32,
        actual_version: u32,
    },
    MissingTable(&'static str),
    InvalidBusyTimeout {
        millis: u128,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SchemaMismatch {
                expected_version,
                actual_version,
            } => write!(
                f,
                "database schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingTable(table) => write!(f, "required table `{table}` is missing"),
            Self::InvalidBusyTimeout { millis } => write!(
                f,
                "busy timeout of {millis} ms exceeds the SQLite maximum of {MAX_BUSY_TIMEOUT_MS} ms"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::SchemaMismatch { .. }
            | Self::MissingTable(_)
            | Self::InvalidBusyTimeout { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
