//! Session factory and unit-of-work sessions.
//!
//! # Responsibility
//! - Build a reusable, explicitly owned factory from database configuration.
//! - Open one short-lived [`Session`] per gateway operation.
//!
//! # Invariants
//! - The schema policy runs exactly once, when the factory is built.
//! - Sessions are never pooled or reused; each owns its own connection.
//! - An in-memory factory keeps an anchor connection so the database
//!   outlives individual sessions.

use super::migrations::{apply_schema_policy, SchemaPolicy};
use super::open::{open_connection, DatabaseLocation};
use super::DbResult;
use crate::config::DatabaseConfig;
use log::{debug, error, info};
use rusqlite::{Connection, Transaction};
use std::time::{Duration, Instant};

/// Configured source of database sessions.
#[derive(Debug)]
pub struct SessionFactory {
    location: DatabaseLocation,
    busy_timeout: Duration,
    show_sql: bool,
    _anchor: Option<Connection>,
}

impl SessionFactory {
    /// Builds a factory from configuration and applies its schema policy.
    ///
    /// # Side effects
    /// - Creates the parent directory of a file database when missing.
    /// - May create, migrate or drop tables depending on `config.schema`.
    pub fn build(config: &DatabaseConfig) -> DbResult<Self> {
        let location = DatabaseLocation::from_config_path(&config.path);
        Self::build_at(
            location,
            config.schema,
            Duration::from_millis(config.busy_timeout_ms),
            config.show_sql,
        )
    }

    /// Builds a factory over a fresh in-memory database with current schema.
    pub fn in_memory() -> DbResult<Self> {
        Self::build_at(
            DatabaseLocation::memory(),
            SchemaPolicy::Update,
            Duration::from_millis(DatabaseConfig::DEFAULT_BUSY_TIMEOUT_MS),
            false,
        )
    }

    fn build_at(
        location: DatabaseLocation,
        policy: SchemaPolicy,
        busy_timeout: Duration,
        show_sql: bool,
    ) -> DbResult<Self> {
        let started_at = Instant::now();

        if let DatabaseLocation::File(path) = &location {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let mut conn = open_connection(&location, busy_timeout)?;
        if let Err(err) = apply_schema_policy(&mut conn, policy) {
            error!(
                "event=session_factory_build module=db status=error policy={} error={err}",
                policy.as_str()
            );
            return Err(err);
        }

        let anchor = match &location {
            DatabaseLocation::Memory(_) => Some(conn),
            DatabaseLocation::File(_) => {
                conn.close().map_err(|(_, err)| err)?;
                None
            }
        };

        info!(
            "event=session_factory_build module=db status=ok location={location} policy={} duration_ms={}",
            policy.as_str(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            location,
            busy_timeout,
            show_sql,
            _anchor: anchor,
        })
    }

    /// Opens a new session with its own connection.
    pub fn open_session(&self) -> DbResult<Session> {
        let conn = open_connection(&self.location, self.busy_timeout)?;
        debug!("event=session_open module=db status=ok");
        Ok(Session {
            conn,
            opened_at: Instant::now(),
        })
    }

    /// Whether gateway statements should be echoed to the log.
    pub fn show_sql(&self) -> bool {
        self.show_sql
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }
}

/// One unit-of-work.
///
/// Open on creation; a transaction borrows the session and ends on commit or
/// drop (rollback); `close` consumes the session. Dropping a session without
/// `close` still releases its connection.
pub struct Session {
    conn: Connection,
    opened_at: Instant,
}

impl Session {
    /// Begins a deferred transaction scoped to this session.
    pub fn begin_transaction(&mut self) -> DbResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Read access for statements that need no transaction.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the session and reports close failures.
    pub fn close(self) -> DbResult<()> {
        let opened_ms = self.opened_at.elapsed().as_millis();
        match self.conn.close() {
            Ok(()) => {
                debug!("event=session_close module=db status=ok open_ms={opened_ms}");
                Ok(())
            }
            Err((_, err)) => {
                error!(
                    "event=session_close module=db status=error open_ms={opened_ms} error={err}"
                );
                Err(err.into())
            }
        }
    }
}
