//! Contact gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert one contact per call and report its generated key.
//! - Materialize every stored contact as fresh values.
//!
//! # Invariants
//! - `save` writes the generated key back onto the caller's contact.
//! - `fetch_all` applies no filter, ordering or pagination.

use crate::db::{DbError, SessionFactory};
use crate::model::contact::{Contact, ContactId};
use log::{error, info};
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const CONTACT_INSERT_SQL: &str =
    "INSERT INTO Contact (firstName, lastName, email, phone) VALUES (?1, ?2, ?3, ?4);";

const CONTACT_SELECT_ALL_SQL: &str = "SELECT id, firstName, lastName, email, phone FROM Contact;";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Gateway between in-memory contacts and durable storage.
pub trait ContactRepository {
    /// Inserts `contact`, assigns the generated key to `contact.id` and returns it.
    ///
    /// A contact that already carries a key is inserted as a new row. The key
    /// is written back as soon as the transaction commits, so a session close
    /// failure after that still leaves `contact.id` matching the stored row
    /// even though the call returns `Err`.
    fn save(&self, contact: &mut Contact) -> RepoResult<ContactId>;

    /// Returns every stored contact in engine order.
    fn fetch_all(&self) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed gateway borrowing an injected session factory.
pub struct SqliteContactRepository<'factory> {
    factory: &'factory SessionFactory,
}

impl<'factory> SqliteContactRepository<'factory> {
    pub fn new(factory: &'factory SessionFactory) -> Self {
        Self { factory }
    }

    fn insert(&self, contact: &mut Contact) -> RepoResult<ContactId> {
        let mut session = self.factory.open_session()?;
        let tx = session.begin_transaction()?;
        self.echo_sql(CONTACT_INSERT_SQL);
        tx.execute(
            CONTACT_INSERT_SQL,
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_deref(),
                contact.phone,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        contact.id = id;
        session.close()?;
        Ok(id)
    }

    fn select_all(&self) -> RepoResult<Vec<Contact>> {
        let session = self.factory.open_session()?;
        let contacts = {
            self.echo_sql(CONTACT_SELECT_ALL_SQL);
            let mut stmt = session.connection().prepare(CONTACT_SELECT_ALL_SQL)?;
            let mut rows = stmt.query([])?;
            let mut contacts = Vec::new();
            while let Some(row) = rows.next()? {
                contacts.push(parse_contact_row(row)?);
            }
            contacts
        };
        session.close()?;
        Ok(contacts)
    }

    fn echo_sql(&self, sql: &str) {
        if self.factory.show_sql() {
            info!("event=sql module=repo sql=\"{sql}\"");
        }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn save(&self, contact: &mut Contact) -> RepoResult<ContactId> {
        let started_at = Instant::now();
        match self.insert(contact) {
            Ok(id) => {
                info!(
                    "event=contact_save module=repo status=ok id={id} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=contact_save module=repo status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    fn fetch_all(&self) -> RepoResult<Vec<Contact>> {
        let started_at = Instant::now();
        match self.select_all() {
            Ok(contacts) => {
                info!(
                    "event=contact_fetch_all module=repo status=ok count={} duration_ms={}",
                    contacts.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(contacts)
            }
            Err(err) => {
                error!(
                    "event=contact_fetch_all module=repo status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;
    let first_name = required_text(row, "firstName", id)?;
    let last_name = required_text(row, "lastName", id)?;

    Ok(Contact {
        id,
        first_name,
        last_name,
        email: row.get("email")?,
        phone: row.get("phone")?,
    })
}

fn required_text(row: &Row<'_>, column: &str, id: ContactId) -> RepoResult<String> {
    row.get::<_, Option<String>>(column)?.ok_or_else(|| {
        RepoError::InvalidData(format!("NULL value in Contact.{column} for id {id}"))
    })
}
