//! Core domain logic for the contact manager.
//! This crate owns the contact model, its builder and the persistence gateway.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{load_config, AppConfig, ConfigError, DatabaseConfig, LoggingConfig};
pub use db::{DbError, SchemaPolicy, Session, SessionFactory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::builder::ContactBuilder;
pub use model::contact::{Contact, ContactId, UNSAVED_CONTACT_ID};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::ContactService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
