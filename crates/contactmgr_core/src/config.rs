//! Application configuration.
//!
//! # Responsibility
//! - Load `contactmgr.toml` into typed database and logging settings.
//! - Supply defaults for every omitted key.
//!
//! # Invariants
//! - A missing default config file is not an error; a missing explicit one is.
//! - Relative database paths resolve against the config file's directory.

use crate::db::{DatabaseLocation, SchemaPolicy, MAX_BUSY_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "contactmgr.toml";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    InvalidValue(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::InvalidValue(message) => write!(f, "invalid config value: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `[database]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`.
    pub path: String,
    pub schema: SchemaPolicy,
    /// Log every contact statement's SQL at `info`.
    pub show_sql: bool,
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    pub const DEFAULT_PATH: &'static str = "contactmgr.db";
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

    /// In-memory settings with the given schema policy.
    pub fn in_memory(schema: SchemaPolicy) -> Self {
        Self {
            path: DatabaseLocation::MEMORY_PATH.to_string(),
            schema,
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: Self::DEFAULT_PATH.to_string(),
            schema: SchemaPolicy::default(),
            show_sql: false,
            busy_timeout_ms: Self::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// `[logging]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when omitted.
    pub level: Option<String>,
    /// Absolute directory for rolling log files; stderr when omitted.
    pub dir: Option<PathBuf>,
}

/// Loads configuration from `path`, or from [`DEFAULT_CONFIG_FILE`].
///
/// # Errors
/// - `Io` when an explicit `path` cannot be read.
/// - `Parse` on malformed TOML or unknown keys.
/// - `InvalidValue` when the database path is empty or the busy timeout is
///   larger than SQLite accepts.
pub fn load_config(path: Option<&Path>) -> ConfigResult<AppConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if !explicit && !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let mut config = parse_config(&contents)?;

    if let Some(base) = path.parent() {
        config.database.path = resolve_database_path(base, &config.database.path);
    }
    Ok(config)
}

/// Parses a config document without touching the filesystem.
pub fn parse_config(contents: &str) -> ConfigResult<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if config.database.path.trim().is_empty() {
        return Err(ConfigError::InvalidValue(
            "database.path cannot be empty".to_string(),
        ));
    }
    if config.database.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue(format!(
            "database.busy_timeout_ms must be <= {MAX_BUSY_TIMEOUT_MS}, got {}",
            config.database.busy_timeout_ms
        )));
    }
    Ok(config)
}

fn resolve_database_path(base: &Path, db_path: &str) -> String {
    let candidate = Path::new(db_path);
    if db_path.trim() == DatabaseLocation::MEMORY_PATH
        || candidate.is_absolute()
        || base.as_os_str().is_empty()
    {
        return db_path.to_string();
    }
    base.join(candidate).to_string_lossy().into_owned()
}
