use core::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::utils::{get_config_dir, get_data_dir};
use log::debug;

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_DATABASE_FILE: &str = "history.db";

/// Number of rows fetched for a search when neither the command line nor the
/// config file sets a limit.
pub const DEFAULT_LIMIT: usize = 100;

/// Represents the main application configuration structure.
///
/// Holds settings related to different parts of the application.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub history: HistoryConfig,
    pub search: SearchConfig,
}

/// Configuration settings specific to the database.
///
/// Allows specifying the directory path and filename for the database.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub database_path: Option<PathBuf>,
    pub database_file: Option<String>,
}

/// Settings for what gets recorded and how long it is kept.
///
/// * `retention_days`: records older than this many days are removed by `retour prune`.
/// * `exclusion_patterns`: command lines starting with any of these are never recorded.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub retention_days: Option<u32>,
    pub exclusion_patterns: Vec<String>,
}

/// Defaults for `retour search`, overridden by command line flags.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub limit: Option<usize>,
}

/// Errors raised while locating, reading or validating the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    NotFound(PathBuf),
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file {} does not exist", path.display()),
            Self::Io(path, err) => write!(f, "failed to read config file {}: {err}", path.display()),
            Self::Parse(path, err) => {
                write!(f, "failed to decode config file {}: {err}", path.display())
            }
            Self::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Parse(_, err) => Some(err),
            Self::NotFound(_) | Self::Invalid(_) => None,
        }
    }
}

impl Config {
    /// Full path of the sqlite database file described by this config.
    #[must_use]
    pub fn database_file_path(&self) -> PathBuf {
        let dir = self
            .database
            .database_path
            .clone()
            .unwrap_or_else(get_data_dir);
        let file = self
            .database
            .database_file
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_FILE);
        dir.join(file)
    }

    /// The configured search limit, or [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn search_limit(&self) -> usize {
        self.search.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Checks values that deserialize fine but make no sense at runtime.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.limit == Some(0) {
            return Err(ConfigError::Invalid(String::from(
                "search.limit must be greater than 0",
            )));
        }
        if self.history.retention_days == Some(0) {
            return Err(ConfigError::Invalid(String::from(
                "history.retention_days must be greater than 0",
            )));
        }
        if self
            .database
            .database_file
            .as_deref()
            .is_some_and(|file| file.trim().is_empty())
        {
            return Err(ConfigError::Invalid(String::from(
                "database.database_file must not be empty",
            )));
        }
        if self
            .history
            .exclusion_patterns
            .iter()
            .any(|pattern| pattern.is_empty())
        {
            return Err(ConfigError::Invalid(String::from(
                "history.exclusion_patterns must not contain empty patterns",
            )));
        }
        Ok(())
    }
}

impl HistoryConfig {
    /// Whether `command_line` matches one of the exclusion patterns and should not be recorded.
    #[must_use]
    pub fn is_excluded(&self, command_line: &str) -> bool {
        let command_line = command_line.trim_start();
        self.exclusion_patterns
            .iter()
            .any(|pattern| command_line.starts_with(pattern.as_str()))
    }
}

/// Loads the application configuration.
///
/// When `path` is `None` the file is looked up as `config.toml` in the
/// platform-specific configuration directory retrieved via `get_config_dir()`,
/// and a missing file yields a default `Config`. An explicitly provided path
/// must exist.
///
/// # Errors
/// - [`ConfigError::NotFound`] if an explicit `path` does not exist.
/// - [`ConfigError::Io`] / [`ConfigError::Parse`] if the file cannot be read or decoded.
/// - [`ConfigError::Invalid`] if the decoded values fail validation.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(ConfigError::NotFound(explicit.to_path_buf()));
            }
            explicit.to_path_buf()
        }
        None => {
            let default_path = get_config_dir().join(CONFIG_FILE);
            if !default_path.exists() {
                debug!("Could not find config at supported paths, using default config.");
                return Ok(Config::default());
            }
            default_path
        }
    };

    debug!("loading config from {}", config_path.display());
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|err| ConfigError::Io(config_path.clone(), err))?;
    let config: Config =
        toml::from_str(&config_str).map_err(|err| ConfigError::Parse(config_path, err))?;

    config.validate()?;
    Ok(config)
}
