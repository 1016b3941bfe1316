//! Configuration file loading with precedence handling.

use crate::model::{QuerySyntax, DEFAULT_PAYLOAD_FIELD};
use crate::source::{DEFAULT_LIMIT, DEFAULT_PROGRAM};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "GBANA_CONFIG";
/// Environment variable overriding the backend project.
pub const ENV_PROJECT: &str = "GBANA_PROJECT";
/// Environment variable overriding the result limit.
pub const ENV_LIMIT: &str = "GBANA_LIMIT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, path is a directory, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A key parsed but its value is out of range.
    #[error("Invalid value for '{key}' in {path}: {reason}")]
    InvalidValue {
        /// Path of the config file.
        path: PathBuf,
        /// Offending key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/gbana/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Backend program (e.g., "gcloud").
    #[serde(default)]
    pub program: Option<String>,

    /// Backend project passed as `--project`.
    #[serde(default)]
    pub project: Option<String>,

    /// Maximum number of records per search.
    #[serde(default)]
    pub limit: Option<usize>,

    /// Record field holding the display text (dotted paths allowed).
    #[serde(default)]
    pub payload_field: Option<String>,

    /// Spelling of the payload clause.
    #[serde(default)]
    pub query_syntax: Option<QuerySyntax>,

    /// Line wrapping enabled at startup.
    #[serde(default)]
    pub line_wrap: Option<bool>,

    /// Echo the generated query above results at startup.
    #[serde(default)]
    pub show_query: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Backend program to run.
    pub program: String,
    /// Project passed as `--project`, if any.
    pub project: Option<String>,
    /// Always at least 1.
    pub limit: usize,
    /// Payload field matched by the term clause.
    pub payload_field: String,
    /// How the term clause is spelled.
    pub query_syntax: QuerySyntax,
    /// Start with line wrapping on.
    pub line_wrap: bool,
    /// Start with the query echoed above results.
    pub show_query: bool,
    /// Where the log file is written.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            project: None,
            limit: DEFAULT_LIMIT,
            payload_field: DEFAULT_PAYLOAD_FIELD.to_string(),
            query_syntax: QuerySyntax::default(),
            line_wrap: true,
            show_query: false,
            log_file_path: default_log_path(),
        }
    }
}

/// Overrides taken from command-line flags. `None` leaves the value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Project to read logs from.
    pub project: Option<String>,
    /// Records per search.
    pub limit: Option<usize>,
    /// Initial wrap setting.
    pub line_wrap: Option<bool>,
    /// Initial query echo setting.
    pub show_query: Option<bool>,
    /// Term clause spelling.
    pub query_syntax: Option<QuerySyntax>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gbana/gbana.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gbana").join("gbana.log")
    } else {
        PathBuf::from("gbana.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/gbana/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gbana").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but cannot be read, is not valid TOML,
/// has unknown keys, or sets `limit = 0`.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    if config.limit == Some(0) {
        return Err(ConfigError::InvalidValue {
            path,
            key: "limit",
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GBANA_CONFIG` environment variable
/// 3. Default path `~/.config/gbana/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        program: config.program.unwrap_or(defaults.program),
        project: config.project.or(defaults.project),
        limit: config.limit.unwrap_or(defaults.limit),
        payload_field: config.payload_field.unwrap_or(defaults.payload_field),
        query_syntax: config.query_syntax.unwrap_or(defaults.query_syntax),
        line_wrap: config.line_wrap.unwrap_or(defaults.line_wrap),
        show_query: config.show_query.unwrap_or(defaults.show_query),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GBANA_PROJECT`: Override project
/// - `GBANA_LIMIT`: Override limit (ignored with a warning unless a positive integer)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(project) = std::env::var(ENV_PROJECT) {
        if !project.trim().is_empty() {
            config.project = Some(project);
        }
    }

    if let Ok(raw) = std::env::var(ENV_LIMIT) {
        match raw.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => config.limit = limit,
            _ => warn!(value = %raw, "Ignoring GBANA_LIMIT: not a positive integer"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(project) = overrides.project {
        config.project = Some(project);
    }
    if let Some(limit) = overrides.limit {
        config.limit = limit;
    }
    if let Some(line_wrap) = overrides.line_wrap {
        config.line_wrap = line_wrap;
    }
    if let Some(show_query) = overrides.show_query {
        config.show_query = show_query;
    }
    if let Some(syntax) = overrides.query_syntax {
        config.query_syntax = syntax;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
