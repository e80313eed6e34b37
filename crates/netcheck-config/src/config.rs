// crates/netcheck-config/src/config.rs
// ============================================================================
// Module: Netcheck Configuration
// Description: Configuration loading and validation for netcheck runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: netcheck-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; unknown keys are rejected.
//!
//! ```toml
//! [index]
//! replace = { TestNapalmUsers = "site.checks.users" }
//!
//! [logging]
//! sink = "file"
//! path = "netcheck-events.jsonl"
//!
//! [backend]
//! fixture = "fixtures/lab.json"
//! inventory = ["R1", "R2"]
//!
//! [limits]
//! max_bundle_bytes = 1048576
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use netcheck_core::FileEventSink;
use netcheck_core::ModuleIndex;
use netcheck_core::NoopEventSink;
use netcheck_core::RunEventSink;
use netcheck_core::StderrEventSink;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "netcheck.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "NETCHECK_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum bundle file size in bytes.
const DEFAULT_MAX_BUNDLE_BYTES: usize = 1024 * 1024;
/// Default maximum backend fixture size in bytes.
const DEFAULT_MAX_FIXTURE_BYTES: usize = 8 * 1024 * 1024;
/// Hard ceiling for any configurable input limit.
pub(crate) const MAX_INPUT_LIMIT_BYTES: usize = 64 * 1024 * 1024;
/// Maximum number of index replacement entries.
pub(crate) const MAX_INDEX_ENTRIES: usize = 4096;
/// Maximum length of a class name or module location.
pub(crate) const MAX_INDEX_NAME_LENGTH: usize = 256;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Netcheck configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetcheckConfig {
    /// Class-name index overrides.
    #[serde(default)]
    pub index: IndexConfig,
    /// Run event logging.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Backend fixture settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Input size limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl NetcheckConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from the argument, then from `NETCHECK_CONFIG`,
    /// then `netcheck.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when nothing names a file.
    ///
    /// Defaults apply only when no path is given, `NETCHECK_CONFIG` is unset,
    /// and `netcheck.toml` does not exist. An explicitly named file must load.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a named file fails to load or validate.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none()
            && env::var_os(CONFIG_ENV_VAR).is_none()
            && !Path::new(DEFAULT_CONFIG_NAME).exists()
        {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.index.validate()?;
        self.logging.validate()?;
        self.backend.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

/// Class-name index overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Replacement table; when present it supersedes the built-in index.
    #[serde(default)]
    pub replace: Option<BTreeMap<String, String>>,
}

impl IndexConfig {
    /// Returns the replacement index, or `default` when none is configured.
    #[must_use]
    pub fn module_index(&self, default: ModuleIndex) -> ModuleIndex {
        self.replace.as_ref().map_or(default, |entries| {
            entries.iter().map(|(class, module)| (class.as_str(), module.as_str())).collect()
        })
    }

    /// Validates replacement entries.
    fn validate(&self) -> Result<(), ConfigError> {
        let Some(entries) = &self.replace else {
            return Ok(());
        };
        if entries.len() > MAX_INDEX_ENTRIES {
            return Err(ConfigError::Invalid("index.replace has too many entries".to_string()));
        }
        for (class, module) in entries {
            validate_name("index.replace class name", class)?;
            validate_name("index.replace module location", module)?;
        }
        Ok(())
    }
}

/// Destination of run events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Events are discarded.
    None,
}

/// Run event logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Event destination.
    #[serde(default)]
    pub sink: EventSinkKind,
    /// Event file path (required for the file sink).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the configured event sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the event file cannot be opened and
    /// [`ConfigError::Invalid`] when the file sink has no path.
    pub fn build_sink(&self) -> Result<Arc<dyn RunEventSink>, ConfigError> {
        match self.sink {
            EventSinkKind::Stderr => Ok(Arc::new(StderrEventSink)),
            EventSinkKind::None => Ok(Arc::new(NoopEventSink)),
            EventSinkKind::File => {
                let path = self.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("logging.path required for file sink".to_string())
                })?;
                let sink =
                    FileEventSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }

    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (EventSinkKind::File, None) => {
                Err(ConfigError::Invalid("logging.path required for file sink".to_string()))
            }
            (EventSinkKind::File, Some(path)) => {
                validate_path_string("logging.path", &path.to_string_lossy())
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("logging.path only applies to the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

/// Backend fixture configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// JSON fixture with canned task outcomes.
    #[serde(default)]
    pub fixture: Option<PathBuf>,
    /// Extra inventory hosts without canned outcomes.
    #[serde(default)]
    pub inventory: Vec<String>,
}

impl BackendConfig {
    /// Validates fixture and inventory entries.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fixture) = &self.fixture {
            validate_path_string("backend.fixture", &fixture.to_string_lossy())?;
        }
        for host in &self.inventory {
            validate_name("backend.inventory host", host)?;
        }
        Ok(())
    }
}

/// Input size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum bundle file size in bytes.
    #[serde(default = "default_max_bundle_bytes")]
    pub max_bundle_bytes: usize,
    /// Maximum backend fixture size in bytes.
    #[serde(default = "default_max_fixture_bytes")]
    pub max_fixture_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_bundle_bytes: DEFAULT_MAX_BUNDLE_BYTES,
            max_fixture_bytes: DEFAULT_MAX_FIXTURE_BYTES,
        }
    }
}

impl LimitsConfig {
    /// Validates limits are within bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("limits.max_bundle_bytes", self.max_bundle_bytes),
            ("limits.max_fixture_bytes", self.max_fixture_bytes),
        ];
        for (field, value) in limits {
            if value == 0 || value > MAX_INPUT_LIMIT_BYTES {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be between 1 and {MAX_INPUT_LIMIT_BYTES}"
                )));
            }
        }
        Ok(())
    }
}

/// Default bundle size limit.
const fn default_max_bundle_bytes() -> usize {
    DEFAULT_MAX_BUNDLE_BYTES
}

/// Default fixture size limit.
const fn default_max_fixture_bytes() -> usize {
    DEFAULT_MAX_FIXTURE_BYTES
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a short identifier string.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_INDEX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
