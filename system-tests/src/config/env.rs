// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment sources for the ReqRes system tests.
// Purpose: Centralize env parsing with strict UTF-8 and dotenv layering.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. Lookups go through
//! [`EnvSource`] so tests can supply a [`MapEnv`] instead of mutating the
//! process environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReqresEnv {
    /// Required API key sent as `x-api-key`.
    ApiKey,
    /// Optional base URL override.
    BaseUrl,
    /// Optional run root override for reports.
    RunRoot,
    /// Optional dotenv file path.
    EnvFile,
}

impl ReqresEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "REQRES_PUBLIC_KEY",
            Self::BaseUrl => "REQRES_BASE_URL",
            Self::RunRoot => "REQRES_SYSTEM_TEST_RUN_ROOT",
            Self::EnvFile => "REQRES_ENV_FILE",
        }
    }
}

/// Dotenv file name searched for when [`ReqresEnv::EnvFile`] is unset.
const DEFAULT_ENV_FILE: &str = ".env";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration failures. All of them are fatal for the test session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required secret is unset or blank.
    #[error("{0} is required but is unset or empty")]
    MissingSecret(String),
    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// A configuration file could not be read.
    #[error("configuration io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Sources
// ============================================================================

/// A lookup of configuration values by name.
pub trait EnvSource {
    /// Returns the raw value for `name`, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value cannot be decoded.
    fn get(&self, name: &str) -> Result<Option<String>, ConfigError>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Result<Option<String>, ConfigError> {
        read_env_strict(name)
    }
}

/// An in-memory set of values, used for dotenv files and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapEnv {
    /// Values keyed by variable name.
    values: BTreeMap<String, String>,
}

impl MapEnv {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing any previous one.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns the number of values held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no values are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses dotenv text: `KEY=VALUE` lines, `#` comments, optional
    /// `export ` prefixes, and optionally quoted values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming `origin` and the line number of
    /// the first malformed line.
    pub fn parse_dotenv(origin: &str, text: &str) -> Result<Self, ConfigError> {
        let mut values = BTreeMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").map_or(line, str::trim_start);
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Invalid(format!(
                    "{origin}:{}: expected KEY=VALUE",
                    index + 1
                )));
            };
            let key = key.trim();
            if !is_env_key(key) {
                return Err(ConfigError::Invalid(format!(
                    "{origin}:{}: invalid variable name `{key}`",
                    index + 1
                )));
            }
            values.insert(key.to_string(), dotenv_value(value.trim()).to_string());
        }
        Ok(Self {
            values,
        })
    }

    /// Reads and parses a dotenv file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Invalid`] when it is malformed.
    pub fn load_dotenv(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::parse_dotenv(&path.display().to_string(), &text)
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.values.get(name).cloned())
    }
}

/// Two sources consulted in order; the primary wins when it has a value.
#[derive(Debug, Clone, Default)]
pub struct LayeredEnv<P, F> {
    /// Consulted first.
    primary: P,
    /// Consulted when the primary has no value.
    fallback: F,
}

impl<P: EnvSource, F: EnvSource> LayeredEnv<P, F> {
    /// Layers `primary` over `fallback`.
    #[must_use]
    pub const fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
        }
    }
}

impl<P: EnvSource, F: EnvSource> EnvSource for LayeredEnv<P, F> {
    fn get(&self, name: &str) -> Result<Option<String>, ConfigError> {
        match self.primary.get(name)? {
            Some(value) => Ok(Some(value)),
            None => self.fallback.get(name),
        }
    }
}

/// Builds the session source: the process environment over the dotenv file.
///
/// The dotenv path comes from [`ReqresEnv::EnvFile`]; an explicitly named
/// file must exist. Without it, the nearest `.env` in the working directory
/// or one of its ancestors is used, and none is fine.
///
/// # Errors
///
/// Returns [`ConfigError`] when the dotenv file cannot be read or parsed.
pub fn session_env() -> Result<LayeredEnv<ProcessEnv, MapEnv>, ConfigError> {
    let dotenv = match read_env_nonempty(&ProcessEnv, ReqresEnv::EnvFile.as_str())? {
        Some(path) => MapEnv::load_dotenv(&PathBuf::from(path))?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|err| ConfigError::Io(format!("working directory: {err}")))?;
            match find_dotenv(&cwd) {
                Some(path) => MapEnv::load_dotenv(&path)?,
                None => MapEnv::new(),
            }
        }
    };
    Ok(LayeredEnv::new(ProcessEnv, dotenv))
}

/// Returns the nearest `.env` file in `start` or one of its ancestors.
#[must_use]
pub fn find_dotenv(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(DEFAULT_ENV_FILE)).find(|path| path.is_file())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads a value from `source` and rejects blank values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
pub fn read_env_nonempty(
    source: &impl EnvSource,
    name: &str,
) -> Result<Option<String>, ConfigError> {
    match source.get(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`.
fn is_env_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Extracts a dotenv value: quoted values end at the closing quote, unquoted
/// values end before a whitespace-preceded `#` comment.
fn dotenv_value(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(rest) = raw.strip_prefix(quote)
            && let Some(end) = rest.find(quote)
        {
            return &rest[..end];
        }
    }
    let comment = raw
        .char_indices()
        .find(|&(index, ch)| ch == '#' && raw[..index].ends_with(char::is_whitespace))
        .map_or(raw.len(), |(index, _)| index);
    raw[..comment].trim_end()
}
