// system-tests/src/config/connection.rs
// ============================================================================
// Module: Connection Configuration
// Description: API key, base URL, and per-request headers for ReqRes.
// Purpose: Validate connection settings once and share them per session.
// Dependencies: url
// ============================================================================

//! ## Overview
//! [`SuiteConfig::load_from`] reads settings from any [`EnvSource`];
//! [`suite_config`] loads them once from [`session_env`] and caches the
//! outcome, success or failure, for the rest of the process.
//! Invariants:
//! - The API key is non-blank and never rendered by `Debug`.
//! - The base URL is absolute `http`/`https` without a trailing `/`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use url::Url;

use super::env::ConfigError;
use super::env::EnvSource;
use super::env::ReqresEnv;
use super::env::read_env_nonempty;
use super::env::session_env;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base URL used when [`ReqresEnv::BaseUrl`] is unset.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

// ============================================================================
// SECTION: Api Key
// ============================================================================

/// A non-blank API key whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecret`] when the key is blank.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingSecret(ReqresEnv::ApiKey.as_str().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the raw key for placement in request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// ============================================================================
// SECTION: Connection
// ============================================================================

/// Validated settings for talking to the ReqRes API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Credential sent as [`API_KEY_HEADER`].
    api_key: ApiKey,
    /// Absolute base URL without a trailing `/`.
    base_url: String,
}

impl ConnectionConfig {
    /// Validates a key and base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base URL is not an absolute
    /// `http`/`https` URL with a host.
    pub fn new(api_key: ApiKey, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Reads the connection settings from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecret`] when the API key is unset or
    /// blank, and [`ConfigError::Invalid`] for unusable values.
    pub fn from_env(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let key_name = ReqresEnv::ApiKey.as_str();
        let raw_key = source
            .get(key_name)?
            .ok_or_else(|| ConfigError::MissingSecret(key_name.to_string()))?;
        let api_key = ApiKey::new(&raw_key)?;
        let base_url = read_env_nonempty(source, ReqresEnv::BaseUrl.as_str())?;
        Self::new(api_key, base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the headers attached to every request.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(API_KEY_HEADER.to_string(), self.api_key.expose().to_string());
        headers
    }

    /// Joins a resource path such as `users/2` onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{path}", self.base_url)
    }
}

// ============================================================================
// SECTION: Suite Config
// ============================================================================

/// Everything a test session reads from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Connection settings.
    connection: ConnectionConfig,
    /// Optional report root override.
    run_root: Option<PathBuf>,
}

impl SuiteConfig {
    /// Reads the suite settings from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any setting is missing or invalid.
    pub fn load_from(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let connection = ConnectionConfig::from_env(source)?;
        let run_root = read_env_nonempty(source, ReqresEnv::RunRoot.as_str())?.map(PathBuf::from);
        Ok(Self {
            connection,
            run_root,
        })
    }

    /// Reads the suite settings from the process environment and dotenv file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any setting is missing or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&session_env()?)
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Returns the report root override, if any.
    #[must_use]
    pub fn run_root(&self) -> Option<&Path> {
        self.run_root.as_deref()
    }
}

/// Session-wide cache of the first load attempt.
static SUITE_CONFIG: OnceLock<Result<SuiteConfig, ConfigError>> = OnceLock::new();

/// Returns the session suite settings, loading them on first use.
///
/// # Errors
///
/// Returns the error from the first load attempt on every call.
pub fn suite_config() -> Result<&'static SuiteConfig, ConfigError> {
    load_once(&SUITE_CONFIG, SuiteConfig::load)
}

/// Runs `load` at most once per `cell` and replays its outcome afterwards.
///
/// A failed first load is cached too, so every later call sees the same error.
pub(crate) fn load_once<T>(
    cell: &OnceLock<Result<T, ConfigError>>,
    load: impl FnOnce() -> Result<T, ConfigError>,
) -> Result<&T, ConfigError> {
    cell.get_or_init(load).as_ref().map_err(Clone::clone)
}

/// Returns the session connection settings.
///
/// # Errors
///
/// Returns the error from the first load attempt on every call.
pub fn connection_config() -> Result<&'static ConnectionConfig, ConfigError> {
    suite_config().map(SuiteConfig::connection)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a base URL and trims trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let name = ReqresEnv::BaseUrl.as_str();
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|err| ConfigError::Invalid(format!("{name} `{trimmed}`: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!("{name} must use http or https")));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::Invalid(format!("{name} must include a host")));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::Invalid(format!("{name} must not carry a query or fragment")));
    }
    Ok(trimmed.to_string())
}
