// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Connection settings for the ReqRes system tests.
// Purpose: Provide typed, fail-closed access to environment settings.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Settings are read from the process environment, then from an optional
//! dotenv file, and mapped into [`SuiteConfig`]. The session-wide result is
//! cached by [`suite_config`] so every scenario sees the same value or the
//! same error.
//! Security posture: environment inputs are untrusted and the API key never
//! appears in `Debug` output.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod connection;
mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use connection::API_KEY_HEADER;
pub use connection::ApiKey;
pub use connection::ConnectionConfig;
pub use connection::DEFAULT_BASE_URL;
pub use connection::SuiteConfig;
pub use connection::connection_config;
pub use connection::suite_config;
pub use env::ConfigError;
pub use env::EnvSource;
pub use env::LayeredEnv;
pub use env::MapEnv;
pub use env::ProcessEnv;
pub use env::ReqresEnv;
pub use env::find_dotenv;
pub use env::read_env_nonempty;
pub use env::read_env_strict;
pub use env::session_env;
