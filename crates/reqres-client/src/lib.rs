// crates/reqres-client/src/lib.rs
// ============================================================================
// Module: ReqRes Client Library
// Description: Instrumented HTTP client with request/response tracing.
// Purpose: Perform one logged round trip per call without hidden global state.
// Dependencies: reqwest, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! [`InstrumentedClient`] wraps a blocking `reqwest` client. Every call emits a
//! [`RequestTrace`] before dispatch and a [`ResponseTrace`] after the body is
//! read, each to an injected [`LogSink`] and [`ReportSink`]. Transport
//! failures propagate unchanged; trace rendering failures never abort a call.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod method;
pub mod sink;
pub mod trace;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised while preparing or performing an HTTP exchange.
///
/// # Invariants
/// - No variant is produced by trace emission; sinks are best-effort.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The method label is not one of GET, POST, PUT, PATCH, DELETE.
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),
    /// The URL is not an absolute `http`/`https` URL.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl {
        /// URL as supplied by the caller.
        url: String,
        /// Parse or policy failure.
        reason: String,
    },
    /// A header name or value cannot be sent on the wire.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name as supplied.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    ClientBuild(String),
    /// The request failed before a response arrived.
    #[error("{method} {url} failed: {source}")]
    Send {
        /// Request method.
        method: method::HttpMethod,
        /// Request URL.
        url: String,
        /// Network-level cause (timeout, refused connection, DNS failure).
        source: reqwest::Error,
    },
    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    ReadBody {
        /// Final response URL.
        url: String,
        /// Underlying read failure.
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Returns true when the failure happened on the network rather than in
    /// request preparation.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Send { .. } | Self::ReadBody { .. })
    }
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiResponse;
pub use client::InstrumentedClient;
pub use method::HttpMethod;
pub use sink::Attachment;
pub use sink::AttachmentType;
pub use sink::LogLevel;
pub use sink::LogRecord;
pub use sink::LogSink;
pub use sink::ReportSink;
pub use sink::TraceSinks;
pub use trace::RequestTrace;
pub use trace::ResponseTrace;
pub use trace::TraceBody;
