// crates/reqres-client/src/trace.rs
// ============================================================================
// Module: Exchange Traces
// Description: Ephemeral records of one side of an HTTP exchange.
// Purpose: Render request and response records for logs and report attachments.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Traces are built per call, handed to the sinks, and dropped. Sensitive
//! header values are redacted before a trace is built so secrets never reach
//! a log line or attachment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::method::HttpMethod;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header names whose values are replaced in traces (compared lower-case).
pub const REDACTED_HEADERS: &[&str] = &["x-api-key", "authorization", "cookie", "set-cookie"];

/// Replacement text for redacted header values.
pub const REDACTED_VALUE: &str = "***";

// ============================================================================
// SECTION: Trace Types
// ============================================================================

/// Response body as captured for observability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TraceBody {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that was empty or not valid JSON, kept as (lossy UTF-8) text.
    Text(String),
}

impl TraceBody {
    /// Parses a body, falling back to raw text when it is not JSON.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes)
            .map_or_else(|_| Self::Text(String::from_utf8_lossy(bytes).into_owned()), Self::Json)
    }
}

/// Outgoing request record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestTrace {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Request headers with sensitive values redacted.
    pub headers: BTreeMap<String, String>,
    /// JSON body when one is sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestTrace {
    /// Builds a request trace, redacting sensitive headers.
    #[must_use]
    pub fn new(
        method: HttpMethod,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&Value>,
    ) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: redact_headers(headers),
            body: body.cloned(),
        }
    }

    /// Attachment name for the report sink.
    #[must_use]
    pub const fn attachment_name(&self) -> &'static str {
        "Request"
    }

    /// Single log line describing the request.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!("{} | {}", self.method, self.url)
    }
}

/// Incoming response record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseTrace {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers with sensitive values redacted.
    pub headers: BTreeMap<String, String>,
    /// Parsed or raw body.
    pub body: TraceBody,
    /// Elapsed time rendered as seconds with two decimals, e.g. `0.42s`.
    pub elapsed_time: String,
    /// Final response URL.
    #[serde(skip)]
    pub url: String,
}

impl ResponseTrace {
    /// Builds a response trace from captured response parts.
    #[must_use]
    pub fn new(
        status_code: u16,
        headers: &BTreeMap<String, String>,
        body: &[u8],
        elapsed: Duration,
        url: &str,
    ) -> Self {
        Self {
            status_code,
            headers: redact_headers(headers),
            body: TraceBody::from_bytes(body),
            elapsed_time: format_elapsed(elapsed),
            url: url.to_string(),
        }
    }

    /// Attachment name for the report sink, e.g. `Response [200]`.
    #[must_use]
    pub fn attachment_name(&self) -> String {
        format!("Response [{}]", self.status_code)
    }

    /// Single log line describing the response.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!("Status: {} | Time: {} | URL: {}", self.status_code, self.elapsed_time, self.url)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a duration as seconds with two decimals.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

/// Copies headers, replacing values of [`REDACTED_HEADERS`].
#[must_use]
pub fn redact_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let lowered = name.to_ascii_lowercase();
            if REDACTED_HEADERS.contains(&lowered.as_str()) {
                (name.clone(), REDACTED_VALUE.to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
