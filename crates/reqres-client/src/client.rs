// crates/reqres-client/src/client.rs
// ============================================================================
// Module: Instrumented Client
// Description: Blocking HTTP client that traces every exchange.
// Purpose: Log request and response around exactly one network round trip.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! [`InstrumentedClient::execute`] validates the request, emits a
//! [`RequestTrace`], performs one blocking round trip, reads the body, emits a
//! [`ResponseTrace`], and returns the captured [`ApiResponse`] unmodified.
//! Invariants:
//! - No retries; network failures surface as [`TransportError`].
//! - No explicit timeout unless one is configured; the transport default applies.
//! - Redirects follow the transport default; the final URL is reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::TransportError;
use crate::method::HttpMethod;
use crate::sink::TraceSinks;
use crate::trace::RequestTrace;
use crate::trace::ResponseTrace;

// ============================================================================
// SECTION: Response
// ============================================================================

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Status code.
    status: u16,
    /// Response headers keyed by lower-case name; repeated values are joined with `, `.
    headers: BTreeMap<String, String>,
    /// Final URL after redirects.
    url: String,
    /// Raw body bytes.
    body: Vec<u8>,
    /// Time from dispatch until response headers arrived.
    elapsed: Duration,
}

impl ApiResponse {
    /// Assembles a response from already captured parts.
    ///
    /// Header names are lower-cased so [`ApiResponse::header`] lookups match.
    #[must_use]
    pub fn from_parts(
        status: u16,
        headers: BTreeMap<String, String>,
        url: impl Into<String>,
        body: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            url: url.into(),
            body,
            elapsed,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns one header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the final URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the time from dispatch until headers arrived.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the raw body.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as (lossy) UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns true when the body has no bytes.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.body.is_empty()
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Decodes the body as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the body is not valid JSON.
    pub fn json_value(&self) -> Result<Value, serde_json::Error> {
        self.json()
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP client that traces each exchange to injected sinks.
#[derive(Debug, Clone)]
pub struct InstrumentedClient {
    /// Underlying HTTP client.
    client: Client,
    /// Trace destinations.
    sinks: TraceSinks,
}

impl InstrumentedClient {
    /// Creates a client with transport defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(sinks: TraceSinks) -> Result<Self, TransportError> {
        Self::build(sinks, None)
    }

    /// Creates a client with an explicit overall request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when the HTTP client cannot be built.
    pub fn with_timeout(sinks: TraceSinks, timeout: Duration) -> Result<Self, TransportError> {
        Self::build(sinks, Some(timeout))
    }

    /// Wraps an existing `reqwest` blocking client.
    #[must_use]
    pub const fn with_client(client: Client, sinks: TraceSinks) -> Self {
        Self {
            client,
            sinks,
        }
    }

    /// Performs one traced HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the URL or headers are invalid (before
    /// any trace is emitted) or when the network round trip fails (after the
    /// request trace is emitted).
    pub fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&Value>,
    ) -> Result<ApiResponse, TransportError> {
        let parsed = parse_absolute_url(url)?;
        let header_map = build_header_map(headers)?;

        self.sinks.request(&RequestTrace::new(method, url, headers, body));

        let mut request = self.client.request(method.into(), parsed).headers(header_map);
        if let Some(body) = body {
            request = request.json(body);
        }
        let started = Instant::now();
        let response = request.send().map_err(|source| TransportError::Send {
            method,
            url: url.to_string(),
            source,
        })?;
        let elapsed = started.elapsed();

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let response_headers = collect_headers(response.headers());
        let bytes = response.bytes().map_err(|source| TransportError::ReadBody {
            url: final_url.clone(),
            source,
        })?;

        let captured = ApiResponse {
            status,
            headers: response_headers,
            url: final_url,
            body: bytes.to_vec(),
            elapsed,
        };
        self.sinks.response(&ResponseTrace::new(
            captured.status,
            &captured.headers,
            &captured.body,
            captured.elapsed,
            &captured.url,
        ));
        Ok(captured)
    }

    /// Builds the underlying client.
    fn build(sinks: TraceSinks, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| TransportError::ClientBuild(err.to_string()))?;
        Ok(Self::with_client(client, sinks))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses `url` and requires an absolute `http`/`https` URL with a host.
fn parse_absolute_url(url: &str) -> Result<Url, TransportError> {
    let invalid = |reason: &str| TransportError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let parsed = Url::parse(url).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("host required"));
    }
    Ok(parsed)
}

/// Converts caller headers into a wire header map.
fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| TransportError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|err| TransportError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Flattens response headers, joining repeated values.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flattened: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let text = String::from_utf8_lossy(value.as_bytes()).into_owned();
        if let Some(existing) = flattened.get_mut(name.as_str()) {
            existing.push_str(", ");
            existing.push_str(&text);
        } else {
            flattened.insert(name.as_str().to_string(), text);
        }
    }
    flattened
}
