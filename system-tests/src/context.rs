// system-tests/src/context.rs
// ============================================================================
// Module: Suite Context
// Description: Connection, traced client, and contracts for one scenario.
// Purpose: Pass one explicit context into scenarios instead of globals.
// Dependencies: reqres-client, reqres-contract, serde_json
// ============================================================================

//! ## Overview
//! A [`SuiteContext`] pairs the validated [`ConnectionConfig`] with an
//! [`InstrumentedClient`] bound to the scenario's sinks and the shared
//! contract registry. Every request goes to `base_url/path` and carries the
//! configured API key header.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqres_client::ApiResponse;
use reqres_client::HttpMethod;
use reqres_client::InstrumentedClient;
use reqres_client::TraceSinks;
use reqres_client::TransportError;
use reqres_contract::ContractName;
use reqres_contract::ContractRegistry;
use reqres_contract::SchemaValidationError;
use reqres_contract::contracts;
use serde_json::Value;

use crate::config::ConnectionConfig;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Everything a scenario needs to talk to the API.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    /// Validated connection settings.
    connection: ConnectionConfig,
    /// Traced HTTP client.
    client: InstrumentedClient,
    /// Canonical contracts.
    contracts: &'static ContractRegistry,
}

impl SuiteContext {
    /// Builds a context whose client reports to `sinks`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(connection: ConnectionConfig, sinks: TraceSinks) -> Result<Self, TransportError> {
        Ok(Self::with_client(connection, InstrumentedClient::new(sinks)?))
    }

    /// Builds a context around an existing client.
    #[must_use]
    pub fn with_client(connection: ConnectionConfig, client: InstrumentedClient) -> Self {
        Self {
            connection,
            client,
            contracts: contracts(),
        }
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Returns the traced client.
    #[must_use]
    pub const fn client(&self) -> &InstrumentedClient {
        &self.client
    }

    /// Returns the contract registry.
    #[must_use]
    pub const fn contracts(&self) -> &'static ContractRegistry {
        self.contracts
    }

    /// Returns the absolute URL for a resource path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        self.connection.endpoint(path)
    }

    /// Sends one traced request to `path` with the configured headers.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    pub fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, TransportError> {
        self.client.execute(method, &self.endpoint(path), &self.connection.headers(), body)
    }

    /// Sends `GET path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    pub fn get(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(HttpMethod::Get, path, None)
    }

    /// Sends `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    pub fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError> {
        self.send(HttpMethod::Post, path, Some(body))
    }

    /// Sends `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    pub fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError> {
        self.send(HttpMethod::Put, path, Some(body))
    }

    /// Sends `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    pub fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse, TransportError> {
        self.send(HttpMethod::Patch, path, Some(body))
    }

    /// Sends `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    pub fn delete(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(HttpMethod::Delete, path, None)
    }

    /// Validates `instance` against a named contract.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] listing every violation.
    pub fn validate(
        &self,
        instance: &Value,
        name: ContractName,
    ) -> Result<(), SchemaValidationError> {
        self.contracts.validate(instance, name)
    }
}
