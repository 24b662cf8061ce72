// system-tests/src/checks.rs
// ============================================================================
// Module: Response Checks
// Description: Typed assertion helpers for scenario steps.
// Purpose: Turn status, body, and contract mismatches into readable errors.
// Dependencies: reqres-client, reqres-contract, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Scenarios return `Result` and use these helpers with `?` instead of
//! panicking, so a failed expectation ends the scenario with a message that
//! names the URL, field, or contract involved. Field lookups use JSON
//! pointers such as `/data/id`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqres_client::ApiResponse;
use reqres_contract::ContractName;
use reqres_contract::SchemaValidationError;
use reqres_contract::contracts;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A failed scenario expectation.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The status code differs from the expected one.
    #[error("expected status {expected} from {url}, got {actual}")]
    Status {
        /// Expected status.
        expected: u16,
        /// Observed status.
        actual: u16,
        /// Request URL.
        url: String,
    },
    /// The body could not be decoded as JSON.
    #[error("response from {url} is not JSON: {reason}")]
    NotJson {
        /// Request URL.
        url: String,
        /// Decoder message.
        reason: String,
    },
    /// A pointer resolved to nothing.
    #[error("missing field `{0}`")]
    MissingField(String),
    /// A field holds the wrong value.
    #[error("field `{pointer}`: expected {expected}, got {actual}")]
    FieldMismatch {
        /// JSON pointer of the field.
        pointer: String,
        /// Expected value rendered as JSON.
        expected: String,
        /// Observed value rendered as JSON.
        actual: String,
    },
    /// A field that must be a non-empty string is not.
    #[error("field `{0}` must be a non-empty string")]
    BlankField(String),
    /// A body that must be empty is not.
    #[error("expected an empty body from {url}, got {len} bytes")]
    NonEmptyBody {
        /// Request URL.
        url: String,
        /// Body length in bytes.
        len: usize,
    },
    /// A payload violated its contract.
    #[error(transparent)]
    Contract(#[from] SchemaValidationError),
    /// A free-form expectation failed.
    #[error("{0}")]
    Failed(String),
}

// ============================================================================
// SECTION: Response Checks
// ============================================================================

/// Requires `response` to carry `expected` as its status.
///
/// # Errors
///
/// Returns [`CheckError::Status`] on mismatch.
pub fn ensure_status(response: &ApiResponse, expected: u16) -> Result<(), CheckError> {
    if response.status() == expected {
        return Ok(());
    }
    Err(CheckError::Status {
        expected,
        actual: response.status(),
        url: response.url().to_string(),
    })
}

/// Decodes the response body as JSON.
///
/// # Errors
///
/// Returns [`CheckError::NotJson`] when the body is not valid JSON.
pub fn json_body(response: &ApiResponse) -> Result<Value, CheckError> {
    response.json_value().map_err(|err| CheckError::NotJson {
        url: response.url().to_string(),
        reason: err.to_string(),
    })
}

/// Requires the response body to be empty.
///
/// # Errors
///
/// Returns [`CheckError::NonEmptyBody`] when any bytes were returned.
pub fn ensure_empty_body(response: &ApiResponse) -> Result<(), CheckError> {
    if response.is_empty_body() {
        return Ok(());
    }
    Err(CheckError::NonEmptyBody {
        url: response.url().to_string(),
        len: response.bytes().len(),
    })
}

// ============================================================================
// SECTION: Body Checks
// ============================================================================

/// Resolves a JSON pointer inside `body`.
///
/// # Errors
///
/// Returns [`CheckError::MissingField`] when nothing is at `pointer`.
pub fn field<'a>(body: &'a Value, pointer: &str) -> Result<&'a Value, CheckError> {
    body.pointer(pointer).ok_or_else(|| CheckError::MissingField(pointer.to_string()))
}

/// Requires the value at `pointer` to equal `expected`.
///
/// # Errors
///
/// Returns [`CheckError::MissingField`] or [`CheckError::FieldMismatch`].
pub fn ensure_field_eq(body: &Value, pointer: &str, expected: &Value) -> Result<(), CheckError> {
    let actual = field(body, pointer)?;
    if actual == expected {
        return Ok(());
    }
    Err(CheckError::FieldMismatch {
        pointer: pointer.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Returns the string at `pointer`, requiring it to be non-blank.
///
/// # Errors
///
/// Returns [`CheckError::MissingField`] or [`CheckError::BlankField`].
pub fn non_empty_str<'a>(body: &'a Value, pointer: &str) -> Result<&'a str, CheckError> {
    match field(body, pointer)?.as_str() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CheckError::BlankField(pointer.to_string())),
    }
}

/// Returns the array at `pointer`, requiring at least one element.
///
/// # Errors
///
/// Returns [`CheckError::MissingField`] when the pointer does not resolve and
/// [`CheckError::Failed`] when the value is not an array or is empty.
pub fn non_empty_array<'a>(body: &'a Value, pointer: &str) -> Result<&'a [Value], CheckError> {
    match field(body, pointer)?.as_array() {
        Some(items) if !items.is_empty() => Ok(items),
        Some(_) => Err(CheckError::Failed(format!("field `{pointer}` is an empty array"))),
        None => Err(CheckError::Failed(format!("field `{pointer}` is not an array"))),
    }
}

/// Requires every record in the array at `pointer` to carry an `email` on
/// the `@domain` suffix.
///
/// # Errors
///
/// Returns [`CheckError`] when the array is missing or empty, or names the
/// first record whose email is absent or malformed.
pub fn ensure_emails_on_domain(
    body: &Value,
    pointer: &str,
    suffix: &str,
) -> Result<(), CheckError> {
    for (index, record) in non_empty_array(body, pointer)?.iter().enumerate() {
        let email = record.get("email").and_then(Value::as_str).unwrap_or_default();
        let local = email.strip_suffix(suffix).unwrap_or_default();
        ensure(!local.is_empty() && !local.contains('@'), || {
            format!("{pointer}/{index} has malformed email `{email}`")
        })?;
    }
    Ok(())
}

/// Validates `body` against a registered contract.
///
/// # Errors
///
/// Returns [`CheckError::Contract`] listing every violation.
pub fn ensure_contract(body: &Value, name: ContractName) -> Result<(), CheckError> {
    contracts().validate(body, name).map_err(CheckError::from)
}

/// Requires `condition`, building the failure message lazily.
///
/// # Errors
///
/// Returns [`CheckError::Failed`] when `condition` is false.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), CheckError> {
    if condition { Ok(()) } else { Err(CheckError::Failed(message())) }
}
