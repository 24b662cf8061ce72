// crates/reqres-contract/src/lib.rs
// ============================================================================
// Module: ReqRes Contract Library
// Description: Typed structural contracts for ReqRes request and response bodies.
// Purpose: Provide one immutable registry used for pre- and post-condition checks.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Contracts are declarative [`Shape`] trees describing required keys, value
//! types, string formats, and nested array/object shapes. A single recursive
//! matcher walks a JSON instance against a shape and reports every violation
//! it finds, each tagged with the JSON pointer of the offending value.
//!
//! The [`ContractRegistry`] is built once and never mutated, so it can be
//! shared freely across concurrently running tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod matcher;
pub mod registry;
pub mod schemas;
pub mod shape;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::fmt;

use thiserror::Error;

/// Errors raised when a JSON instance does not satisfy its contract.
///
/// # Invariants
/// - `violations` is never empty.
/// - Violations are ordered by traversal (depth-first, declaration order).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{contract}` contract violated: {}", ViolationList(.violations))]
pub struct SchemaValidationError {
    /// Contract that rejected the instance.
    pub contract: ContractName,
    /// Every structural violation found.
    pub violations: Vec<Violation>,
}

/// Errors raised by registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// No contract is registered under the requested label.
    #[error("unknown contract: {0}")]
    UnknownContract(String),
}

/// Display adapter joining violations with `; `.
struct ViolationList<'a>(&'a [Violation]);

impl fmt::Display for ViolationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use matcher::Violation;
pub use matcher::ViolationKind;
pub use matcher::check;
pub use registry::Contract;
pub use registry::ContractName;
pub use registry::ContractRegistry;
pub use registry::contracts;
pub use shape::Field;
pub use shape::ObjectShape;
pub use shape::Shape;
pub use shape::StringFormat;

// ============================================================================
// SECTION: Validation Entry Point
// ============================================================================

/// Validates `instance` against `contract`.
///
/// # Errors
///
/// Returns [`SchemaValidationError`] listing every missing key, wrong type,
/// or malformed nested shape when the instance does not conform.
pub fn validate(
    instance: &serde_json::Value,
    contract: &Contract,
) -> Result<(), SchemaValidationError> {
    contract.validate(instance)
}
