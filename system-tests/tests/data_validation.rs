// system-tests/tests/data_validation.rs
// ============================================================================
// Module: Data Validation Suite
// Description: Aggregates data-quality system tests into one binary.
// Purpose: Check invariants that hold across API responses.
// Dependencies: suites/*, helpers
// ============================================================================

//! ## Overview
//! Aggregates data validation system tests into one binary.
//! Invariants:
//! - A missing API key fails every scenario before any request is sent.

mod helpers;

#[path = "suites/data_validation.rs"]
mod data_validation;
