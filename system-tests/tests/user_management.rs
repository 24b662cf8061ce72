// system-tests/tests/user_management.rs
// ============================================================================
// Module: User Management Suite
// Description: Aggregates user CRUD system tests into one binary.
// Purpose: Exercise /users endpoints against the live ReqRes API.
// Dependencies: suites/*, helpers
// ============================================================================

//! ## Overview
//! Aggregates user management system tests into one binary.
//! Invariants:
//! - A missing API key fails every scenario before any request is sent.
//! - Mutating scenarios target one fixed, pre-existing user id.

mod helpers;

#[path = "suites/user_management.rs"]
mod user_management;
