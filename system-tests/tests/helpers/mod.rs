// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for the ReqRes system-tests.
// Purpose: Wire session config, traced client, and reporter per scenario.
// Dependencies: reqres-system-tests, reqres-client
// ============================================================================

//! ## Overview
//! Shared helpers for ReqRes system-tests.
//! Invariants:
//! - Scenarios never touch the network before configuration loads.
//! - Every scenario leaves a summary behind, pass or fail.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod harness;
