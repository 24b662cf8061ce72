// system-tests/src/lib.rs
// ============================================================================
// Module: ReqRes System Tests Library
// Description: Shared configuration, fixtures, and checks for live scenarios.
// Purpose: Give every scenario binary one session config and one context type.
// Dependencies: reqres-client, reqres-contract, rand, serde, serde_jcs, url
// ============================================================================

//! ## Overview
//! This crate hosts everything the live scenario binaries in
//! `system-tests/tests` share: environment-backed connection settings, the
//! user fixture generator, the per-scenario [`context::SuiteContext`],
//! response checks, and the per-test reporter that writes summaries and
//! trace attachments.
//! Invariants:
//! - A missing or blank API key fails closed before any request is sent.
//! - Configuration is loaded once per process and replayed to every caller.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod config;
pub mod context;
pub mod fixtures;
pub mod report;
