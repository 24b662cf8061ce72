// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Scenario Harness
// Description: Builds the context and reporter for one live scenario.
// Purpose: Give every scenario the same setup, trace wiring, and teardown.
// Dependencies: reqres-system-tests, reqres-client
// ============================================================================

use std::error::Error;
use std::sync::Arc;

use reqres_client::TraceSinks;
use reqres_client::sink::FileLogSink;
use reqres_client::sink::LineFormat;
use reqres_system_tests::config::suite_config;
use reqres_system_tests::context::SuiteContext;
use reqres_system_tests::report::ScenarioMeta;
use reqres_system_tests::report::TestReporter;

/// Result type returned by every scenario.
pub type ScenarioResult = Result<(), Box<dyn Error>>;

/// Runs one scenario against the configured API.
///
/// Loads the session configuration (failing before any request when the API
/// key is missing), opens the per-test report directory, routes traces to
/// `exchange.log` and `attachments/`, runs `body`, and writes the summary
/// with the scenario's outcome. A failed summary write never hides the
/// scenario's own error.
pub fn run_scenario(
    test_name: &str,
    meta: ScenarioMeta,
    body: impl FnOnce(&mut TestReporter, &SuiteContext) -> ScenarioResult,
) -> ScenarioResult {
    let config = suite_config()?;
    let mut reporter = TestReporter::new(test_name, config.run_root())?.with_meta(meta);
    let log = FileLogSink::new(&reporter.root().join("exchange.log"), LineFormat::Text)?;
    let sinks = TraceSinks::new(Arc::new(log), reporter.attachments());
    let ctx = SuiteContext::new(config.connection().clone(), sinks)?;

    let outcome = body(&mut reporter, &ctx);
    reporter.conclude(&outcome)?;
    outcome
}
