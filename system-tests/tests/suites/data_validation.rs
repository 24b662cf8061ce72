// system-tests/tests/suites/data_validation.rs
// ============================================================================
// Module: Data Validation Tests
// Description: Data-quality checks over user list responses.
// Purpose: Catch malformed records the structural contract does not pin.
// Dependencies: reqres-system-tests, reqres-contract
// ============================================================================

use reqres_contract::ContractName;
use reqres_system_tests::checks::CheckError;
use reqres_system_tests::checks::ensure_contract;
use reqres_system_tests::checks::ensure_emails_on_domain;
use reqres_system_tests::checks::ensure_status;
use reqres_system_tests::checks::json_body;
use reqres_system_tests::report::ScenarioMeta;
use reqres_system_tests::report::Severity;

use crate::helpers::harness::ScenarioResult;
use crate::helpers::harness::run_scenario;

/// Feature label for this suite.
const FEATURE: &str = "Data Validation";

/// Domain every demo user email is on.
const REQRES_EMAIL_SUFFIX: &str = "@reqres.in";

#[test]
fn user_list_contains_valid_email_format() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Verify email format in user list")
        .description("Every listed user has an email on the reqres.in domain.")
        .severity(Severity::Normal)
        .tags(&["regression", "validation", "positive"]);
    run_scenario("user_list_contains_valid_email_format", meta, |reporter, ctx| {
        let response =
            reporter.step("Send GET request to /users endpoint", || ctx.get("users"))?;
        reporter.step("Verify all emails have correct format", || -> Result<(), CheckError> {
            ensure_status(&response, 200)?;
            let body = json_body(&response)?;
            ensure_contract(&body, ContractName::UserList)?;
            ensure_emails_on_domain(&body, "/data", REQRES_EMAIL_SUFFIX)
        })?;
        Ok(())
    })
}
