// system-tests/tests/suites/registration.rs
// ============================================================================
// Module: Registration Tests
// Description: Positive and negative registration scenarios.
// Purpose: Pin the POST /register contract for valid and incomplete input.
// Dependencies: reqres-system-tests, reqres-contract, serde_json
// ============================================================================

//! ## Overview
//! Registration succeeds only for the well-known demo identity; omitting
//! either credential yields a 400 with a fixed error message.

use reqres_contract::ContractName;
use reqres_system_tests::checks::CheckError;
use reqres_system_tests::checks::ensure;
use reqres_system_tests::checks::ensure_contract;
use reqres_system_tests::checks::ensure_field_eq;
use reqres_system_tests::checks::ensure_status;
use reqres_system_tests::checks::field;
use reqres_system_tests::checks::json_body;
use reqres_system_tests::checks::non_empty_str;
use reqres_system_tests::context::SuiteContext;
use reqres_system_tests::fixtures::VALID_USER_EMAIL;
use reqres_system_tests::fixtures::VALID_USER_PASSWORD;
use reqres_system_tests::report::ScenarioMeta;
use reqres_system_tests::report::Severity;
use reqres_system_tests::report::TestReporter;
use serde_json::Value;
use serde_json::json;

use crate::helpers::harness::ScenarioResult;
use crate::helpers::harness::run_scenario;

/// Feature label for this suite.
const FEATURE: &str = "User Registration";

#[test]
fn register_user() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Successfully register user with valid credentials")
        .description("A user can register with the demo email and password.")
        .severity(Severity::Critical)
        .tags(&["smoke", "registration", "positive"]);
    run_scenario("register_user", meta, |reporter, ctx| {
        let request = reporter.step(
            &format!("Prepare registration data with email={VALID_USER_EMAIL}"),
            || -> Result<Value, CheckError> {
                let request = json!({
                    "email": VALID_USER_EMAIL,
                    "password": VALID_USER_PASSWORD,
                });
                ensure_contract(&request, ContractName::RegisterRequest)?;
                Ok(request)
            },
        )?;
        let response = reporter
            .step("Send POST request to /register endpoint", || ctx.post("register", &request))?;
        reporter.step("Verify response", || -> Result<(), CheckError> {
            ensure_status(&response, 200)?;
            let body = json_body(&response)?;
            non_empty_str(&body, "/token")?;
            ensure(!field(&body, "/id")?.is_null(), || "registration id is null".to_string())?;
            ensure_contract(&body, ContractName::RegisterSuccess)
        })?;
        Ok(())
    })
}

#[test]
fn register_user_missing_password() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Registration without password returns 400 error")
        .description("Registration without a password is rejected with an error message.")
        .severity(Severity::Critical)
        .tags(&["regression", "registration", "negative"]);
    run_scenario("register_user_missing_password", meta, |reporter, ctx| {
        rejected_registration(
            reporter,
            ctx,
            &json!({"email": VALID_USER_EMAIL}),
            "Missing password",
        )
    })
}

#[test]
fn register_user_missing_email() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Registration without email returns 400 error")
        .description("Registration without an email is rejected with an error message.")
        .severity(Severity::Critical)
        .tags(&["regression", "registration", "negative"]);
    run_scenario("register_user_missing_email", meta, |reporter, ctx| {
        rejected_registration(
            reporter,
            ctx,
            &json!({"password": VALID_USER_PASSWORD}),
            "Missing email or username",
        )
    })
}

/// Posts an incomplete registration and expects a 400 with `message`.
fn rejected_registration(
    reporter: &mut TestReporter,
    ctx: &SuiteContext,
    request: &Value,
    message: &str,
) -> ScenarioResult {
    let response = reporter.step("Send POST request to /register with incomplete data", || {
        ctx.post("register", request)
    })?;
    reporter.step("Verify response", || -> Result<(), CheckError> {
        ensure_status(&response, 400)?;
        let body = json_body(&response)?;
        ensure_field_eq(&body, "/error", &json!(message))?;
        ensure_contract(&body, ContractName::Error)
    })?;
    Ok(())
}
