// system-tests/tests/suites/user_management.rs
// ============================================================================
// Module: User Management Tests
// Description: List, read, create, update, and delete user scenarios.
// Purpose: Pin the /users contracts, including the 404 and 204 edges.
// Dependencies: reqres-system-tests, reqres-contract, serde_json
// ============================================================================

//! ## Overview
//! Mutating scenarios target [`EXISTING_USER_ID`]; the service does not
//! persist writes, so each scenario is replayable on its own.

use reqres_contract::ContractName;
use reqres_system_tests::checks::CheckError;
use reqres_system_tests::checks::ensure;
use reqres_system_tests::checks::ensure_contract;
use reqres_system_tests::checks::ensure_empty_body;
use reqres_system_tests::checks::ensure_field_eq;
use reqres_system_tests::checks::ensure_status;
use reqres_system_tests::checks::field;
use reqres_system_tests::checks::json_body;
use reqres_system_tests::checks::non_empty_str;
use reqres_system_tests::fixtures::EXISTING_USER_ID;
use reqres_system_tests::fixtures::NON_EXISTENT_USER_ID;
use reqres_system_tests::fixtures::generate_user;
use reqres_system_tests::report::ScenarioMeta;
use reqres_system_tests::report::Severity;
use serde_json::Value;
use serde_json::json;

use crate::helpers::harness::ScenarioResult;
use crate::helpers::harness::run_scenario;

/// Feature label for this suite.
const FEATURE: &str = "User Management";

#[test]
fn get_user_list() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Retrieve list of users")
        .description("The user list is non-empty and matches the paginated list contract.")
        .severity(Severity::Blocker)
        .tags(&["smoke", "get", "positive"]);
    run_scenario("get_user_list", meta, |reporter, ctx| {
        let response = reporter.step("Send GET request to /users endpoint", || ctx.get("users"))?;
        reporter.step("Verify response", || -> Result<(), CheckError> {
            ensure_status(&response, 200)?;
            let body = json_body(&response)?;
            let users = field(&body, "/data")?.as_array().map_or(0, Vec::len);
            ensure(users > 0, || "user list is empty".to_string())?;
            ensure_contract(&body, ContractName::UserList)
        })?;
        Ok(())
    })
}

#[test]
fn get_single_user() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Retrieve single user by ID")
        .description("Fetching an existing user returns that user's record.")
        .severity(Severity::Critical)
        .tags(&["smoke", "get", "positive"]);
    run_scenario("get_single_user", meta, |reporter, ctx| {
        let path = format!("users/{EXISTING_USER_ID}");
        let response =
            reporter.step(&format!("Send GET request to /{path}"), || ctx.get(&path))?;
        reporter.step("Verify response", || -> Result<(), CheckError> {
            ensure_status(&response, 200)?;
            let body = json_body(&response)?;
            ensure_field_eq(&body, "/data/id", &json!(EXISTING_USER_ID))?;
            ensure_contract(&body, ContractName::SingleUser)
        })?;
        Ok(())
    })
}

#[test]
fn get_nonexistent_user_returns_404() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Non-existent user returns 404 error")
        .description("Fetching an unknown user id yields 404.")
        .severity(Severity::Normal)
        .tags(&["regression", "get", "negative"]);
    run_scenario("get_nonexistent_user_returns_404", meta, |reporter, ctx| {
        let path = format!("users/{NON_EXISTENT_USER_ID}");
        let response = reporter
            .step(&format!("Send GET request to /{path} (non-existent ID)"), || ctx.get(&path))?;
        reporter.step("Verify status code is 404 Not Found", || ensure_status(&response, 404))?;
        Ok(())
    })
}

#[test]
fn get_user_is_idempotent() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Repeated reads return the same user")
        .description("Two GETs of the same user id within a session return the same id.")
        .severity(Severity::Minor)
        .tags(&["regression", "get", "idempotence"]);
    run_scenario("get_user_is_idempotent", meta, |reporter, ctx| {
        let path = format!("users/{EXISTING_USER_ID}");
        let mut ids = Vec::with_capacity(2);
        for attempt in 1..=2 {
            let title = format!("Send GET request to /{path} (#{attempt})");
            let response = reporter.step(&title, || ctx.get(&path))?;
            let id = reporter.step("Read user id", || -> Result<Value, CheckError> {
                ensure_status(&response, 200)?;
                Ok(field(&json_body(&response)?, "/data/id")?.clone())
            })?;
            ids.push(id);
        }
        reporter.step("Verify ids match", || {
            ensure(ids[0] == ids[1], || format!("ids differ: {} vs {}", ids[0], ids[1]))
        })?;
        Ok(())
    })
}

#[test]
fn create_user() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Create new user with valid data")
        .description("Creating a user from generated data returns an id and creation time.")
        .severity(Severity::Critical)
        .tags(&["smoke", "post", "positive"]);
    run_scenario("create_user", meta, |reporter, ctx| {
        let request = reporter.step("Generate random user data", || -> Result<Value, CheckError> {
            let request = generate_user().to_json();
            ensure_contract(&request, ContractName::CreateUserRequest)?;
            Ok(request)
        })?;
        let response =
            reporter.step("Send POST request to /users endpoint", || ctx.post("users", &request))?;
        reporter.step("Verify response", || -> Result<(), CheckError> {
            ensure_status(&response, 201)?;
            let body = json_body(&response)?;
            field(&body, "/id")?;
            non_empty_str(&body, "/createdAt")?;
            ensure_contract(&body, ContractName::CreateUserResponse)
        })?;
        Ok(())
    })
}

#[test]
fn update_user() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Update user information")
        .description("Updating a user with PUT echoes the new fields and an update time.")
        .severity(Severity::Critical)
        .tags(&["smoke", "put", "positive"]);
    run_scenario("update_user", meta, |reporter, ctx| {
        let request = reporter.step("Prepare update data", || -> Result<Value, CheckError> {
            let request = json!({"name": "morpheus", "job": "chiller"});
            ensure_contract(&request, ContractName::UpdateUserRequest)?;
            Ok(request)
        })?;
        let path = format!("users/{EXISTING_USER_ID}");
        let response =
            reporter.step(&format!("Send PUT request to /{path}"), || ctx.put(&path, &request))?;
        reporter.step("Verify response", || -> Result<(), CheckError> {
            ensure_status(&response, 200)?;
            let body = json_body(&response)?;
            non_empty_str(&body, "/updatedAt")?;
            ensure_field_eq(&body, "/name", &request["name"])?;
            ensure_field_eq(&body, "/job", &request["job"])?;
            ensure_contract(&body, ContractName::UpdateSuccess)
        })?;
        Ok(())
    })
}

#[test]
fn delete_user() -> ScenarioResult {
    let meta = ScenarioMeta::new(FEATURE, "Delete user by ID")
        .description("Deleting a user returns 204 with an empty body.")
        .severity(Severity::Critical)
        .tags(&["smoke", "delete", "positive"]);
    run_scenario("delete_user", meta, |reporter, ctx| {
        let path = format!("users/{EXISTING_USER_ID}");
        let response =
            reporter.step(&format!("Send DELETE request to /{path}"), || ctx.delete(&path))?;
        reporter.step("Verify response", || -> Result<(), CheckError> {
            ensure_status(&response, 204)?;
            ensure_empty_body(&response)
        })?;
        Ok(())
    })
}
