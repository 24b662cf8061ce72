// crates/reqres-client/tests/instrumented_client.rs
// ============================================================================
// Module: Instrumented Client Tests
// Description: Round trips against local stub servers.
// Purpose: Verify tracing, body capture, and transport error propagation.
// Dependencies: reqres-client, tiny_http, serde_json
// ============================================================================

//! ## Overview
//! Each test starts a loopback `tiny_http` server that answers one request,
//! drives the client at it, and inspects both the returned response and the
//! in-memory sinks.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::collections::BTreeMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reqres_client::HttpMethod;
use reqres_client::InstrumentedClient;
use reqres_client::TraceSinks;
use reqres_client::TransportError;
use reqres_client::sink::AttachmentType;
use reqres_client::sink::MemoryLogSink;
use reqres_client::sink::MemoryReportSink;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// What the stub server observed.
#[derive(Debug)]
struct Seen {
    method: String,
    url: String,
    headers: BTreeMap<String, String>,
    body: String,
}

/// A running one-shot stub server.
struct Stub {
    base_url: String,
    seen: mpsc::Receiver<Seen>,
    handle: thread::JoinHandle<()>,
}

/// Serves exactly one request with the given status, content type, and body.
fn serve_once(status: u16, content_type: Option<&'static str>, body: &'static str) -> Stub {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let headers = request
                .headers()
                .iter()
                .map(|h| {
                    (h.field.as_str().as_str().to_ascii_lowercase(), h.value.as_str().to_string())
                })
                .collect();
            let _ = tx.send(Seen {
                method: request.method().as_str().to_string(),
                url: request.url().to_string(),
                headers,
                body: received,
            });
            let mut response =
                Response::from_data(body.as_bytes().to_vec()).with_status_code(status);
            if let Some(content_type) = content_type {
                let header =
                    Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()).unwrap();
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
    });
    Stub {
        base_url: format!("http://{addr}"),
        seen: rx,
        handle,
    }
}

/// Builds a client whose traces land in memory.
fn memory_client() -> (InstrumentedClient, Arc<MemoryLogSink>, Arc<MemoryReportSink>) {
    let log = Arc::new(MemoryLogSink::new());
    let report = Arc::new(MemoryReportSink::new());
    let sinks = TraceSinks::new(log.clone(), report.clone());
    (InstrumentedClient::new(sinks).unwrap(), log, report)
}

/// Headers carrying the demo API key.
fn api_key_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("x-api-key".to_string(), "reqres-free-v1".to_string());
    headers
}

// ============================================================================
// SECTION: Successful Exchanges
// ============================================================================

#[test]
fn get_traces_request_and_response() {
    let stub = serve_once(200, Some("application/json"), r#"{"data":{"id":2}}"#);
    let (client, log, report) = memory_client();
    let url = format!("{}/api/users/2", stub.base_url);

    let response = client.execute(HttpMethod::Get, &url, &api_key_headers(), None).unwrap();
    stub.handle.join().unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.json_value().unwrap()["data"]["id"], json!(2));
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(response.url(), url);

    let seen = stub.seen.recv().unwrap();
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.url, "/api/users/2");
    assert_eq!(seen.headers.get("x-api-key").map(String::as_str), Some("reqres-free-v1"));

    let messages = log.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], format!("GET | {url}"));
    assert!(messages[1].starts_with("Status: 200 | Time: "));
    assert!(messages[1].ends_with(&format!("s | URL: {url}")));

    let attachments = report.attachments();
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0].name, "Request");
    assert_eq!(attachments[0].content_type, AttachmentType::Json);
    let request: Value = serde_json::from_str(&attachments[0].body).unwrap();
    assert_eq!(request["method"], json!("GET"));
    assert_eq!(request["headers"]["x-api-key"], json!("***"));
    assert!(request.get("body").is_none());
    assert_eq!(attachments[1].name, "Response [200]");
    let traced: Value = serde_json::from_str(&attachments[1].body).unwrap();
    assert_eq!(traced["status_code"], json!(200));
    assert_eq!(traced["body"]["data"]["id"], json!(2));
    assert!(traced["elapsed_time"].as_str().unwrap().ends_with('s'));
}

#[test]
fn post_sends_json_body() {
    let stub =
        serve_once(201, Some("application/json"), r#"{"id":"316","createdAt":"2026-10-16"}"#);
    let (client, _log, report) = memory_client();
    let payload = json!({"name": "Ada", "job": "Engineer"});
    let url = format!("{}/api/users", stub.base_url);

    let response =
        client.execute(HttpMethod::Post, &url, &api_key_headers(), Some(&payload)).unwrap();
    stub.handle.join().unwrap();

    assert_eq!(response.status(), 201);
    let seen = stub.seen.recv().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(serde_json::from_str::<Value>(&seen.body).unwrap(), payload);
    assert_eq!(seen.headers.get("content-type").map(String::as_str), Some("application/json"));

    let request: Value = serde_json::from_str(&report.attachments()[0].body).unwrap();
    assert_eq!(request["body"], payload);
}

#[test]
fn patch_sends_partial_update() {
    let stub = serve_once(200, Some("application/json"), r#"{"job":"Lead","updatedAt":"now"}"#);
    let (client, log, report) = memory_client();
    let payload = json!({"job": "Lead"});
    let url = format!("{}/api/users/2", stub.base_url);

    let response =
        client.execute(HttpMethod::Patch, &url, &api_key_headers(), Some(&payload)).unwrap();
    stub.handle.join().unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.json_value().unwrap()["job"], json!("Lead"));
    let seen = stub.seen.recv().unwrap();
    assert_eq!(seen.method, "PATCH");
    assert_eq!(serde_json::from_str::<Value>(&seen.body).unwrap(), payload);
    assert_eq!(log.messages()[0], format!("PATCH | {url}"));
    let request: Value = serde_json::from_str(&report.attachments()[0].body).unwrap();
    assert_eq!(request["method"], json!("PATCH"));
}

#[test]
fn empty_body_is_traced_as_text() {
    let stub = serve_once(204, None, "");
    let (client, _log, report) = memory_client();

    let url = format!("{}/api/users/2", stub.base_url);
    let response = client.execute(HttpMethod::Delete, &url, &api_key_headers(), None).unwrap();
    stub.handle.join().unwrap();

    assert_eq!(response.status(), 204);
    assert!(response.is_empty_body());
    assert_eq!(response.text(), "");
    let attachments = report.attachments();
    assert_eq!(attachments[1].name, "Response [204]");
    let traced: Value = serde_json::from_str(&attachments[1].body).unwrap();
    assert_eq!(traced["body"], json!(""));
}

#[test]
fn non_json_body_does_not_abort_the_call() {
    let stub = serve_once(502, Some("text/html"), "<html>bad gateway</html>");
    let (client, log, report) = memory_client();

    let response = client
        .execute(HttpMethod::Get, &format!("{}/api/users", stub.base_url), &BTreeMap::new(), None)
        .unwrap();
    stub.handle.join().unwrap();

    assert_eq!(response.status(), 502);
    assert!(response.json_value().is_err());
    assert_eq!(response.text(), "<html>bad gateway</html>");
    let traced: Value = serde_json::from_str(&report.attachments()[1].body).unwrap();
    assert_eq!(traced["body"], json!("<html>bad gateway</html>"));
    assert_eq!(log.records().len(), 2);
}

#[test]
fn error_statuses_are_returned_unmodified() {
    let stub = serve_once(404, Some("application/json"), "{}");
    let (client, _log, report) = memory_client();

    let url = format!("{}/api/users/999", stub.base_url);
    let response = client.execute(HttpMethod::Get, &url, &api_key_headers(), None).unwrap();
    stub.handle.join().unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.json_value().unwrap(), json!({}));
    assert_eq!(report.attachments()[1].name, "Response [404]");
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn connection_refused_propagates_after_request_trace() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (client, log, report) = memory_client();

    let err = client
        .execute(HttpMethod::Get, &format!("http://{addr}/api/users"), &api_key_headers(), None)
        .unwrap_err();

    assert!(err.is_network());
    let TransportError::Send {
        method,
        source,
        ..
    } = err
    else {
        panic!("expected send failure");
    };
    assert_eq!(method, HttpMethod::Get);
    assert!(source.is_connect() || source.is_request());
    assert_eq!(log.records().len(), 1);
    assert_eq!(report.attachments().len(), 1);
    assert_eq!(report.attachments()[0].name, "Request");
}

#[test]
fn configured_timeout_surfaces_as_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(Duration::from_millis(800));
            drop(stream);
        }
    });
    let client =
        InstrumentedClient::with_timeout(TraceSinks::noop(), Duration::from_millis(150)).unwrap();

    let err = client
        .execute(HttpMethod::Get, &format!("http://{addr}/slow"), &BTreeMap::new(), None)
        .unwrap_err();
    handle.join().unwrap();

    match err {
        TransportError::Send {
            source,
            ..
        } => assert!(source.is_timeout()),
        other => panic!("expected timeout, got {other}"),
    }
}

#[test]
fn relative_url_is_rejected_before_tracing() {
    let (client, log, report) = memory_client();
    let err = client.execute(HttpMethod::Get, "/api/users", &BTreeMap::new(), None).unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
    assert!(!err.is_network());
    assert!(log.records().is_empty());
    assert!(report.attachments().is_empty());
}

#[test]
fn non_http_scheme_is_rejected() {
    let (client, _log, _report) = memory_client();
    let err =
        client.execute(HttpMethod::Get, "ftp://reqres.in/api", &BTreeMap::new(), None).unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
}

#[test]
fn invalid_header_is_rejected() {
    let (client, log, _report) = memory_client();
    let mut headers = BTreeMap::new();
    headers.insert("bad header".to_string(), "value".to_string());
    let err = client
        .execute(HttpMethod::Get, "http://127.0.0.1:9/api", &headers, None)
        .unwrap_err();
    assert!(matches!(err, TransportError::InvalidHeader { ref name, .. } if name == "bad header"));
    assert!(log.records().is_empty());
}
