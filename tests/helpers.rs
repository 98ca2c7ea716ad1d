// Shared test helpers for mock API setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flow_email_extractor::ApiClient;

#[allow(dead_code)] // Used by other test files
pub const TEST_API_KEY: &str = "pk_test_123";

/// Creates an API client pointed at the mock server.
pub fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(
        Arc::new(reqwest::Client::new()),
        server.uri(),
        TEST_API_KEY.to_string(),
        50,
    )
}

/// Mounts a GET handler answering `body` with status 200 at `endpoint`.
pub async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts a GET handler answering `status` with an empty body at `endpoint`.
#[allow(dead_code)] // Used by other test files
pub async fn mount_status(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A flow resource as returned by the flows listing.
#[allow(dead_code)] // Used by other test files
pub fn flow_resource(id: &str, name: &str) -> Value {
    json!({
        "type": "flow",
        "id": id,
        "attributes": {"name": name, "status": "live", "trigger_type": "Added to List"}
    })
}

/// An email action resource; `id: None` leaves the id out.
#[allow(dead_code)] // Used by other test files
pub fn action_resource(id: Option<&str>, name: &str) -> Value {
    let mut resource = json!({
        "type": "flow-action",
        "attributes": {"name": name, "action_type": "SEND_EMAIL", "status": "live"}
    });
    if let Some(id) = id {
        resource["id"] = json!(id);
    }
    resource
}

/// A rendered email message carrying `html`.
#[allow(dead_code)] // Used by other test files
pub fn rendered_email(html: &str) -> Value {
    json!({"data": {"type": "template", "attributes": {"html": html, "subject": "Hello"}}})
}
