//! Shared helpers for wiremock-backed integration tests
#![allow(dead_code)]

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vault_helper_client::{ClientConfig, RetryPolicy, Session, VaultClient};

pub const TEST_TOKEN: &str = "dead-c0de";

/// A retry policy with millisecond backoff so retry tests finish quickly
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        ..Default::default()
    }
}

/// Build a client bound to the mock server with fast retries
pub fn client_for(server: &MockServer) -> VaultClient {
    let config = ClientConfig::new(&server.uri(), false)
        .unwrap()
        .with_retry(fast_retry());
    VaultClient::new(config).unwrap()
}

/// Build a session over [`client_for`]
pub fn session_for(server: &MockServer) -> Session {
    Session::new(client_for(server))
}

/// Mount a ready health probe
pub async fn mock_health_ready(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/sys/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "initialized": true,
            "sealed": false,
            "standby": false,
        })))
        .mount(server)
        .await;
}

/// Mount a sealed health probe (Vault reports sealed as 503)
pub async fn mock_health_sealed(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/sys/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "initialized": true,
            "sealed": true,
            "standby": false,
        })))
        .mount(server)
        .await;
}

/// Mount an AppRole login endpoint answering with `token`
pub async fn mock_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/auth/approle/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(token)))
        .mount(server)
        .await;
}

/// Mount a secret read at `/v1/{secret_path}` answering with `data`
pub async fn mock_secret(server: &MockServer, secret_path: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{secret_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": data,
            "lease_duration": 2764800,
            "lease_id": "",
            "renewable": false,
        })))
        .mount(server)
        .await;
}

/// The auth block shape login and renew share
pub fn auth_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "auth": {
            "client_token": token,
            "accessor": "accessor-1",
            "policies": ["default", "jenkins"],
            "lease_duration": 3600,
            "renewable": true,
            "entity_id": "entity-1",
        }
    })
}
