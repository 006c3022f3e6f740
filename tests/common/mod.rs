//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use modus_tui::app::App;

/// Start a mock server that simulates the solve service.
pub async fn start_solve_mock() -> MockServer {
    MockServer::start().await
}

/// Mount a successful solve response.
pub async fn mount_solve_response(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/solve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a failing solve response with the given status and error body.
pub async fn mount_solve_error(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/solve"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Drive the app until the in-flight request settles.
pub async fn settle(app: &mut App) {
    for _ in 0..500 {
        app.process_events();
        if !app.is_loading() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request did not settle");
}
