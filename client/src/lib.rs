//! HTTP transport for the modus solve service.
//!
//! One contract: `POST {base_url}/api/solve` with a JSON task body. A 2xx
//! response carries a [`SolveResponse`]; anything else carries an optional
//! [`ErrorPayload`] whose `detail` becomes the user-facing message.

use modus_types::{ErrorPayload, SolveRequest, SolveResponse, Task};
use thiserror::Error;

/// Path of the solve endpoint, relative to the configured base URL.
pub const SOLVE_PATH: &str = "/api/solve";

/// Message substituted when a non-2xx response carries no usable `detail`.
const GENERIC_SERVICE_ERROR: &str = "server error";

/// Failure modes of a solve exchange.
///
/// `Malformed` is handled identically to `Service` at the orchestrator
/// boundary; it is a separate variant so logs can tell them apart.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response. The message comes from the server's `detail`
    /// field when present, otherwise the generic fallback.
    #[error("{message}")]
    Service { message: String },
    /// Network failure: unreachable host, timeout, aborted connection.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 2xx response whose body does not parse as a [`SolveResponse`].
    #[error("malformed server response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for the remote resolution service.
#[derive(Debug, Clone)]
pub struct SolveClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolveClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one task and read the full response body.
    ///
    /// Exactly one request per call; suspends at send and at body read,
    /// nowhere else.
    pub async fn solve(&self, task: &Task) -> Result<SolveResponse, ClientError> {
        let url = format!("{}{SOLVE_PATH}", self.base_url);
        tracing::debug!(%url, "submitting solve request");

        let response = self
            .http
            .post(&url)
            .json(&SolveRequest::new(task.clone()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.text().await {
                Ok(body) => serde_json::from_str::<ErrorPayload>(&body)
                    .ok()
                    .and_then(|payload| payload.detail)
                    .filter(|detail| !detail.trim().is_empty()),
                Err(err) => {
                    tracing::debug!(%err, "failed to read error body");
                    None
                }
            };
            let message = detail.unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
            tracing::warn!(%status, %message, "solve request rejected");
            return Err(ClientError::Service { message });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<SolveResponse>(&body)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task(text: &str) -> Task {
        Task::new(text).expect("non-empty test task")
    }

    #[tokio::test]
    async fn solve_posts_task_and_parses_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/solve"))
            .and(body_json(serde_json::json!({"task": "prove it"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "formalization": "{\"clauses\":[]}",
                "logs": ["step1", "step2"],
                "explanation": "**done**",
                "status": true,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SolveClient::new(server.uri());
        let response = client.solve(&task("prove it")).await.expect("success");

        assert_eq!(response.logs, vec!["step1", "step2"]);
        assert!(response.status);
    }

    #[tokio::test]
    async fn non_success_surfaces_server_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/solve"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "bad task"})),
            )
            .mount(&server)
            .await;

        let client = SolveClient::new(server.uri());
        let err = client.solve(&task("x")).await.expect_err("service error");

        assert!(matches!(err, ClientError::Service { .. }));
        assert_eq!(err.to_string(), "bad task");
    }

    #[tokio::test]
    async fn non_success_without_detail_uses_generic_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/solve"))
            .respond_with(ResponseTemplate::new(502).set_body_string("gateway burp"))
            .mount(&server)
            .await;

        let client = SolveClient::new(server.uri());
        let err = client.solve(&task("x")).await.expect_err("service error");

        assert_eq!(err.to_string(), "server error");
    }

    #[tokio::test]
    async fn empty_detail_falls_back_to_generic_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/solve"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": ""})),
            )
            .mount(&server)
            .await;

        let client = SolveClient::new(server.uri());
        let err = client.solve(&task("x")).await.expect_err("service error");

        assert_eq!(err.to_string(), "server error");
    }

    #[tokio::test]
    async fn malformed_success_body_is_reported_as_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/solve"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = SolveClient::new(server.uri());
        let err = client.solve(&task("x")).await.expect_err("parse failure");

        assert!(matches!(err, ClientError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let server = MockServer::start().await;
        let dead_uri = server.uri();
        drop(server);

        let client = SolveClient::new(dead_uri);
        let err = client.solve(&task("x")).await.expect_err("connect failure");

        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = SolveClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
