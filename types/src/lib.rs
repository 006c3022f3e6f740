//! Core domain types for modus.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

pub mod highlight;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Task
// ============================================================================

/// A solver task guaranteed to be non-empty (after trimming).
///
/// This is the only way to build a [`SolveRequest`], so an empty task is
/// rejected before it can reach the network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task(String);

#[derive(Debug, Error)]
#[error("task text must not be empty")]
pub struct EmptyTaskError;

impl Task {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyTaskError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyTaskError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Task {
    type Error = EmptyTaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Task {
    type Error = EmptyTaskError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Task {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Request body for `POST /api/solve`.
#[derive(Debug, Clone, Serialize)]
pub struct SolveRequest {
    pub task: String,
}

impl SolveRequest {
    #[must_use]
    pub fn new(task: Task) -> Self {
        Self {
            task: task.into_inner(),
        }
    }
}

impl From<Task> for SolveRequest {
    fn from(task: Task) -> Self {
        Self::new(task)
    }
}

/// Response body of a successful solve.
///
/// `formalization` is either a JSON document encoded as text or, as a
/// fallback, arbitrary prose; consumers must not assume which.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    pub formalization: String,
    pub logs: Vec<String>,
    pub explanation: String,
    /// Whether the engine derived a contradiction (the theorem is proved).
    pub status: bool,
}

/// Error body of a non-2xx response. `detail` is optional; callers
/// substitute a generic message when it is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<String>,
}

// ============================================================================
// UI lifecycle
// ============================================================================

/// The orchestrator's user-visible lifecycle state.
///
/// Exactly one state is active at a time. `Loading` is entered before the
/// request is issued and left when its outcome is consumed, on every exit
/// path; the submit affordance is derived from this value at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl UiState {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, UiState::Loading)
    }

    /// Whether the submit affordance is enabled.
    #[must_use]
    pub const fn accepts_submit(self) -> bool {
        !self.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_rejects_empty_and_whitespace() {
        assert!(Task::new("").is_err());
        assert!(Task::new("   \t\n").is_err());
        assert!(Task::new("All men are mortal.").is_ok());
    }

    #[test]
    fn task_preserves_original_text() {
        let task = Task::new("  padded  ").expect("non-empty after trim");
        assert_eq!(task.as_str(), "  padded  ");
    }

    #[test]
    fn solve_request_serializes_task_field() {
        let task = Task::new("Socrates is a man.").expect("non-empty");
        let body = serde_json::to_value(SolveRequest::new(task)).expect("serialize");
        assert_eq!(body, serde_json::json!({"task": "Socrates is a man."}));
    }

    #[test]
    fn solve_response_deserializes_full_body() {
        let response: SolveResponse = serde_json::from_str(
            r#"{"formalization":"{}","logs":["a","b"],"explanation":"done","status":true}"#,
        )
        .expect("valid body");
        assert_eq!(response.logs, vec!["a", "b"]);
        assert!(response.status);
    }

    #[test]
    fn error_payload_detail_is_optional() {
        let payload: ErrorPayload = serde_json::from_str("{}").expect("empty object");
        assert!(payload.detail.is_none());

        let payload: ErrorPayload =
            serde_json::from_str(r#"{"detail":"bad task"}"#).expect("with detail");
        assert_eq!(payload.detail.as_deref(), Some("bad task"));
    }

    #[test]
    fn ui_state_affordance_follows_loading() {
        assert!(UiState::Idle.accepts_submit());
        assert!(UiState::Success.accepts_submit());
        assert!(UiState::Error.accepts_submit());
        assert!(!UiState::Loading.accepts_submit());
    }
}
