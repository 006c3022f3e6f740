//! End-to-end solve flow against a mock service.

use ratatui::style::Modifier;
use ratatui::text::Text;

use modus_client::SolveClient;
use modus_tui::app::App;
use modus_tui::panels::{Banner, WAITING, count_token_spans};
use modus_types::UiState;
use modus_types::highlight::TokenKind;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{mount_solve_error, mount_solve_response, settle, start_solve_mock};

fn app_for(server: &MockServer) -> App {
    App::new(SolveClient::new(server.uri()))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.enter_char(c);
    }
}

fn flatten(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn socrates_task_renders_all_panels_and_the_banner() {
    let server = start_solve_mock().await;
    mount_solve_response(
        &server,
        serde_json::json!({
            "formalization": r#"{"premises":["∀x Man(x)→Mortal(x)","Man(socrates)"]}"#,
            "logs": ["step1", "step2"],
            "explanation": "**proved**",
            "status": true,
        }),
    )
    .await;

    let mut app = app_for(&server);
    type_text(&mut app, "All men are mortal; Socrates is a man.");
    app.submit();
    assert_eq!(app.ui_state(), UiState::Loading);

    settle(&mut app).await;

    assert_eq!(app.ui_state(), UiState::Success);
    assert_eq!(app.banner(), Some(Banner::Proved));
    assert!(app.ui_state().accepts_submit());

    // Formalization: highlighted JSON with one key per premises entry.
    let formalization = &app.panels().formalization;
    assert!(formalization.body().is_some());
    assert_eq!(count_token_spans(formalization, TokenKind::Key), 1);
    assert_eq!(count_token_spans(formalization, TokenKind::Str), 2);

    // Log: both steps, in order.
    let log = app.panels().log.body().expect("log body");
    assert_eq!(flatten(log), "step1\nstep2");

    // Explanation: rendered bold "proved".
    let explanation = app.panels().explanation.body().expect("explanation body");
    let span = &explanation.lines[0].spans[0];
    assert_eq!(span.content.as_ref(), "proved");
    assert!(span.style.add_modifier.contains(Modifier::BOLD));
}

#[tokio::test]
async fn two_key_formalization_is_classified() {
    let server = start_solve_mock().await;
    mount_solve_response(
        &server,
        serde_json::json!({
            "formalization": r#"{"a":1,"b":true}"#,
            "logs": [],
            "explanation": "",
            "status": false,
        }),
    )
    .await;

    let mut app = app_for(&server);
    type_text(&mut app, "classify");
    app.submit();
    settle(&mut app).await;

    let formalization = &app.panels().formalization;
    assert_eq!(count_token_spans(formalization, TokenKind::Key), 2);
    assert_eq!(count_token_spans(formalization, TokenKind::Number), 1);
    assert_eq!(count_token_spans(formalization, TokenKind::Bool), 1);
    assert_eq!(app.banner(), Some(Banner::NotProved));
}

#[tokio::test]
async fn service_detail_becomes_the_surfaced_notice() {
    let server = start_solve_mock().await;
    mount_solve_error(&server, 500, serde_json::json!({"detail": "bad task"})).await;

    let mut app = app_for(&server);
    type_text(&mut app, "broken");
    app.submit();
    settle(&mut app).await;

    assert_eq!(app.ui_state(), UiState::Error);
    assert_eq!(app.notice(), Some("bad task"));
    assert_eq!(app.panels().formalization.placeholder_text(), Some(WAITING));
    assert_eq!(app.panels().log.placeholder_text(), Some(WAITING));
    assert_eq!(app.panels().explanation.placeholder_text(), Some(WAITING));
    assert!(app.ui_state().accepts_submit());
}

#[tokio::test]
async fn missing_detail_surfaces_the_generic_message() {
    let server = start_solve_mock().await;
    mount_solve_error(&server, 503, serde_json::json!({})).await;

    let mut app = app_for(&server);
    type_text(&mut app, "flaky");
    app.submit();
    settle(&mut app).await;

    assert_eq!(app.notice(), Some("server error"));
}

#[tokio::test]
async fn whitespace_input_never_reaches_the_network() {
    let server = start_solve_mock().await;
    Mock::given(method("POST"))
        .and(path("/api/solve"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    type_text(&mut app, "   \t ");
    app.submit();

    assert_eq!(app.ui_state(), UiState::Idle);
    assert!(app.notice().is_some());
    // Dropping the server verifies the zero-call expectation.
}
