//! Result panel rendering.
//!
//! [`render`] turns a [`SolveResponse`] into a *description* of the three
//! panels and the verdict banner. Nothing here touches the screen; the
//! drawing layer applies the description.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use modus_types::SolveResponse;
use modus_types::highlight::{self, TokenKind};

use crate::markdown::render_markdown;
use crate::theme::{colors, token_style};

/// Per-request pending indicators, one per panel.
pub const PENDING_FORMALIZATION: &str = "Formalizing the task...";
pub const PENDING_LOG: &str = "Running the resolution engine...";
pub const PENDING_EXPLANATION: &str = "Writing the explanation...";

/// Neutral indicator: before the first request and after a failure.
pub const WAITING: &str = "Waiting...";

/// Desired content of one panel.
#[derive(Debug, Clone)]
pub enum PanelContent {
    /// Centered, muted indicator text.
    Placeholder(&'static str),
    /// Real content from a response.
    Body(Text<'static>),
}

impl PanelContent {
    #[must_use]
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            PanelContent::Placeholder(text) => Some(text),
            PanelContent::Body(_) => None,
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<&Text<'static>> {
        match self {
            PanelContent::Placeholder(_) => None,
            PanelContent::Body(text) => Some(text),
        }
    }
}

/// Desired contents of all three panels.
#[derive(Debug, Clone)]
pub struct RenderedPanels {
    pub formalization: PanelContent,
    pub log: PanelContent,
    pub explanation: PanelContent,
}

impl RenderedPanels {
    /// The neutral state: nothing requested, or the last request failed.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            formalization: PanelContent::Placeholder(WAITING),
            log: PanelContent::Placeholder(WAITING),
            explanation: PanelContent::Placeholder(WAITING),
        }
    }

    /// The in-flight state, installed before the request is issued.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            formalization: PanelContent::Placeholder(PENDING_FORMALIZATION),
            log: PanelContent::Placeholder(PENDING_LOG),
            explanation: PanelContent::Placeholder(PENDING_EXPLANATION),
        }
    }
}

/// Verdict banner shown after a successful exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Proved,
    NotProved,
}

impl Banner {
    #[must_use]
    pub const fn from_status(status: bool) -> Self {
        if status { Banner::Proved } else { Banner::NotProved }
    }

    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Banner::Proved => "CONTRADICTION FOUND — THEOREM PROVED",
            Banner::NotProved => "CONTRADICTION NOT FOUND",
        }
    }
}

/// Build the panel descriptions for a solve response.
///
/// Pure with respect to its input; the markdown renderer and the
/// highlighter are both deterministic.
#[must_use]
pub fn render(response: &SolveResponse) -> (RenderedPanels, Banner) {
    let panels = RenderedPanels {
        formalization: render_formalization(&response.formalization),
        log: render_log(&response.logs),
        explanation: render_explanation(&response.explanation),
    };
    (panels, Banner::from_status(response.status))
}

/// JSON payloads are pretty-printed and classified; anything that does
/// not parse is shown verbatim. The fallback is an expected path, not an
/// error.
fn render_formalization(formalization: &str) -> PanelContent {
    match serde_json::from_str::<serde_json::Value>(formalization) {
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| formalization.to_string());
            PanelContent::Body(highlight_lines(&pretty))
        }
        Err(_) => PanelContent::Body(raw_lines(formalization)),
    }
}

fn render_log(logs: &[String]) -> PanelContent {
    let style = Style::default().fg(colors::TEXT_SECONDARY);
    let lines: Vec<Line<'static>> = logs
        .iter()
        .map(|entry| Line::from(Span::styled(entry.clone(), style)))
        .collect();
    PanelContent::Body(Text::from(lines))
}

fn render_explanation(explanation: &str) -> PanelContent {
    let base = Style::default().fg(colors::TEXT_SECONDARY);
    PanelContent::Body(Text::from(render_markdown(explanation, base)))
}

/// Tokenize pretty-printed JSON and split the styled tokens into lines.
fn highlight_lines(pretty: &str) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for token in highlight::tokenize(pretty) {
        let style = token_style(token.kind);
        let mut first = true;
        for part in token.text.split('\n') {
            if !first {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            first = false;
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    lines.push(Line::from(current));
    Text::from(lines)
}

fn raw_lines(text: &str) -> Text<'static> {
    let style = Style::default().fg(colors::GREEN);
    let lines: Vec<Line<'static>> = text
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), style)))
        .collect();
    Text::from(lines)
}

/// Count spans in a panel body styled as the given token kind.
#[must_use]
pub fn count_token_spans(content: &PanelContent, kind: TokenKind) -> usize {
    let style = token_style(kind);
    content
        .body()
        .map(|text| {
            text.lines
                .iter()
                .flat_map(|line| line.spans.iter())
                .filter(|span| span.style == style)
                .count()
        })
        .unwrap_or(0)
}
