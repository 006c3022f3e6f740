//! Application state and the request lifecycle.
//!
//! The lifecycle enum owns the in-flight request in its `Loading` arm, so
//! "loading without a request" and "request without loading" are both
//! unrepresentable. Every outcome (success, service error, transport
//! error, malformed body, dropped task) funnels through
//! [`App::finish_request`], so the submit affordance is always restored.

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;

use modus_client::{ClientError, SolveClient};
use modus_types::{SolveResponse, Task, UiState};

use crate::panels::{self, Banner, RenderedPanels};

type SolveOutcome = Result<SolveResponse, ClientError>;

#[derive(Debug)]
struct ActiveRequest {
    rx: mpsc::UnboundedReceiver<SolveOutcome>,
    abort_handle: AbortHandle,
}

#[derive(Debug, Default)]
enum Lifecycle {
    #[default]
    Idle,
    Loading(ActiveRequest),
    Success,
    Error,
}

impl Lifecycle {
    fn ui_state(&self) -> UiState {
        match self {
            Lifecycle::Idle => UiState::Idle,
            Lifecycle::Loading(_) => UiState::Loading,
            Lifecycle::Success => UiState::Success,
            Lifecycle::Error => UiState::Error,
        }
    }
}

/// Single-line input draft with a char-indexed cursor.
#[derive(Debug, Default)]
struct DraftInput {
    text: String,
    cursor: usize,
}

impl DraftInput {
    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len())
    }

    fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.cursor += 1;
    }

    fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let index = self.byte_index();
        self.text.remove(index);
    }

    fn delete_char_forward(&mut self) {
        let index = self.byte_index();
        if index < self.text.len() {
            self.text.remove(index);
        }
    }

    fn delete_word_backwards(&mut self) {
        while self.cursor > 0
            && self
                .text
                .chars()
                .nth(self.cursor - 1)
                .is_some_and(char::is_whitespace)
        {
            self.delete_char();
        }
        while self.cursor > 0
            && self
                .text
                .chars()
                .nth(self.cursor - 1)
                .is_some_and(|c| !c.is_whitespace())
        {
            self.delete_char();
        }
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    fn move_cursor_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Which panel receives scroll keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    Formalization,
    Log,
    Explanation,
}

impl PanelFocus {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PanelFocus::Formalization => 0,
            PanelFocus::Log => 1,
            PanelFocus::Explanation => 2,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            PanelFocus::Formalization => PanelFocus::Log,
            PanelFocus::Log => PanelFocus::Explanation,
            PanelFocus::Explanation => PanelFocus::Formalization,
        }
    }
}

/// Scroll position for one panel viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollState {
    /// Always keep the newest content visible.
    AutoBottom,
    /// Manual scroll offset from the top of the rendered buffer.
    Manual { offset_from_top: u16 },
}

const SCROLL_STEP: u16 = 3;

/// Application state.
pub struct App {
    client: SolveClient,
    input: DraftInput,
    lifecycle: Lifecycle,
    panels: RenderedPanels,
    banner: Option<Banner>,
    notice: Option<String>,
    focus: PanelFocus,
    scroll: [ScrollState; 3],
    scroll_max: [u16; 3],
    tick: usize,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(client: SolveClient) -> Self {
        Self {
            client,
            input: DraftInput::default(),
            lifecycle: Lifecycle::Idle,
            panels: RenderedPanels::waiting(),
            banner: None,
            notice: None,
            focus: PanelFocus::default(),
            scroll: default_scroll(),
            scroll_max: [0; 3],
            tick: 0,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.lifecycle.ui_state()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.ui_state().is_loading()
    }

    #[must_use]
    pub fn panels(&self) -> &RenderedPanels {
        &self.panels
    }

    #[must_use]
    pub fn banner(&self) -> Option<Banner> {
        self.banner
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Clear a visible notice. Returns whether one was showing, so the key
    /// that dismissed it can be swallowed.
    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input.text
    }

    #[must_use]
    pub fn input_cursor(&self) -> usize {
        self.input.cursor
    }

    #[must_use]
    pub fn focus(&self) -> PanelFocus {
        self.focus
    }

    #[must_use]
    pub fn server_url(&self) -> &str {
        self.client.base_url()
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Increment the animation tick.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Submit the current draft as a solve task.
    ///
    /// Empty input surfaces a validation notice and changes nothing else.
    /// While a request is in flight the affordance is disabled and this is
    /// a no-op; there is no queuing. On valid input the Loading state (and
    /// the pending placeholders) are installed *before* the request task
    /// is spawned.
    pub fn submit(&mut self) {
        if !self.ui_state().accepts_submit() {
            return;
        }

        let task = match Task::new(self.input.text.clone()) {
            Ok(task) => task,
            Err(err) => {
                self.notice = Some(err.to_string());
                return;
            }
        };

        self.banner = None;
        self.panels = RenderedPanels::pending();
        self.reset_scroll();

        let (tx, rx) = mpsc::unbounded_channel();
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        self.lifecycle = Lifecycle::Loading(ActiveRequest { rx, abort_handle });

        let client = self.client.clone();
        let request = async move {
            let _ = tx.send(client.solve(&task).await);
        };
        tokio::spawn(async move {
            let _ = Abortable::new(request, abort_registration).await;
        });
    }

    /// Consume the outcome of the in-flight request, if it has arrived.
    pub fn process_events(&mut self) {
        let outcome = match &mut self.lifecycle {
            Lifecycle::Loading(active) => match active.rx.try_recv() {
                Ok(outcome) => outcome,
                Err(mpsc::error::TryRecvError::Empty) => return,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    tracing::warn!("solve task dropped without reporting an outcome");
                    Err(ClientError::Service {
                        message: "request ended unexpectedly".to_string(),
                    })
                }
            },
            _ => return,
        };

        self.finish_request(outcome);
    }

    /// The single exit point of the Loading state.
    ///
    /// Both arms leave `Loading`, so the submit affordance, spinner, and
    /// label are restored on every path.
    fn finish_request(&mut self, outcome: SolveOutcome) {
        let active = match std::mem::replace(&mut self.lifecycle, Lifecycle::Idle) {
            Lifecycle::Loading(active) => active,
            other => {
                self.lifecycle = other;
                return;
            }
        };
        active.abort_handle.abort();

        match outcome {
            Ok(response) => {
                let (panels, banner) = panels::render(&response);
                self.panels = panels;
                self.banner = Some(banner);
                self.reset_scroll();
                self.lifecycle = Lifecycle::Success;
            }
            Err(err) => {
                tracing::warn!(%err, "solve request failed");
                self.notice = Some(err.to_string());
                self.panels = RenderedPanels::waiting();
                self.reset_scroll();
                self.lifecycle = Lifecycle::Error;
            }
        }
    }

    // ------------------------------------------------------------------
    // Input editing
    // ------------------------------------------------------------------

    pub fn enter_char(&mut self, c: char) {
        self.input.enter_char(c);
    }

    pub fn delete_char(&mut self) {
        self.input.delete_char();
    }

    pub fn delete_char_forward(&mut self) {
        self.input.delete_char_forward();
    }

    pub fn delete_word_backwards(&mut self) {
        self.input.delete_word_backwards();
    }

    pub fn move_cursor_left(&mut self) {
        self.input.move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.input.move_cursor_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.input.move_cursor_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.input.move_cursor_end();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    // ------------------------------------------------------------------
    // Panel focus and scrolling
    // ------------------------------------------------------------------

    pub fn focus_next_panel(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn scroll_up(&mut self) {
        let idx = self.focus.index();
        self.scroll[idx] = match self.scroll[idx] {
            ScrollState::AutoBottom => ScrollState::Manual {
                offset_from_top: self.scroll_max[idx].saturating_sub(SCROLL_STEP),
            },
            ScrollState::Manual { offset_from_top } => ScrollState::Manual {
                offset_from_top: offset_from_top.saturating_sub(SCROLL_STEP),
            },
        };
    }

    pub fn scroll_down(&mut self) {
        let idx = self.focus.index();
        let ScrollState::Manual { offset_from_top } = self.scroll[idx] else {
            return;
        };
        let new_offset = offset_from_top.saturating_add(SCROLL_STEP);
        self.scroll[idx] = if new_offset >= self.scroll_max[idx] {
            ScrollState::AutoBottom
        } else {
            ScrollState::Manual {
                offset_from_top: new_offset,
            }
        };
    }

    /// Record the drawable height overflow for a panel; called at draw
    /// time once wrap widths are known. Manual offsets are clamped at
    /// read time.
    pub fn update_scroll_max(&mut self, panel: PanelFocus, max: u16) {
        self.scroll_max[panel.index()] = max;
    }

    #[must_use]
    pub fn scroll_offset_from_top(&self, panel: PanelFocus) -> u16 {
        let idx = panel.index();
        match self.scroll[idx] {
            ScrollState::AutoBottom => self.scroll_max[idx],
            ScrollState::Manual { offset_from_top } => offset_from_top.min(self.scroll_max[idx]),
        }
    }

    /// Fresh content starts at the top, except the log, which follows its
    /// tail so the most recent line is visible.
    fn reset_scroll(&mut self) {
        self.scroll = default_scroll();
        self.scroll_max = [0; 3];
    }
}

const fn default_scroll() -> [ScrollState; 3] {
    [
        ScrollState::Manual { offset_from_top: 0 },
        ScrollState::AutoBottom,
        ScrollState::Manual { offset_from_top: 0 },
    ]
}
