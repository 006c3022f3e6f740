//! Terminal event handling.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::App;

/// Handle terminal events.
/// Returns true if the app should quit.
pub async fn handle_events(app: &mut App) -> Result<bool> {
    if event::poll(Duration::from_millis(100))?
        && let Event::Key(key) = event::read()?
    {
        // Only handle key press events (not release) - important for Windows
        if key.kind != KeyEventKind::Press {
            return Ok(app.should_quit());
        }

        // Handle Ctrl+C globally
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        // A visible notice is modal: the next key only dismisses it.
        if app.dismiss_notice() {
            return Ok(app.should_quit());
        }

        handle_key(app, key);
    }

    Ok(app.should_quit())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.request_quit();
        }
        // Submit the task. While Loading this is a no-op; the affordance
        // lock lives in App::submit.
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Tab => {
            app.focus_next_panel();
        }
        KeyCode::Up => {
            app.scroll_up();
        }
        KeyCode::Down => {
            app.scroll_down();
        }
        KeyCode::Backspace => {
            app.delete_char();
        }
        KeyCode::Delete => {
            app.delete_char_forward();
        }
        KeyCode::Left => {
            app.move_cursor_left();
        }
        KeyCode::Right => {
            app.move_cursor_right();
        }
        KeyCode::Home => {
            app.move_cursor_home();
        }
        KeyCode::End => {
            app.move_cursor_end();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.delete_word_backwards();
        }
        KeyCode::Char(c) => {
            app.enter_char(c);
        }
        _ => {}
    }
}
