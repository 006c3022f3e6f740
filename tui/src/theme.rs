//! Color theme and glyphs for the modus TUI.
//!
//! Kanagawa Wave palette.

use ratatui::style::{Modifier, Style};

use modus_types::highlight::TokenKind;

pub mod colors {
    use ratatui::style::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_POPUP: Color = Color::Rgb(54, 54, 70); // sumiInk5

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    // === Primary/Brand ===
    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet

    // === Accent Colors ===
    pub const BLUE: Color = Color::Rgb(126, 156, 216); // crystalBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[must_use]
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Style for a highlighter token kind, mirroring the classic key/string/
/// number/boolean/null coloring of the formalization payload.
#[must_use]
pub fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Key => Style::default().fg(colors::BLUE),
        TokenKind::Str => Style::default().fg(colors::GREEN),
        TokenKind::Number => Style::default().fg(colors::ORANGE),
        TokenKind::Bool => Style::default().fg(colors::PRIMARY),
        TokenKind::Null => Style::default().fg(colors::TEXT_MUTED),
        TokenKind::Punct => Style::default().fg(colors::TEXT_SECONDARY),
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Style, colors};

    #[must_use]
    pub fn banner_proved() -> Style {
        Style::default()
            .fg(colors::GREEN)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn banner_not_proved() -> Style {
        Style::default().fg(colors::RED).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn placeholder() -> Style {
        Style::default()
            .fg(colors::TEXT_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn panel_title() -> Style {
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default().fg(colors::TEXT_MUTED)
    }

    #[must_use]
    pub fn key_highlight() -> Style {
        Style::default()
            .fg(colors::ORANGE)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_cycles_through_frames() {
        assert_ne!(spinner_frame(0), spinner_frame(1));
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
    }

    #[test]
    fn banner_styles_are_distinct() {
        assert_ne!(styles::banner_proved(), styles::banner_not_proved());
    }
}
