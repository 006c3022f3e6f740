//! TUI orchestration and rendering for modus.
//!
//! [`app::App`] owns the request lifecycle; [`panels`] turns a solve
//! response into panel descriptions; [`ui`] is the only module that
//! touches the live surface.

pub mod app;
pub mod input;
pub mod markdown;
pub mod panels;
pub mod theme;
pub mod ui;
