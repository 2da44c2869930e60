//! Terminal rendering components.
//!
//! This module hosts the concrete terminal UI implementation along with the supporting view/state
//! structures and styling utilities.

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use state::{StatusLine, ViewState, CHROME_ROWS};
pub use terminal::{draw_dashboard, TerminalUI};
pub use theme::{ColorTheme, ThemeChoice};
