//! UI state management structures
//!
//! Report data and everything derived from it live in the `Dashboard`; `ViewState` only holds
//! what belongs to the terminal itself: the live search box, focus, size and the status line.

use crate::app::dashboard::LoadState;
use crate::input::InputMode;

/// Rows taken by everything except the card table body: stats panel (3), search box (3),
/// category tabs (1), table borders and header (3), status line (1).
pub const CHROME_ROWS: u16 = 11;

#[derive(Debug)]
pub struct ViewState {
    /// Search box content as typed; the grid catches up after the debounce window.
    pub search_input: String,

    pub input_mode: InputMode,

    pub status_line: StatusLine,

    /// Where the report document came from, for the status line
    pub source_label: String,

    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(source_label: impl Into<String>, viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            search_input: String::new(),
            input_mode: InputMode::Browse,
            status_line: StatusLine::new(),
            source_label: source_label.into(),
            viewport_width,
            viewport_height,
        }
    }

    pub fn search_focused(&self) -> bool {
        self.input_mode == InputMode::Search
    }

    /// Card rows visible at once.
    pub fn cards_per_page(&self) -> u16 {
        self.viewport_height.saturating_sub(CHROME_ROWS).max(1)
    }

    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// `source | shown/total | message`
    pub fn format_status_line(
        &self,
        source: &str,
        load_state: LoadState,
        shown: usize,
        total: usize,
    ) -> String {
        let position = match load_state {
            LoadState::Pending => "…".to_string(),
            LoadState::Failed => "ERR".to_string(),
            LoadState::Loaded => format!("{}/{}", shown, total),
        };

        match self.message {
            Some(ref message) => format!("{} | {} | {}", source, position, message),
            None => format!("{} | {}", source, position),
        }
    }
}
