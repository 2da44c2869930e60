//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for drawing the dashboard and managing terminal
//! lifecycle hooks such as initialization and cleanup.

use crate::app::dashboard::Dashboard;
use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Core trait for drawing the dashboard
pub trait UIRenderer {
    /// Draw one frame
    ///
    /// This method should:
    /// - Fill the four stats slots from the dashboard's statistics
    /// - Show the live search box and the single active category
    /// - Draw the report cards, or the grid placeholder when there are none
    /// - Update the status line
    fn render(&mut self, dashboard: &Dashboard, view_state: &ViewState) -> Result<()>;

    /// Initialize the terminal UI
    ///
    /// This method should:
    /// - Set up raw mode
    /// - Switch to the alternate screen
    /// - Enable bracketed paste
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}
