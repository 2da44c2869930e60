//! Input subsystem.
//!
//! [`raw`] polls crossterm and yields primitive events; [`service`] runs the dashboard key map
//! and yields domain-level [`InputAction`]s for the controller.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than reaching
// into submodules.
pub use service::{InputAction, InputMode, InputService, InputStateMachine, ScrollDirection};
