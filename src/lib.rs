//! # cbsboard - Terminal CBS Report Dashboard
//!
//! Loads a document of per-stock CBS scores once, then lets the user browse it: summary
//! statistics, a live search over symbol and name, one-of-five score category filters and a
//! newest-first card list where each card opens the stock's detail page.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Layered settings (defaults, TOML file, environment, flags)
//! - [`report`] - Report document model and score tiers
//! - [`loader`] - One-shot document fetch from a file or http(s) URL
//! - [`filter`] - Category and search filtering with newest-first ordering
//! - [`render`] - Statistics, cards, detail targets and the terminal front end
//! - [`input`] - Key map turning terminal events into dashboard actions
//! - [`app`] - Dashboard controller, search debounce and the event loop

pub mod error;
pub mod report;

pub mod config;
pub mod filter;
pub mod loader;

pub mod input;
pub mod render;

pub mod app;

pub use error::{DashError, Result};

pub use app::{Application, Dashboard, LoadState};
pub use config::Settings;
pub use filter::{filter_reports, FilterCategory};
pub use loader::{ReportSource, SourceFactory, SourceLocation};
pub use report::{ReportCollection, ScoreTier, StockReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
