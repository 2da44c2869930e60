//! Rendering subsystem.
//!
//! Everything outside [`ui`] is a pure function of the loaded collection and the current
//! selection: statistics, report cards, detail targets and the plain-text rendition. The
//! terminal front end only places those values into its slots.

pub mod grid;
pub mod locale;
pub mod navigation;
pub mod stats;
pub mod text;
pub mod ui;

pub use grid::{build_grid, GridView, ReportCard};
pub use navigation::{DetailResolver, DetailTarget, Navigator, SystemNavigator};
pub use stats::DashboardStats;
