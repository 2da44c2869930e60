//! Report document loading.
//!
//! The dashboard fetches its document exactly once per session. A [`ReportSource`] knows how to
//! retrieve and decode the document from one kind of location; [`SourceFactory`] picks the
//! right one from a user-supplied string, and [`spawn_loader`] runs the single fetch off the UI
//! loop.

pub mod factory;
pub mod source;
pub mod worker;

pub use factory::{SourceFactory, SourceLocation};
pub use source::{decode_document, FileSource, HttpSource, ReportSource};
pub use worker::{spawn_loader, LoadReceiver};
