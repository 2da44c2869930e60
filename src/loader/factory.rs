//! Factory for creating [`ReportSource`] instances from a location string.

use crate::error::{DashError, Result};
use crate::loader::source::{FileSource, HttpSource, ReportSource};
use std::path::PathBuf;
use url::Url;

/// Parsed form of a `--source` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` are fetched remotely, `file://` URLs and bare strings are paths.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DashError::invalid_source("empty location"));
        }

        let Some((scheme, _)) = raw.split_once("://") else {
            return Ok(Self::Local(PathBuf::from(raw)));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "http" | "https" => Url::parse(raw)
                .map(Self::Remote)
                .map_err(|e| DashError::invalid_source(format!("{}: {}", raw, e))),
            "file" => Url::parse(raw)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .map(Self::Local)
                .ok_or_else(|| DashError::invalid_source(format!("{}: not a file path", raw))),
            other => Err(DashError::invalid_source(format!(
                "unsupported scheme '{}' in {}",
                other, raw
            ))),
        }
    }

    /// The location detail pages are resolved against: the directory holding the document.
    pub fn base(&self) -> SourceLocation {
        match self {
            Self::Remote(url) => Self::Remote(url.join("./").unwrap_or_else(|_| url.clone())),
            Self::Local(path) => Self::Local(
                path.parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_default(),
            ),
        }
    }
}

/// Factory for report sources.
pub struct SourceFactory;

impl SourceFactory {
    pub fn create(location: &SourceLocation) -> Result<Box<dyn ReportSource>> {
        let source: Box<dyn ReportSource> = match location {
            SourceLocation::Remote(url) => Box::new(HttpSource::new(url.clone())?),
            SourceLocation::Local(path) => Box::new(FileSource::new(path.clone())),
        };
        log::debug!("report source: {}", source.describe());
        Ok(source)
    }

    pub fn open(raw: &str) -> Result<Box<dyn ReportSource>> {
        Self::create(&SourceLocation::parse(raw)?)
    }
}
