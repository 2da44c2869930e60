//! Detail-page targets and the navigation seam.
//!
//! A card never carries an action string; it carries a [`DetailTarget`] computed from the
//! stock symbol, and activating the card hands that target to a [`Navigator`].

use crate::config::DEFAULT_DETAIL_TEMPLATE;
use crate::error::{DashError, Result};
use crate::loader::SourceLocation;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where a stock's detail page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailTarget {
    Remote(Url),
    Local(PathBuf),
}

impl fmt::Display for DetailTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailTarget::Remote(url) => write!(f, "{}", url),
            DetailTarget::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Expands the detail path template against a base location.
#[derive(Debug, Clone)]
pub struct DetailResolver {
    base: SourceLocation,
    template: String,
}

impl DetailResolver {
    pub fn new(base: SourceLocation, template: impl Into<String>) -> Self {
        Self {
            base,
            template: template.into(),
        }
    }

    /// `stocks/<symbol>.html` next to the document at `source`.
    pub fn for_source(source: &SourceLocation) -> Self {
        Self::new(source.base(), DEFAULT_DETAIL_TEMPLATE)
    }

    /// Relative path for `symbol`; bytes outside the URL-safe set are percent-encoded.
    pub fn relative_path(&self, symbol: &str) -> String {
        self.template
            .replace("{symbol}", &urlencoding::encode(symbol))
    }

    pub fn resolve(&self, symbol: &str) -> DetailTarget {
        let relative = self.relative_path(symbol);
        match &self.base {
            SourceLocation::Remote(base) => match base.join(&relative) {
                Ok(url) => DetailTarget::Remote(url),
                // Encoded relative paths always join; keep the base rather than panic.
                Err(_) => DetailTarget::Remote(base.clone()),
            },
            SourceLocation::Local(dir) => DetailTarget::Local(dir.join(relative)),
        }
    }
}

/// Opens detail targets.
pub trait Navigator {
    fn navigate(&mut self, target: &DetailTarget) -> Result<()>;
}

/// Hands targets to the platform's default handler (browser for URLs and `.html` files).
#[derive(Debug, Default)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn navigate(&mut self, target: &DetailTarget) -> Result<()> {
        log::info!("opening {}", target);
        let opened = match target {
            DetailTarget::Remote(url) => open::that(url.as_str()),
            DetailTarget::Local(path) => open::that(path),
        };
        opened.map_err(|e| DashError::navigation(format!("cannot open {}: {}", target, e)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Navigator that records targets instead of opening them.
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub visited: Vec<DetailTarget>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, target: &DetailTarget) -> Result<()> {
            self.visited.push(target.clone());
            Ok(())
        }
    }

    #[test]
    fn test_local_target() {
        let source = SourceLocation::parse("site/data.json").unwrap();
        let resolver = DetailResolver::for_source(&source);
        assert_eq!(
            resolver.resolve("TW01"),
            DetailTarget::Local(PathBuf::from("site/stocks/TW01.html"))
        );
    }

    #[test]
    fn test_remote_target() {
        let source = SourceLocation::parse("https://example.com/reports/data.json").unwrap();
        let resolver = DetailResolver::for_source(&source);
        assert_eq!(
            resolver.resolve("2330").to_string(),
            "https://example.com/reports/stocks/2330.html"
        );
    }

    #[test]
    fn test_unsafe_symbols_are_encoded() {
        let resolver = DetailResolver::new(
            SourceLocation::Local(PathBuf::from("site")),
            "detail/{symbol}/index.html",
        );
        assert_eq!(resolver.relative_path("A/B C"), "detail/A%2FB%20C/index.html");
        assert_eq!(resolver.relative_path("BRK.B"), "detail/BRK.B/index.html");
    }

    #[test]
    fn test_recording_navigator() {
        let mut navigator = RecordingNavigator::default();
        let target = DetailTarget::Local(PathBuf::from("stocks/TW01.html"));
        navigator.navigate(&target).unwrap();
        assert_eq!(navigator.visited, vec![target]);
    }
}
