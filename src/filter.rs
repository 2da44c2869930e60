//! Report filtering and ordering.
//!
//! [`filter_reports`] derives the visible view from the loaded stocks, a search term and the
//! active [`FilterCategory`]. It borrows the input and never reorders it in place.

use crate::error::{DashError, Result};
use crate::render::locale;
use crate::report::{ScoreTier, StockReport};
use memchr::memmem;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Mutually exclusive category toggles shown above the report grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterCategory {
    #[default]
    All,
    Excellent,
    Good,
    Average,
    Poor,
}

impl FilterCategory {
    /// Toggle order as displayed.
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::All,
        FilterCategory::Excellent,
        FilterCategory::Good,
        FilterCategory::Average,
        FilterCategory::Poor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterCategory::All => "all",
            FilterCategory::Excellent => ScoreTier::Excellent.class_name(),
            FilterCategory::Good => ScoreTier::Good.class_name(),
            FilterCategory::Average => ScoreTier::Average.class_name(),
            FilterCategory::Poor => ScoreTier::Poor.class_name(),
        }
    }

    /// Caption shown on the category toggle.
    pub fn label(self) -> &'static str {
        locale::filter_label(self)
    }

    /// Tier selected by this category, `None` for [`FilterCategory::All`].
    pub fn tier(self) -> Option<ScoreTier> {
        match self {
            FilterCategory::All => None,
            FilterCategory::Excellent => Some(ScoreTier::Excellent),
            FilterCategory::Good => Some(ScoreTier::Good),
            FilterCategory::Average => Some(ScoreTier::Average),
            FilterCategory::Poor => Some(ScoreTier::Poor),
        }
    }

    pub fn matches(self, score: f64) -> bool {
        match self.tier() {
            None => true,
            Some(tier) => ScoreTier::classify(score) == tier,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    /// Category at a 0-based toggle position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                DashError::invalid_argument(format!(
                    "unknown filter '{}' (expected all, excellent, good, average or poor)",
                    s
                ))
            })
    }
}

/// Case-insensitive substring matcher over symbol and name.
pub struct SearchQuery {
    /// `None` for an empty term, which matches everything.
    finder: Option<memmem::Finder<'static>>,
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        let needle = term.to_lowercase();
        let finder = (!needle.is_empty())
            .then(|| memmem::Finder::new(needle.as_bytes()).into_owned());
        Self { finder }
    }

    pub fn is_empty(&self) -> bool {
        self.finder.is_none()
    }

    pub fn matches(&self, stock: &StockReport) -> bool {
        let Some(finder) = &self.finder else {
            return true;
        };
        [stock.symbol.as_str(), stock.name.as_str()]
            .iter()
            .any(|field| finder.find(field.to_lowercase().as_bytes()).is_some())
    }
}

/// Stocks matching both the search term and the category, newest report first.
///
/// Equal dates keep their input order. Unparsable dates sort after every parseable one.
pub fn filter_reports<'a>(
    stocks: &'a [StockReport],
    search_term: &str,
    category: FilterCategory,
) -> Vec<&'a StockReport> {
    let query = SearchQuery::new(search_term);
    let mut keyed: Vec<_> = stocks
        .iter()
        .filter(|stock| query.matches(stock) && category.matches(stock.cbs_score))
        .map(|stock| (stock.parsed_date(), stock))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| newest_first(a.as_ref(), b.as_ref()));
    keyed.into_iter().map(|(_, stock)| stock).collect()
}

fn newest_first<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
