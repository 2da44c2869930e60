//! Statistics panel values.

use crate::render::locale;
use crate::report::{ReportCollection, ScoreTier};

/// Aggregates over the whole loaded collection, independent of search and filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_stocks: usize,
    /// Mean `cbsScore`, `None` for an empty collection.
    pub avg_score: Option<f64>,
    /// Stocks in the excellent tier.
    pub quality_stocks: usize,
    pub last_updated_text: String,
}

impl DashboardStats {
    pub fn compute(collection: &ReportCollection) -> Self {
        let total_stocks = collection.stocks.len();
        let avg_score = (total_stocks > 0).then(|| {
            collection.stocks.iter().map(|s| s.cbs_score).sum::<f64>() / total_stocks as f64
        });
        let quality_stocks = collection
            .stocks
            .iter()
            .filter(|s| ScoreTier::classify(s.cbs_score).is_quality())
            .count();

        Self {
            total_stocks,
            avg_score,
            quality_stocks,
            last_updated_text: locale::format_last_updated(&collection.last_updated),
        }
    }

    /// One decimal place with halves rounded up, or the placeholder token when nothing is loaded.
    pub fn avg_score_text(&self) -> String {
        match self.avg_score {
            // `{:.1}` alone rounds exact halves to even (70.25 -> "70.2").
            Some(avg) => format!("{:.1}", (avg * 10.0).round() / 10.0),
            None => locale::AVG_PLACEHOLDER.to_string(),
        }
    }
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self::compute(&ReportCollection::default())
    }
}
