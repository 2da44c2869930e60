//! Report grid content.

use crate::render::locale;
use crate::render::navigation::{DetailResolver, DetailTarget};
use crate::report::{ScoreTier, StockReport};

/// Display data for one report card plus the target it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCard {
    pub symbol: String,
    pub name: String,
    pub score_text: String,
    pub tier: ScoreTier,
    pub date_text: String,
    pub target: DetailTarget,
}

impl ReportCard {
    pub fn from_report(stock: &StockReport, resolver: &DetailResolver) -> Self {
        Self {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            score_text: format_score(stock.cbs_score),
            tier: stock.tier(),
            date_text: locale::format_report_date(&stock.date),
            target: resolver.resolve(&stock.symbol),
        }
    }

    pub fn emoji(&self) -> &'static str {
        self.tier.emoji()
    }
}

/// What the report grid area shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GridView {
    /// Document not fetched yet.
    #[default]
    Loading,
    Cards(Vec<ReportCard>),
    /// Data loaded, nothing passes the current search and filter.
    NoMatches,
    LoadFailed,
}

impl GridView {
    pub fn cards(&self) -> &[ReportCard] {
        match self {
            GridView::Cards(cards) => cards,
            _ => &[],
        }
    }

    /// Placeholder text shown instead of cards, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            GridView::Loading => Some(locale::LOADING),
            GridView::Cards(_) => None,
            GridView::NoMatches => Some(locale::NO_MATCHES),
            GridView::LoadFailed => Some(locale::LOAD_FAILED),
        }
    }
}

/// Cards for an already filtered and ordered view.
pub fn build_grid(filtered: &[&StockReport], resolver: &DetailResolver) -> GridView {
    if filtered.is_empty() {
        return GridView::NoMatches;
    }
    GridView::Cards(
        filtered
            .iter()
            .map(|stock| ReportCard::from_report(stock, resolver))
            .collect(),
    )
}

/// Shortest round-trip form: `85`, `85.5`. Negative zero prints as `0`.
pub fn format_score(score: f64) -> String {
    let score = if score == 0.0 { 0.0 } else { score };
    format!("{}", score)
}
