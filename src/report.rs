//! Report data model.
//!
//! A [`ReportCollection`] is the decoded form of the `data.json` document produced by the
//! upstream analyzer. It is loaded once per session and treated as read-only afterwards.

pub mod tier;

pub use tier::ScoreTier;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One stock's report summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    /// Ticker symbol, unique within a collection. Doubles as the detail page key.
    pub symbol: String,
    pub name: String,
    /// Composite quality score, nominally in `[0, 100]`.
    pub cbs_score: f64,
    /// Report date as written by the producer (`2024-03-01`, RFC 3339, ...).
    pub date: String,
}

impl StockReport {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        cbs_score: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            cbs_score,
            date: date.into(),
        }
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::classify(self.cbs_score)
    }

    /// Report date as a UTC-normalized timestamp, `None` when the field is not a recognizable date.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_report_date(&self.date)
    }
}

/// The full report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCollection {
    /// When the upstream data was generated (ISO-8601).
    pub last_updated: String,
    pub stocks: Vec<StockReport>,
}

impl Default for ReportCollection {
    fn default() -> Self {
        Self {
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            stocks: Vec::new(),
        }
    }
}

impl ReportCollection {
    pub fn new(last_updated: impl Into<String>, stocks: Vec<StockReport>) -> Self {
        Self {
            last_updated: last_updated.into(),
            stocks,
        }
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Symbols that are repeated or unsafe to embed in a detail page path.
    ///
    /// The loader logs these; it does not reject the document.
    pub fn suspicious_symbols(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut flagged = Vec::new();
        for stock in &self.stocks {
            let symbol = stock.symbol.as_str();
            if !seen.insert(symbol) || !is_url_safe(symbol) {
                flagged.push(symbol);
            }
        }
        flagged
    }
}

fn is_url_safe(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
}

/// Parse the date formats observed in report documents.
pub fn parse_report_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_document() {
        let json = r#"{
            "lastUpdated": "2024-03-02T08:30:00Z",
            "stocks": [
                {"symbol": "2330", "name": "台積電", "cbsScore": 91.5, "date": "2024-03-01"}
            ]
        }"#;
        let collection: ReportCollection = serde_json::from_str(json).unwrap();

        assert_eq!(collection.last_updated, "2024-03-02T08:30:00Z");
        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection.stocks[0],
            StockReport::new("2330", "台積電", 91.5, "2024-03-01")
        );
    }

    #[test]
    fn test_missing_score_is_rejected() {
        let json = r#"{"lastUpdated": "x", "stocks": [{"symbol": "A", "name": "A", "date": "2024-01-01"}]}"#;
        assert!(serde_json::from_str::<ReportCollection>(json).is_err());

        let json = r#"{"lastUpdated": "x", "stocks": [{"symbol": "A", "name": "A", "cbsScore": "high", "date": "2024-01-01"}]}"#;
        assert!(serde_json::from_str::<ReportCollection>(json).is_err());
    }

    #[test]
    fn test_default_collection_is_empty() {
        let collection = ReportCollection::default();
        assert!(collection.is_empty());
        assert!(DateTime::parse_from_rfc3339(&collection.last_updated).is_ok());
    }

    #[test]
    fn test_parse_report_date_formats() {
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(parse_report_date("2024-03-01"), Some(midnight));
        assert_eq!(parse_report_date("2024/03/01"), Some(midnight));
        assert_eq!(parse_report_date("2024-03-01T00:00:00"), Some(midnight));
        assert_eq!(parse_report_date("2024-03-01T08:00:00+08:00"), Some(midnight));
        assert_eq!(parse_report_date("not a date"), None);
        assert_eq!(parse_report_date(""), None);
    }

    #[test]
    fn test_suspicious_symbols() {
        let collection = ReportCollection::new(
            "2024-01-01",
            vec![
                StockReport::new("TW01", "Foo", 80.0, "2024-01-01"),
                StockReport::new("TW01", "Foo again", 70.0, "2024-01-02"),
                StockReport::new("A/B", "Slash", 50.0, "2024-01-03"),
                StockReport::new("BRK.B", "Dot", 50.0, "2024-01-03"),
            ],
        );

        assert_eq!(collection.suspicious_symbols(), vec!["TW01", "A/B"]);
    }
}
