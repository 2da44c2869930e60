//! Fixed zh-TW presentation: user-facing strings and date/time formatting.

use crate::filter::FilterCategory;
use crate::report::parse_report_date;
use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Timelike, Utc};

pub const LOADING: &str = "載入中…";
pub const LOAD_FAILED: &str = "載入報告失敗";
pub const NO_MATCHES: &str = "沒有找到符合的報告";
pub const VIEW_DETAILS: &str = "查看詳情 →";
pub const AVG_PLACEHOLDER: &str = "--";
pub const OPENED: &str = "已開啟";

pub const LABEL_TOTAL: &str = "追蹤股票";
pub const LABEL_AVERAGE: &str = "平均 CBS 分數";
pub const LABEL_QUALITY: &str = "優質股票 (≥80)";
pub const LABEL_UPDATED: &str = "最後更新";
pub const LABEL_SEARCH: &str = "搜尋股票代號或名稱";

pub fn filter_label(category: FilterCategory) -> &'static str {
    match category {
        FilterCategory::All => "全部",
        FilterCategory::Excellent => "優秀 80+",
        FilterCategory::Good => "良好 60-79",
        FilterCategory::Average => "普通 40-59",
        FilterCategory::Poor => "待加強 <40",
    }
}

/// `2024/3/1`
pub fn format_date<T: Datelike>(date: &T) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// `下午3:04:05`
pub fn format_time<T: Timelike>(time: &T) -> String {
    let (pm, hour) = time.hour12();
    format!(
        "{}{}:{:02}:{:02}",
        if pm { "下午" } else { "上午" },
        hour,
        time.minute(),
        time.second()
    )
}

/// `2024/3/1 下午3:04:05` in the zone of `ts`.
pub fn format_date_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    let local = ts.naive_local();
    format!("{} {}", format_date(&local), format_time(&local))
}

/// Render the document's `lastUpdated` in local time.
///
/// Timestamps without an offset are taken as UTC. Unrecognized values are shown verbatim.
pub fn format_last_updated(raw: &str) -> String {
    match parse_instant(raw) {
        Some(utc) => format_date_time(&utc.with_timezone(&Local)),
        None => raw.to_string(),
    }
}

/// Render a report's `date` field as a calendar date.
///
/// Date-only values are shown as written; full timestamps are converted to local time first.
pub fn format_report_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw.trim()) {
        return format_date(&ts.with_timezone(&Local));
    }
    match parse_report_date(raw) {
        Some(naive) => format_date(&naive),
        None => raw.to_string(),
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(ts.with_timezone(&Utc));
    }
    parse_report_date(raw).map(|naive: NaiveDateTime| Utc.from_utc_datetime(&naive))
}
