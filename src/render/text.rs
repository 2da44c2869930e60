//! Plain-text rendition for non-interactive use (`--once`).

use crate::render::grid::GridView;
use crate::render::locale;
use crate::render::stats::DashboardStats;
use std::fmt::Write;

/// Stats block followed by one line per card, or the grid placeholder.
pub fn render_plain(stats: &DashboardStats, grid: &GridView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", locale::LABEL_TOTAL, stats.total_stocks);
    let _ = writeln!(out, "{}: {}", locale::LABEL_AVERAGE, stats.avg_score_text());
    let _ = writeln!(out, "{}: {}", locale::LABEL_QUALITY, stats.quality_stocks);
    let _ = writeln!(out, "{}: {}", locale::LABEL_UPDATED, stats.last_updated_text);
    out.push('\n');

    if let Some(placeholder) = grid.placeholder() {
        let _ = writeln!(out, "{}", placeholder);
        return out;
    }

    for card in grid.cards() {
        let _ = writeln!(
            out,
            "{} {:<8} {:>5}  {}  {}  {}",
            card.emoji(),
            card.symbol,
            card.score_text,
            card.name,
            card.date_text,
            card.target
        );
    }
    out
}
