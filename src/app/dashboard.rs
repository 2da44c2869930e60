//! Dashboard controller state.
//!
//! `Dashboard` owns the loaded [`ReportCollection`] and everything derived from it. It knows
//! nothing about terminals: the event loop feeds it load outcomes, search edits, category
//! selections and clock readings, and reads back stats and the grid to display.

use crate::app::debounce::Debouncer;
use crate::error::Result;
use crate::filter::{filter_reports, FilterCategory};
use crate::render::grid::{build_grid, GridView, ReportCard};
use crate::render::navigation::{DetailResolver, DetailTarget, Navigator};
use crate::render::stats::DashboardStats;
use crate::report::ReportCollection;
use std::time::Duration;
use tokio::time::Instant;

/// Progress of the one-shot document load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

pub struct Dashboard {
    collection: ReportCollection,
    load_state: LoadState,
    stats: DashboardStats,
    /// Term the grid was last filtered with; lags the input box by the debounce window.
    search_term: String,
    category: FilterCategory,
    debouncer: Debouncer<String>,
    resolver: DetailResolver,
    grid: GridView,
    /// Incremented once per grid rebuild.
    grid_revision: u64,
    selected: usize,
}

impl Dashboard {
    pub fn new(resolver: DetailResolver, debounce: Duration) -> Self {
        let collection = ReportCollection::default();
        let stats = DashboardStats::compute(&collection);
        Self {
            collection,
            load_state: LoadState::Pending,
            stats,
            search_term: String::new(),
            category: FilterCategory::All,
            debouncer: Debouncer::new(debounce),
            resolver,
            grid: GridView::Loading,
            grid_revision: 0,
            selected: 0,
        }
    }

    /// Preset search term and category, applied without debounce (command-line flags).
    pub fn with_initial_view(mut self, search_term: &str, category: FilterCategory) -> Self {
        self.search_term = search_term.to_string();
        self.category = category;
        self
    }

    /// Install the load result. Only the first outcome is applied; the collection is
    /// read-only afterwards.
    pub fn apply_load(&mut self, outcome: Result<ReportCollection>) -> bool {
        if self.load_state != LoadState::Pending {
            log::warn!("ignoring second load outcome");
            return false;
        }

        match outcome {
            Ok(collection) => {
                for symbol in collection.suspicious_symbols() {
                    log::warn!("symbol '{}' is duplicated or not URL-safe", symbol);
                }
                self.collection = collection;
                self.stats = DashboardStats::compute(&self.collection);
                self.load_state = LoadState::Loaded;
                self.rebuild_grid();
            }
            Err(err) => {
                log::error!("Error loading reports: {}", err);
                self.load_state = LoadState::Failed;
                self.grid = GridView::LoadFailed;
                self.grid_revision += 1;
            }
        }
        true
    }

    /// Record a search box edit. The grid is rebuilt by [`Dashboard::poll_debounce`] once
    /// input has been quiet for the debounce window.
    pub fn on_search_input(&mut self, value: impl Into<String>, now: Instant) {
        self.debouncer.schedule(value.into(), now);
    }

    /// Apply the pending search term if its window has elapsed. Returns true if it fired.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.debouncer.take_due(now) {
            Some(term) => {
                self.search_term = term;
                self.rebuild_grid();
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Make `category` the single active filter and rebuild the grid immediately.
    pub fn select_filter(&mut self, category: FilterCategory) {
        self.category = category;
        self.rebuild_grid();
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.grid.cards().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.grid.cards().len().saturating_sub(1);
    }

    pub fn selected_card(&self) -> Option<&ReportCard> {
        self.grid.cards().get(self.selected)
    }

    /// Open the selected card's detail page.
    pub fn activate_selected(&self, navigator: &mut dyn Navigator) -> Result<Option<DetailTarget>> {
        let Some(card) = self.selected_card() else {
            return Ok(None);
        };
        navigator.navigate(&card.target)?;
        Ok(Some(card.target.clone()))
    }

    fn rebuild_grid(&mut self) {
        if self.load_state != LoadState::Loaded {
            return;
        }
        let view = filter_reports(&self.collection.stocks, &self.search_term, self.category);
        self.grid = build_grid(&view, &self.resolver);
        self.grid_revision += 1;
        self.selected = self
            .selected
            .min(self.grid.cards().len().saturating_sub(1));
    }

    pub fn collection(&self) -> &ReportCollection {
        &self.collection
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn grid_revision(&self) -> u64 {
        self.grid_revision
    }

    pub fn category(&self) -> FilterCategory {
        self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::loader::SourceLocation;
    use crate::render::navigation::tests::RecordingNavigator;
    use crate::report::StockReport;
    use std::path::PathBuf;

    const WINDOW: Duration = Duration::from_millis(300);

    fn dashboard() -> Dashboard {
        let resolver =
            DetailResolver::for_source(&SourceLocation::Local(PathBuf::from("data.json")));
        Dashboard::new(resolver, WINDOW)
    }

    fn two_stocks() -> ReportCollection {
        ReportCollection::new(
            "2024-03-02T08:30:00Z",
            vec![
                StockReport::new("TW02", "Bar", 55.0, "2024-02-01"),
                StockReport::new("TW01", "Foo", 85.0, "2024-03-01"),
            ],
        )
    }

    fn shown(dash: &Dashboard) -> Vec<&str> {
        dash.grid()
            .cards()
            .iter()
            .map(|c| c.symbol.as_str())
            .collect()
    }

    #[test]
    fn test_initial_state_before_load() {
        let dash = dashboard();
        assert_eq!(dash.load_state(), LoadState::Pending);
        assert_eq!(dash.grid(), &GridView::Loading);
        assert_eq!(dash.stats().total_stocks, 0);
        assert_eq!(dash.stats().avg_score_text(), "--");
        assert_eq!(dash.category(), FilterCategory::All);
    }

    #[test]
    fn test_successful_load_renders_stats_and_grid() {
        let mut dash = dashboard();
        assert!(dash.apply_load(Ok(two_stocks())));

        assert_eq!(dash.stats().total_stocks, 2);
        assert_eq!(dash.stats().avg_score_text(), "70.0");
        assert_eq!(dash.stats().quality_stocks, 1);
        assert_eq!(shown(&dash), vec!["TW01", "TW02"]);
        assert_eq!(dash.grid_revision(), 1);
    }

    #[test]
    fn test_failed_load_keeps_defaults() {
        let mut dash = dashboard();
        dash.apply_load(Err(DashError::invalid_source("boom")));

        assert_eq!(dash.load_state(), LoadState::Failed);
        assert_eq!(dash.grid(), &GridView::LoadFailed);
        assert_eq!(dash.stats().total_stocks, 0);
        assert!(dash.collection().is_empty());

        // Filter changes do not replace the failure message.
        dash.select_filter(FilterCategory::Good);
        assert_eq!(dash.grid(), &GridView::LoadFailed);
    }

    #[test]
    fn test_collection_is_loaded_once() {
        let mut dash = dashboard();
        dash.apply_load(Ok(two_stocks()));
        assert!(!dash.apply_load(Ok(ReportCollection::new("x", vec![]))));
        assert_eq!(dash.collection().len(), 2);
    }

    #[test]
    fn test_filter_is_immediate_and_stats_stay_global() {
        let mut dash = dashboard();
        dash.apply_load(Ok(two_stocks()));

        dash.select_filter(FilterCategory::Average);
        assert_eq!(shown(&dash), vec!["TW02"]);
        assert_eq!(dash.grid_revision(), 2);
        assert_eq!(dash.stats().total_stocks, 2);

        dash.select_filter(FilterCategory::Good);
        assert_eq!(dash.grid(), &GridView::NoMatches);
        assert_eq!(dash.category(), FilterCategory::Good);
    }

    #[test]
    fn test_burst_of_search_edits_renders_once_with_last_value() {
        let mut dash = dashboard();
        dash.apply_load(Ok(two_stocks()));
        let before = dash.grid_revision();
        let t0 = Instant::now();

        dash.on_search_input("t", t0);
        dash.on_search_input("tw", t0 + Duration::from_millis(40));
        dash.on_search_input("tw01", t0 + Duration::from_millis(90));

        assert!(!dash.poll_debounce(t0 + Duration::from_millis(300)));
        assert_eq!(dash.grid_revision(), before);
        assert_eq!(dash.search_term(), "");

        assert!(dash.poll_debounce(t0 + Duration::from_millis(390)));
        assert!(!dash.poll_debounce(t0 + Duration::from_millis(800)));

        assert_eq!(dash.grid_revision(), before + 1);
        assert_eq!(dash.search_term(), "tw01");
        assert_eq!(shown(&dash), vec!["TW01"]);
    }

    #[test]
    fn test_search_without_matches_shows_placeholder() {
        let mut dash = dashboard();
        dash.apply_load(Ok(ReportCollection::new(
            "2024-01-02",
            vec![StockReport::new("AAA", "Alpha", 90.0, "2024-01-01")],
        )));
        let t0 = Instant::now();
        dash.on_search_input("zzz", t0);
        dash.poll_debounce(t0 + WINDOW);

        assert_eq!(dash.grid(), &GridView::NoMatches);
        assert_eq!(dash.grid().placeholder(), Some("沒有找到符合的報告"));
    }

    #[test]
    fn test_search_before_load_applies_on_load() {
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.on_search_input("bar", t0);
        assert!(dash.poll_debounce(t0 + WINDOW));
        assert_eq!(dash.grid(), &GridView::Loading);

        dash.apply_load(Ok(two_stocks()));
        assert_eq!(shown(&dash), vec!["TW02"]);
    }

    #[test]
    fn test_initial_view_presets() {
        let mut dash = dashboard().with_initial_view("foo", FilterCategory::Excellent);
        dash.apply_load(Ok(two_stocks()));
        assert_eq!(shown(&dash), vec!["TW01"]);
    }

    #[test]
    fn test_selection_and_activation() {
        let mut dash = dashboard();
        dash.apply_load(Ok(two_stocks()));
        let mut navigator = RecordingNavigator::default();

        dash.move_selection(1);
        assert_eq!(dash.selected_card().unwrap().symbol, "TW02");
        dash.move_selection(10);
        assert_eq!(dash.selected_index(), 1);
        dash.move_selection(-10);
        assert_eq!(dash.selected_index(), 0);

        let target = dash.activate_selected(&mut navigator).unwrap().unwrap();
        assert_eq!(
            target,
            DetailTarget::Local(PathBuf::from("stocks/TW01.html"))
        );
        assert_eq!(navigator.visited, vec![target]);

        // Narrowing the grid clamps the selection.
        dash.select_last();
        dash.select_filter(FilterCategory::Excellent);
        assert_eq!(dash.selected_index(), 0);
    }

    #[test]
    fn test_activation_with_no_cards_is_noop() {
        let dash = dashboard();
        let mut navigator = RecordingNavigator::default();
        assert_eq!(dash.activate_selected(&mut navigator).unwrap(), None);
        assert!(navigator.visited.is_empty());
    }
}
