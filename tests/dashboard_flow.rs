use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::Instant;

use cbsboard::config::Settings;
use cbsboard::loader::{spawn_loader, SourceFactory, SourceLocation};
use cbsboard::render::locale;
use cbsboard::render::navigation::{DetailResolver, DetailTarget, Navigator};
use cbsboard::render::ui::TerminalUI;
use cbsboard::render::GridView;
use cbsboard::{Application, Dashboard, FilterCategory, LoadState};

const WINDOW: Duration = Duration::from_millis(300);

const TWO_STOCKS: &str = r#"{
  "lastUpdated": "2024-03-02T08:30:00Z",
  "stocks": [
    {"symbol": "TW02", "name": "Bar", "cbsScore": 55, "date": "2024-02-01"},
    {"symbol": "TW01", "name": "Foo", "cbsScore": 85, "date": "2024-03-01"}
  ]
}"#;

fn site_with(document: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create site dir");
    let path = dir.path().join("data.json");
    let mut file = std::fs::File::create(&path).expect("create data.json");
    file.write_all(document.as_bytes()).expect("write data.json");
    (dir, path)
}

async fn loaded_dashboard(path: &Path) -> Dashboard {
    let location = SourceLocation::Local(path.to_path_buf());
    let mut dashboard = Dashboard::new(DetailResolver::for_source(&location), WINDOW);
    let source = SourceFactory::create(&location).unwrap();
    let outcome = spawn_loader(source).await.unwrap();
    dashboard.apply_load(outcome);
    dashboard
}

fn symbols(dashboard: &Dashboard) -> Vec<&str> {
    dashboard
        .grid()
        .cards()
        .iter()
        .map(|card| card.symbol.as_str())
        .collect()
}

struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&mut self, _target: &DetailTarget) -> cbsboard::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn end_to_end_summary_and_order() {
    let (_dir, path) = site_with(TWO_STOCKS);
    let dashboard = loaded_dashboard(&path).await;

    assert_eq!(dashboard.load_state(), LoadState::Loaded);
    assert_eq!(dashboard.stats().total_stocks, 2);
    assert_eq!(dashboard.stats().avg_score_text(), "70.0");
    assert_eq!(dashboard.stats().quality_stocks, 1);
    assert_eq!(symbols(&dashboard), vec!["TW01", "TW02"]);

    let card = &dashboard.grid().cards()[0];
    assert_eq!(card.score_text, "85");
    assert_eq!(card.emoji(), "🟢");
    assert_eq!(card.date_text, "2024/3/1");
}

#[tokio::test]
async fn category_filter_narrows_grid_only() {
    let (_dir, path) = site_with(TWO_STOCKS);
    let mut dashboard = loaded_dashboard(&path).await;

    dashboard.select_filter(FilterCategory::Average);
    assert_eq!(symbols(&dashboard), vec!["TW02"]);

    dashboard.select_filter(FilterCategory::Excellent);
    assert_eq!(symbols(&dashboard), vec!["TW01"]);

    // Statistics always describe the whole collection.
    assert_eq!(dashboard.stats().total_stocks, 2);
    assert_eq!(dashboard.stats().quality_stocks, 1);
}

#[tokio::test]
async fn empty_search_result_shows_placeholder() {
    let (_dir, path) = site_with(
        r#"{"lastUpdated": "2024-01-02", "stocks": [
            {"symbol": "AAA", "name": "Alpha", "cbsScore": 90, "date": "2024-01-01"}
        ]}"#,
    );
    let mut dashboard = loaded_dashboard(&path).await;

    let start = Instant::now();
    dashboard.on_search_input("zzz", start);
    assert!(dashboard.poll_debounce(start + WINDOW));

    assert_eq!(dashboard.grid(), &GridView::NoMatches);
    assert_eq!(dashboard.grid().placeholder(), Some(locale::NO_MATCHES));
}

#[tokio::test(start_paused = true)]
async fn debounced_search_renders_once_with_last_value() {
    let (_dir, path) = site_with(TWO_STOCKS);
    let mut dashboard = loaded_dashboard(&path).await;
    let revision = dashboard.grid_revision();

    for (term, pause) in [("f", 30), ("fo", 40), ("foo", 0)] {
        dashboard.on_search_input(term, Instant::now());
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }

    let deadline = dashboard.next_deadline().expect("search pending");
    tokio::time::sleep_until(deadline).await;
    assert!(dashboard.poll_debounce(Instant::now()));
    assert!(!dashboard.poll_debounce(Instant::now() + WINDOW));

    assert_eq!(dashboard.grid_revision(), revision + 1);
    assert_eq!(dashboard.search_term(), "foo");
    assert_eq!(symbols(&dashboard), vec!["TW01"]);
}

#[tokio::test]
async fn missing_document_shows_failure_and_default_stats() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = loaded_dashboard(&dir.path().join("data.json")).await;

    assert_eq!(dashboard.load_state(), LoadState::Failed);
    assert_eq!(dashboard.grid().placeholder(), Some(locale::LOAD_FAILED));
    assert_eq!(dashboard.stats().total_stocks, 0);
    assert_eq!(dashboard.stats().avg_score_text(), locale::AVG_PLACEHOLDER);
}

#[tokio::test]
async fn cards_link_to_detail_pages_next_to_the_document() {
    let (dir, path) = site_with(TWO_STOCKS);
    let dashboard = loaded_dashboard(&path).await;

    assert_eq!(
        dashboard.grid().cards()[1].target,
        DetailTarget::Local(dir.path().join("stocks").join("TW02.html"))
    );
}

#[tokio::test]
async fn once_mode_prints_dashboard_text() {
    let (_dir, path) = site_with(TWO_STOCKS);
    let settings = Settings {
        source: path.to_string_lossy().into_owned(),
        initial_filter: FilterCategory::Average,
        ..Settings::default()
    };

    let mut app = Application::new(
        &settings,
        Box::new(TerminalUI::new().unwrap()),
        Box::new(NoopNavigator),
    )
    .unwrap();
    let text = app.run_once().await.unwrap();

    assert!(text.contains(&format!("{}: 2", locale::LABEL_TOTAL)));
    assert!(text.contains("TW02"));
    assert!(!text.contains("TW01"));
}
