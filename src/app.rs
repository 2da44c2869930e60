//! Application orchestration layer
//!
//! Wires the report source, the [`Dashboard`] controller, the terminal renderer and the detail
//! page navigator together and runs the event loop. State lives in the components; this layer
//! only routes events between them.

pub mod dashboard;
pub mod debounce;
pub mod runtime;

pub use dashboard::{Dashboard, LoadState};
pub use debounce::Debouncer;

use crate::config::Settings;
use crate::error::{DashError, Result};
use crate::input::{InputAction, InputMode, InputStateMachine, ScrollDirection};
use crate::loader::{spawn_loader, LoadReceiver, ReportSource, SourceFactory, SourceLocation};
use crate::render::locale;
use crate::render::navigation::{DetailResolver, Navigator};
use crate::render::text::render_plain;
use crate::render::ui::{UIRenderer, ViewState};
use crate::report::ReportCollection;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{sleep_until, Instant};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Build the detail resolver for a session: `detail_base` when configured, otherwise the
/// directory (or URL) holding the report document.
pub fn detail_resolver(settings: &Settings, location: &SourceLocation) -> Result<DetailResolver> {
    let base = match settings.detail_base.as_deref() {
        Some(raw) => match SourceLocation::parse(raw)? {
            // Url::join replaces the last segment unless the base ends in '/'.
            SourceLocation::Remote(mut url) => {
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                SourceLocation::Remote(url)
            }
            local => local,
        },
        None => location.base(),
    };
    Ok(DetailResolver::new(base, settings.detail_template.clone()))
}

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    /// Taken by the single load.
    source: Option<Box<dyn ReportSource>>,
    dashboard: Dashboard,
    ui_renderer: Box<dyn UIRenderer>,
    navigator: Box<dyn Navigator>,
    source_label: String,
}

impl Application {
    /// Create application by resolving the configured source and wiring components together
    pub fn new(
        settings: &Settings,
        ui_renderer: Box<dyn UIRenderer>,
        navigator: Box<dyn Navigator>,
    ) -> Result<Self> {
        let location = SourceLocation::parse(&settings.source)?;
        let source = SourceFactory::create(&location)?;
        let dashboard = Dashboard::new(detail_resolver(settings, &location)?, settings.debounce)
            .with_initial_view(&settings.initial_search, settings.initial_filter);

        Ok(Self::from_parts(
            source,
            dashboard,
            ui_renderer,
            navigator,
            settings.source.clone(),
        ))
    }

    pub fn from_parts(
        source: Box<dyn ReportSource>,
        dashboard: Dashboard,
        ui_renderer: Box<dyn UIRenderer>,
        navigator: Box<dyn Navigator>,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            source: Some(source),
            dashboard,
            ui_renderer,
            navigator,
            source_label: source_label.into(),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    fn start_load(&mut self) -> Result<LoadReceiver> {
        let source = self
            .source
            .take()
            .ok_or_else(|| DashError::other("report document was already loaded"))?;
        log::debug!("loading reports from {}", source.describe());
        Ok(spawn_loader(source))
    }

    /// Load once, then return the plain-text rendition of the initial view.
    pub async fn run_once(&mut self) -> Result<String> {
        let load_rx = self.start_load()?;
        self.dashboard.apply_load(receive_outcome(load_rx.await));
        Ok(render_plain(self.dashboard.stats(), self.dashboard.grid()))
    }

    /// Run the interactive dashboard until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(self.source_label.clone(), width, height);
        view_state.search_input = self.dashboard.search_term().to_string();

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = runtime::spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            INPUT_POLL_INTERVAL,
            InputStateMachine::with_search(&view_state.search_input),
        );

        let result = self.drive(input_rx, &mut view_state).await;

        shutdown.store(true, Ordering::SeqCst);
        self.ui_renderer.cleanup()?;
        if input_thread.join().is_err() {
            log::warn!("input thread panicked");
        }
        result
    }

    /// Event loop over input actions, the pending load and the search debounce deadline.
    /// Renders after every event; returns when a `Quit` arrives or the input channel closes.
    pub async fn drive(
        &mut self,
        mut input_rx: UnboundedReceiver<InputAction>,
        view_state: &mut ViewState,
    ) -> Result<()> {
        let mut load_rx = self.start_load()?;
        let mut load_done = false;

        self.ui_renderer.render(&self.dashboard, view_state)?;

        loop {
            let deadline = self.dashboard.next_deadline();

            tokio::select! {
                outcome = &mut load_rx, if !load_done => {
                    load_done = true;
                    self.dashboard.apply_load(receive_outcome(outcome));
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.dashboard.poll_debounce(Instant::now());
                }
                action = input_rx.recv() => {
                    let Some(action) = action else { break };
                    if !self.handle_action(action, view_state) {
                        break;
                    }
                }
            }

            self.ui_renderer.render(&self.dashboard, view_state)?;
        }

        Ok(())
    }

    /// Apply one input action; returns false on quit.
    fn handle_action(&mut self, action: InputAction, view_state: &mut ViewState) -> bool {
        if !matches!(action, InputAction::Resize { .. }) {
            view_state.status_line.clear_message();
        }

        match action {
            InputAction::Quit => return false,
            InputAction::FocusSearch => view_state.input_mode = InputMode::Search,
            InputAction::BlurSearch => view_state.input_mode = InputMode::Browse,
            InputAction::SearchEdited(value) => {
                // Paste focuses the box without a separate FocusSearch.
                view_state.input_mode = InputMode::Search;
                view_state.search_input = value.clone();
                self.dashboard.on_search_input(value, Instant::now());
            }
            InputAction::CancelSearch => {
                view_state.input_mode = InputMode::Browse;
                view_state.search_input.clear();
                self.dashboard.on_search_input(String::new(), Instant::now());
            }
            InputAction::SelectFilter(category) => self.dashboard.select_filter(category),
            InputAction::NextFilter => {
                let next = self.dashboard.category().next();
                self.dashboard.select_filter(next);
            }
            InputAction::PreviousFilter => {
                let previous = self.dashboard.category().previous();
                self.dashboard.select_filter(previous);
            }
            InputAction::MoveSelection(delta) => self.dashboard.move_selection(delta),
            InputAction::Page(direction) => {
                let page = view_state.cards_per_page() as isize;
                match direction {
                    ScrollDirection::Down => self.dashboard.move_selection(page),
                    ScrollDirection::Up => self.dashboard.move_selection(-page),
                }
            }
            InputAction::SelectFirst => self.dashboard.select_first(),
            InputAction::SelectLast => self.dashboard.select_last(),
            InputAction::Activate => {
                match self.dashboard.activate_selected(self.navigator.as_mut()) {
                    Ok(Some(target)) => view_state
                        .status_line
                        .set_message(format!("{} {}", locale::OPENED, target)),
                    Ok(None) => {}
                    Err(err) => {
                        log::warn!("navigation failed: {}", err);
                        view_state.status_line.set_message(err.to_string());
                    }
                }
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        true
    }
}

fn receive_outcome(
    outcome: std::result::Result<Result<ReportCollection>, tokio::sync::oneshot::error::RecvError>,
) -> Result<ReportCollection> {
    outcome.unwrap_or_else(|_| Err(DashError::other("report loader stopped without a result")))
}
