//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer. It only places values the
//! `Dashboard` already computed into the screen layout:
//!
//! ```text
//! ┌追蹤股票──┐┌平均 CBS 分數┐┌優質股票───┐┌最後更新──────────┐
//! │ 42       ││ 68.3        ││ 11        ││ 2024/3/2 下午3:04:05 │
//! ┌搜尋股票代號或名稱──────────────────────────────────────┐
//! │ tw                                                     │
//!  全部  優秀 80+  良好 60-79  普通 40-59  待加強 <40
//! ┌───────────────────────────────────────────────────────┐
//! │ 分數      代號    名稱            日期                 │
//! │▶🟢 85     TW01    Foo             2024/3/1   查看詳情 → │
//! status line
//! ```

use crate::app::dashboard::Dashboard;
use crate::error::Result;
use crate::filter::FilterCategory;
use crate::render::grid::GridView;
use crate::render::locale;
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use ratatui::crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const BROWSE_HINT: &str = "/ 搜尋  1-5 篩選  ↑↓ 選擇  Enter 開啟  q 離開";
const SEARCH_HINT: &str = "Enter 完成  Esc 清除";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
    /// Keeps the card table's scroll offset between frames
    table_state: TableState,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
            table_state: TableState::default(),
        })
    }
}

/// Draw one dashboard frame. Split out of [`TerminalUI`] so it can run against any backend.
pub fn draw_dashboard(
    frame: &mut Frame,
    dashboard: &Dashboard,
    view_state: &ViewState,
    theme: &ColorTheme,
    table_state: &mut TableState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_stats(frame, chunks[0], dashboard, theme);
    render_search(frame, chunks[1], view_state, theme);
    render_filters(frame, chunks[2], dashboard.category(), theme);
    render_grid(frame, chunks[3], dashboard, theme, table_state);
    render_status(frame, chunks[4], dashboard, view_state, theme);
}

fn render_stats(frame: &mut Frame, area: Rect, dashboard: &Dashboard, theme: &ColorTheme) {
    let stats = dashboard.stats();
    let slots = [
        (locale::LABEL_TOTAL, stats.total_stocks.to_string()),
        (locale::LABEL_AVERAGE, stats.avg_score_text()),
        (locale::LABEL_QUALITY, stats.quality_stocks.to_string()),
        (locale::LABEL_UPDATED, stats.last_updated_text.clone()),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    for ((label, value), column) in slots.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.chrome)
            .title(label);
        let value = Paragraph::new(Span::styled(value, theme.stat_value)).block(block);
        frame.render_widget(value, *column);
    }
}

fn render_search(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
    let border = if view_state.search_focused() {
        theme.focused_input
    } else {
        theme.chrome
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(locale::LABEL_SEARCH);
    let input = Span::raw(view_state.search_input.as_str());
    let input_width = input.width() as u16;
    frame.render_widget(Paragraph::new(input).block(block), area);

    if view_state.search_focused() {
        let max_x = area.x + area.width.saturating_sub(2);
        frame.set_cursor((area.x + 1 + input_width).min(max_x), area.y + 1);
    }
}

fn render_filters(frame: &mut Frame, area: Rect, active: FilterCategory, theme: &ColorTheme) {
    let titles = FilterCategory::ALL
        .iter()
        .map(|category| Line::from(category.label()));
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(theme.chrome)
        .highlight_style(theme.active_filter)
        .divider(" ");
    frame.render_widget(tabs, area);
}

fn render_grid(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    theme: &ColorTheme,
    table_state: &mut TableState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chrome);

    let grid = dashboard.grid();
    if let Some(placeholder) = grid.placeholder() {
        let style = match grid {
            GridView::LoadFailed => theme.error_text,
            _ => theme.placeholder,
        };
        let message = Paragraph::new(Span::styled(placeholder, style))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let selected = dashboard.selected_index();
    let rows = grid.cards().iter().enumerate().map(|(idx, card)| {
        let action = if idx == selected {
            locale::VIEW_DETAILS
        } else {
            ""
        };
        Row::new(vec![
            Cell::from(Span::styled(
                format!("{} {}", card.emoji(), card.score_text),
                theme.tier_style(card.tier),
            )),
            Cell::from(Span::styled(
                card.symbol.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Cell::from(card.name.as_str()),
            Cell::from(card.date_text.as_str()),
            Cell::from(action),
        ])
    });

    let header = Row::new(vec!["分數", "代號", "名稱", "日期", ""]).style(theme.chrome);
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(theme.selection)
    .highlight_symbol("▶ ");

    table_state.select(Some(selected));
    frame.render_stateful_widget(table, area, table_state);
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    view_state: &ViewState,
    theme: &ColorTheme,
) {
    let status_text = view_state.status_line.format_status_line(
        &view_state.source_label,
        dashboard.load_state(),
        dashboard.grid().cards().len(),
        dashboard.collection().len(),
    );
    let hint = if view_state.search_focused() {
        SEARCH_HINT
    } else {
        BROWSE_HINT
    };

    let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(Span::raw(hint).width() as u16)])
        .split(area);

    frame.render_widget(Paragraph::new(status_text).style(status_style), halves[0]);
    frame.render_widget(
        Paragraph::new(hint)
            .style(status_style)
            .alignment(Alignment::Right),
        halves[1],
    );
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, dashboard: &Dashboard, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            let table_state = &mut self.table_state;
            terminal.draw(|frame| {
                draw_dashboard(frame, dashboard, view_state, theme, table_state);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
