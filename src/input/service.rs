//! High-level input service.
//!
//! Consumes raw events, runs the dashboard key map and yields domain-level `InputAction`s that
//! the event loop consumes.
//!
//! The key map has two modes. In [`InputMode::Browse`] keys select categories, move the card
//! selection and open detail pages. `/` switches to [`InputMode::Search`], where printable keys
//! edit the search box and every edit is reported with the full box content.

use crate::error::Result;
use crate::filter::FilterCategory;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
}

/// Direction for page movement through the card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    FocusSearch,
    /// Leave the search box keeping its content.
    BlurSearch,
    /// Search box content after an edit.
    SearchEdited(String),
    /// Leave the search box and clear it.
    CancelSearch,
    SelectFilter(FilterCategory),
    NextFilter,
    PreviousFilter,
    MoveSelection(isize),
    Page(ScrollDirection),
    SelectFirst,
    SelectLast,
    /// Open the selected card's detail page.
    Activate,
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
    InvalidInput,
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Dashboard key map.
pub struct InputStateMachine {
    mode: InputMode,
    search_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self::with_search("")
    }

    /// Start with a pre-filled search box (from `--search`).
    pub fn with_search(initial: &str) -> Self {
        Self {
            mode: InputMode::Browse,
            search_buffer: initial.to_string(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind == KeyEventKind::Release {
            return InputAction::NoAction;
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            return InputAction::Quit;
        }

        match self.mode {
            InputMode::Browse => self.handle_browse_key(key_event),
            InputMode::Search => self.handle_search_key(key_event),
        }
    }

    fn handle_browse_key(&mut self, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('q'), m) if plain(m) => InputAction::Quit,
            (KeyCode::Char('/'), m) if plain(m) => {
                self.mode = InputMode::Search;
                InputAction::FocusSearch
            }
            (KeyCode::Char(digit @ '1'..='5'), m) if plain(m) => {
                let index = digit as usize - '1' as usize;
                FilterCategory::from_index(index)
                    .map(InputAction::SelectFilter)
                    .unwrap_or(InputAction::InvalidInput)
            }
            (KeyCode::Tab, _) | (KeyCode::Right, _) => InputAction::NextFilter,
            (KeyCode::BackTab, _) | (KeyCode::Left, _) => InputAction::PreviousFilter,
            (KeyCode::Char('l'), m) if plain(m) => InputAction::NextFilter,
            (KeyCode::Char('h'), m) if plain(m) => InputAction::PreviousFilter,
            (KeyCode::Char('j'), m) if plain(m) => InputAction::MoveSelection(1),
            (KeyCode::Down, _) => InputAction::MoveSelection(1),
            (KeyCode::Char('k'), m) if plain(m) => InputAction::MoveSelection(-1),
            (KeyCode::Up, _) => InputAction::MoveSelection(-1),
            (KeyCode::PageDown, _) | (KeyCode::Char(' '), _) => {
                InputAction::Page(ScrollDirection::Down)
            }
            (KeyCode::PageUp, _) => InputAction::Page(ScrollDirection::Up),
            (KeyCode::Char('g'), m) if plain(m) => InputAction::SelectFirst,
            (KeyCode::Home, _) => InputAction::SelectFirst,
            (KeyCode::Char('G'), m) if plain(m) => InputAction::SelectLast,
            (KeyCode::End, _) => InputAction::SelectLast,
            (KeyCode::Enter, _) | (KeyCode::Char('o'), KeyModifiers::NONE) => {
                InputAction::Activate
            }
            _ => InputAction::InvalidInput,
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Tab, _) | (KeyCode::Down, _) => {
                self.mode = InputMode::Browse;
                InputAction::BlurSearch
            }
            (KeyCode::Esc, _) => {
                self.mode = InputMode::Browse;
                self.search_buffer.clear();
                InputAction::CancelSearch
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.search_buffer.is_empty() {
                    return InputAction::NoAction;
                }
                self.search_buffer.clear();
                InputAction::SearchEdited(String::new())
            }
            (KeyCode::Backspace, _) => {
                if self.search_buffer.pop().is_none() {
                    return InputAction::NoAction;
                }
                InputAction::SearchEdited(self.search_buffer.clone())
            }
            (KeyCode::Char(ch), m) if plain(m) && !ch.is_control() => {
                self.search_buffer.push(ch);
                InputAction::SearchEdited(self.search_buffer.clone())
            }
            _ => InputAction::InvalidInput,
        }
    }

    /// Insert pasted text into the search box, focusing it first.
    pub fn handle_paste(&mut self, text: &str) -> InputAction {
        let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
        if cleaned.is_empty() {
            return InputAction::NoAction;
        }
        self.mode = InputMode::Search;
        self.search_buffer.push_str(&cleaned);
        InputAction::SearchEdited(self.search_buffer.clone())
    }

    pub fn search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new(state_machine: InputStateMachine) -> Self {
        Self {
            state_machine,
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }

            while let Some(extra_event) = self.raw_input.pop_pending() {
                if let Some(action) = self.process_raw_event(extra_event) {
                    actions.push(action);
                }
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        while let Some(raw_event) = self.raw_input.pop_pending() {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Paste(text) => self.state_machine.handle_paste(&text),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new(InputStateMachine::new())
    }
}
