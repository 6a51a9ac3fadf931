use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Normal-mode actions. Text entry is handled separately while an input
/// prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    NextPane,
    PrevPane,
    Search,
    Select,
    LoadMore,
    ToggleFavorite,
    AddTerm,
    Delete,
    OpenInBrowser,
    None,
}

/// Ctrl-C quits from every mode, including text prompts.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        if is_interrupt(&key) {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Tab => Action::NextPane,
            KeyCode::BackTab => Action::PrevPane,
            KeyCode::Char('/') | KeyCode::Char('s') => Action::Search,
            KeyCode::Enter => Action::Select,
            KeyCode::Char('m') | KeyCode::Char('L') => Action::LoadMore,
            KeyCode::Char('f') => Action::ToggleFavorite,
            KeyCode::Char('a') => Action::AddTerm,
            KeyCode::Char('d') | KeyCode::Delete => Action::Delete,
            KeyCode::Char('o') => Action::OpenInBrowser,
            _ => Action::None,
        }
    }
}
