use ratatui::widgets::ListState;

use crate::app::{AppState, TermList};
use crate::domain::ResultItem;
use crate::session::SearchSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Results,
    Include,
    Exclude,
    Favorites,
    History,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Results => ActivePane::Include,
            ActivePane::Include => ActivePane::Exclude,
            ActivePane::Exclude => ActivePane::Favorites,
            ActivePane::Favorites => ActivePane::History,
            ActivePane::History => ActivePane::Results,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Results => ActivePane::History,
            ActivePane::Include => ActivePane::Results,
            ActivePane::Exclude => ActivePane::Include,
            ActivePane::Favorites => ActivePane::Exclude,
            ActivePane::History => ActivePane::Favorites,
        }
    }

    pub fn term_list(self) -> Option<TermList> {
        match self {
            ActivePane::Include => Some(TermList::Include),
            ActivePane::Exclude => Some(TermList::Exclude),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    AddTerm(TermList),
}

pub const PAGE_SIZE: usize = 10;

/// Selection within one list pane.
#[derive(Debug, Default)]
pub struct PaneCursor {
    pub index: usize,
    pub list_state: ListState,
}

impl PaneCursor {
    fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            index: 0,
            list_state,
        }
    }

    fn set(&mut self, index: usize) {
        self.index = index;
        self.list_state.select(Some(index));
    }

    fn up(&mut self, step: usize) {
        self.set(self.index.saturating_sub(step));
    }

    fn down(&mut self, step: usize, len: usize) {
        let max_index = len.saturating_sub(1);
        self.set((self.index + step).min(max_index));
    }

    /// Keeps the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.set(len.saturating_sub(1));
        }
    }
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub input_mode: InputMode,
    pub input: String,
    pub session: SearchSession,
    pub results: PaneCursor,
    pub include: PaneCursor,
    pub exclude: PaneCursor,
    pub favorites: PaneCursor,
    pub history: PaneCursor,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            active_pane: ActivePane::Results,
            input_mode: InputMode::Normal,
            input: String::new(),
            session: SearchSession::new(),
            results: PaneCursor::new(),
            include: PaneCursor::new(),
            exclude: PaneCursor::new(),
            favorites: PaneCursor::new(),
            history: PaneCursor::new(),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn selected_result(&self) -> Option<&ResultItem> {
        self.session.items().get(self.results.index)
    }

    fn pane_len(&self, state: &AppState) -> usize {
        match self.active_pane {
            ActivePane::Results => self.session.items().len(),
            ActivePane::Include => state.included_terms().len(),
            ActivePane::Exclude => state.excluded_terms().len(),
            ActivePane::Favorites => state.favorites().len(),
            ActivePane::History => state.history().len(),
        }
    }

    fn active_cursor(&mut self) -> &mut PaneCursor {
        match self.active_pane {
            ActivePane::Results => &mut self.results,
            ActivePane::Include => &mut self.include,
            ActivePane::Exclude => &mut self.exclude,
            ActivePane::Favorites => &mut self.favorites,
            ActivePane::History => &mut self.history,
        }
    }

    pub fn move_up(&mut self) {
        self.active_cursor().up(1);
    }

    pub fn move_down(&mut self, state: &AppState) {
        let len = self.pane_len(state);
        self.active_cursor().down(1, len);
    }

    pub fn next_page(&mut self, state: &AppState) {
        let len = self.pane_len(state);
        self.active_cursor().down(PAGE_SIZE, len);
    }

    pub fn prev_page(&mut self) {
        self.active_cursor().up(PAGE_SIZE);
    }

    /// Re-clamps every cursor after lists changed underneath them.
    pub fn sync_cursors(&mut self, state: &AppState) {
        self.results.clamp(self.session.items().len());
        self.include.clamp(state.included_terms().len());
        self.exclude.clamp(state.excluded_terms().len());
        self.favorites.clamp(state.favorites().len());
        self.history.clamp(state.history().len());
    }

    pub fn reset_results_cursor(&mut self) {
        self.results.set(0);
    }

    pub fn start_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input.clear();
    }

    /// Leaves input mode and hands back what was typed.
    pub fn take_input(&mut self) -> String {
        self.input_mode = InputMode::Normal;
        std::mem::take(&mut self.input)
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
