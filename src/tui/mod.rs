pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{AppContext, AppState, Result, TermList};
use crate::domain::SearchPage;
use crate::session::{PendingRequest, RequestKind};

use self::app::{ActivePane, InputMode, TuiApp};
use self::event::{is_interrupt, Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

type FetchOutcome = (RequestKind, Result<SearchPage>);

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut state = ctx.load_state()?;
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &ctx, &mut state).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext, state: &mut AppState) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    loop {
        drain_outcomes(&mut tui_app, state, &mut rx);
        terminal.draw(|frame| layout::render(frame, &mut tui_app, state))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.input_mode == InputMode::Normal {
                    handle_action(&mut tui_app, ctx, state, &tx, Action::from(key))?;
                } else {
                    handle_input(&mut tui_app, ctx, state, &tx, key)?;
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Applies every fetch result that has arrived, in arrival order.
fn drain_outcomes(
    tui_app: &mut TuiApp,
    state: &AppState,
    rx: &mut UnboundedReceiver<FetchOutcome>,
) {
    while let Ok((kind, result)) = rx.try_recv() {
        tui_app.session.complete(kind, result);
        if kind == RequestKind::Fresh {
            tui_app.reset_results_cursor();
        }
        tui_app.sync_cursors(state);
    }
}

fn spawn_fetch(
    ctx: &AppContext,
    state: &AppState,
    request: PendingRequest,
    tx: &UnboundedSender<FetchOutcome>,
) {
    let fetcher = ctx.fetcher.clone();
    let include = state.included_terms().clone();
    let exclude = state.excluded_terms().clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = fetcher
            .fetch_page(
                &request.query,
                request.page_token.as_deref(),
                &include,
                &exclude,
            )
            .await;
        if tx.send((request.kind, result)).is_err() {
            tracing::debug!("UI closed before fetch completed");
        }
    });
}

fn start_search(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    state: &mut AppState,
    tx: &UnboundedSender<FetchOutcome>,
    query: &str,
) -> Result<()> {
    if query.trim().is_empty() {
        return Ok(());
    }
    state.record_search(query)?;
    let request = tui_app.session.begin_search(query);
    tui_app.clear_status();
    tui_app.sync_cursors(state);
    spawn_fetch(ctx, state, request, tx);
    Ok(())
}

fn handle_input(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    state: &mut AppState,
    tx: &UnboundedSender<FetchOutcome>,
    key: KeyEvent,
) -> Result<()> {
    if is_interrupt(&key) {
        tui_app.should_quit = true;
        return Ok(());
    }

    match key.code {
        KeyCode::Esc => tui_app.cancel_input(),
        KeyCode::Backspace => {
            tui_app.input.pop();
        }
        KeyCode::Char(c) => tui_app.input.push(c),
        KeyCode::Enter => {
            let mode = tui_app.input_mode;
            let input = tui_app.take_input();
            match mode {
                InputMode::Search => start_search(tui_app, ctx, state, tx, &input)?,
                InputMode::AddTerm(list) => {
                    if state.add_term(list, &input)? {
                        let message = format!("Added {} term: {}", list.label(), input.trim());
                        tui_app.set_status(message);
                    } else {
                        tui_app.set_status("Term is empty or already present".to_string());
                    }
                }
                InputMode::Normal => {}
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_action(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    state: &mut AppState,
    tx: &UnboundedSender<FetchOutcome>,
    action: Action,
) -> Result<()> {
    match action {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(state),
        Action::NextPage => tui_app.next_page(state),
        Action::PrevPage => tui_app.prev_page(),
        Action::NextPane => tui_app.active_pane = tui_app.active_pane.next(),
        Action::PrevPane => tui_app.active_pane = tui_app.active_pane.prev(),
        Action::Search => tui_app.start_input(InputMode::Search),
        Action::LoadMore => match tui_app.session.begin_load_more() {
            Some(request) => {
                tui_app.clear_status();
                spawn_fetch(ctx, state, request, tx);
            }
            None if tui_app.session.is_loading() => {}
            None => tui_app.set_status("No more results".to_string()),
        },
        Action::Select => match tui_app.active_pane {
            ActivePane::History => {
                let query = state.history().get(tui_app.history.index).map(|h| h.term.clone());
                if let Some(query) = query {
                    start_search(tui_app, ctx, state, tx, &query)?;
                    tui_app.active_pane = ActivePane::Results;
                }
            }
            ActivePane::Favorites => {
                let query = state
                    .favorites()
                    .iter()
                    .nth(tui_app.favorites.index)
                    .map(|f| f.search_term.clone());
                if let Some(query) = query {
                    start_search(tui_app, ctx, state, tx, &query)?;
                    tui_app.active_pane = ActivePane::Results;
                }
            }
            ActivePane::Results => open_selected(tui_app, state),
            ActivePane::Include | ActivePane::Exclude => {}
        },
        Action::OpenInBrowser => open_selected(tui_app, state),
        Action::ToggleFavorite => match tui_app.active_pane {
            ActivePane::Results => {
                if let Some(item) = tui_app.selected_result().cloned() {
                    let query = tui_app.session.query().unwrap_or_default().to_string();
                    let now_favorite = state.toggle_favorite(&item, &query)?;
                    let verb = if now_favorite { "Saved" } else { "Removed" };
                    tui_app.set_status(format!("{} favorite: {}", verb, item.display_title()));
                }
            }
            ActivePane::Favorites => remove_selected_favorite(tui_app, state)?,
            _ => {}
        },
        Action::AddTerm => {
            if let Some(list) = tui_app.active_pane.term_list() {
                tui_app.start_input(InputMode::AddTerm(list));
            }
        }
        Action::Delete => match tui_app.active_pane {
            ActivePane::Include | ActivePane::Exclude => {
                if let Some(list) = tui_app.active_pane.term_list() {
                    let cursor = match list {
                        TermList::Include => tui_app.include.index,
                        TermList::Exclude => tui_app.exclude.index,
                    };
                    let term = state.terms(list).iter().nth(cursor).map(String::from);
                    if let Some(term) = term {
                        state.remove_term(list, &term)?;
                        tui_app.set_status(format!("Removed {} term: {}", list.label(), term));
                    }
                }
            }
            ActivePane::Favorites => remove_selected_favorite(tui_app, state)?,
            ActivePane::History => {
                let query = state.history().get(tui_app.history.index).map(|h| h.term.clone());
                if let Some(query) = query {
                    state.remove_history_entry(&query)?;
                }
            }
            ActivePane::Results => {}
        },
        Action::None => {}
    }

    tui_app.sync_cursors(state);
    Ok(())
}

fn remove_selected_favorite(tui_app: &mut TuiApp, state: &mut AppState) -> Result<()> {
    let id = state
        .favorites()
        .iter()
        .nth(tui_app.favorites.index)
        .map(|f| f.item.id.clone());
    if let Some(id) = id {
        state.remove_favorite(&id)?;
        tui_app.set_status(format!("Removed favorite: {}", id));
    }
    Ok(())
}

fn open_selected(tui_app: &mut TuiApp, state: &AppState) {
    let url = match tui_app.active_pane {
        ActivePane::Favorites => state
            .favorites()
            .iter()
            .nth(tui_app.favorites.index)
            .map(|f| f.item.watch_url()),
        _ => tui_app.selected_result().map(|item| item.watch_url()),
    };

    if let Some(url) = url {
        if let Err(e) = open::that(&url) {
            tui_app.set_status(format!("Failed to open browser: {}", e));
        }
    }
}
