use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, TermList};
use crate::session::SessionStatus;
use crate::tui::app::{ActivePane, InputMode, PaneCursor, TuiApp};

const ACTIVE_BORDER: Color = Color::Cyan;
const INACTIVE_BORDER: Color = Color::DarkGray;
const INCLUDE_TERM: Color = Color::Green;
const EXCLUDE_TERM: Color = Color::Red;
const FAVORITE_MARK: Color = Color::Yellow;
const META: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, app: &mut TuiApp, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(body[1]);

    render_search_box(frame, app, chunks[0]);
    render_results_pane(frame, app, state, body[0]);

    let include: Vec<ListItem> = state
        .included_terms()
        .iter()
        .map(|t| ListItem::new(t.to_string()).style(Style::default().fg(INCLUDE_TERM)))
        .collect();
    render_list(
        frame,
        " Include ",
        include,
        app.active_pane == ActivePane::Include,
        &mut app.include,
        side[0],
    );

    let exclude: Vec<ListItem> = state
        .excluded_terms()
        .iter()
        .map(|t| ListItem::new(t.to_string()).style(Style::default().fg(EXCLUDE_TERM)))
        .collect();
    render_list(
        frame,
        " Exclude ",
        exclude,
        app.active_pane == ActivePane::Exclude,
        &mut app.exclude,
        side[1],
    );

    let favorites: Vec<ListItem> = state
        .favorites()
        .iter()
        .map(|f| ListItem::new(f.item.display_title().to_string()))
        .collect();
    render_list(
        frame,
        " Favorites ",
        favorites,
        app.active_pane == ActivePane::Favorites,
        &mut app.favorites,
        side[2],
    );

    let history: Vec<ListItem> = state
        .history()
        .iter()
        .map(|h| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", h.timestamp.format("%m/%d")),
                    Style::default().fg(META),
                ),
                Span::raw(h.term.clone()),
            ]))
        })
        .collect();
    render_list(
        frame,
        " History ",
        history,
        app.active_pane == ActivePane::History,
        &mut app.history,
        side[3],
    );

    render_status_bar(frame, app, chunks[2]);
}

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(ACTIVE_BORDER)
    } else {
        Style::default().fg(INACTIVE_BORDER)
    }
}

fn highlight_style(active: bool) -> Style {
    if active {
        Style::default()
            .bg(ACTIVE_BORDER)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(INACTIVE_BORDER).fg(Color::White)
    }
}

fn render_list(
    frame: &mut Frame,
    label: &str,
    items: Vec<ListItem>,
    active: bool,
    cursor: &mut PaneCursor,
    area: Rect,
) {
    let title = format!("{}({}) ", label, items.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(active));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(active))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut cursor.list_state);
}

fn render_search_box(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let (title, text, style) = match app.input_mode {
        InputMode::Search => (" Search ", format!("{}_", app.input), Style::default()),
        InputMode::AddTerm(TermList::Include) => (
            " Add include term ",
            format!("{}_", app.input),
            Style::default(),
        ),
        InputMode::AddTerm(TermList::Exclude) => (
            " Add exclude term ",
            format!("{}_", app.input),
            Style::default(),
        ),
        InputMode::Normal => (
            " Search ",
            app.session.query().unwrap_or("press / to search").to_string(),
            Style::default().fg(META),
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app.input_mode != InputMode::Normal));

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn render_results_pane(frame: &mut Frame, app: &mut TuiApp, state: &AppState, area: Rect) {
    let is_active = app.active_pane == ActivePane::Results;
    let session = &app.session;

    let suffix = match session.status() {
        SessionStatus::Loading => " loading...",
        _ if session.can_load_more() => " more: m",
        _ => "",
    };
    let title = format!(" Results ({}){} ", session.items().len(), suffix);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    if session.items().is_empty() {
        let text = match (session.status(), session.error()) {
            (SessionStatus::Failed, Some(message)) => {
                Line::from(Span::styled(message, Style::default().fg(Color::Red)))
            }
            (SessionStatus::Loading, _) => Line::from("Searching..."),
            (SessionStatus::Ready, _) => Line::from("No results"),
            _ => Line::from("Enter a search term to find videos"),
        };
        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = session
        .items()
        .iter()
        .map(|item| {
            let marker = if state.favorites().contains(&item.id) {
                Span::styled("★ ", Style::default().fg(FAVORITE_MARK))
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(
                    format!("{} ", item.published_at.format("%Y-%m-%d")),
                    Style::default().fg(META),
                ),
                Span::raw(item.display_title().to_string()),
                Span::styled(
                    format!("  {}", item.channel_title),
                    Style::default().fg(META),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(is_active))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.results.list_state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.input_mode != InputMode::Normal {
        "Enter:Confirm  Esc:Cancel".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if let (SessionStatus::Failed, Some(message)) =
        (app.session.status(), app.session.error())
    {
        message.to_string()
    } else {
        "/:Search  j/k:Nav  Tab:Pane  m:More  f:Fav  a:Add term  d:Delete  o:Open  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
