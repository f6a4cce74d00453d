//! City search view
//!
//! Renders the query input and the list of geocoding candidates returned
//! for the submitted query.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the search view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // input box
            Constraint::Min(3),    // results
            Constraint::Length(1), // hints
            Constraint::Length(1), // status
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Search City",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_input(frame, app, chunks[1]);
    render_results(frame, app, chunks[2]);

    let hints = Paragraph::new(Span::styled(
        "Type a city · Enter search/select · ↑/↓ move · Esc back",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[3]);

    if let Some(status) = &app.status {
        let status_line = Paragraph::new(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(status_line, chunks[4]);
    }
}

/// Renders the query input box with a trailing cursor
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Line::from(vec![
        Span::raw(app.search.input.clone()),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(input).block(block), area);
}

/// Renders the candidate list with the current selection highlighted
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    if app.search.results.is_empty() {
        return;
    }

    let lines: Vec<Line> = app
        .search
        .results
        .iter()
        .enumerate()
        .map(|(i, place)| {
            if i == app.search.selected {
                Line::from(vec![
                    Span::styled("▶ ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        place.label(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(place.label(), Style::default().fg(Color::Gray)),
                ])
            }
        })
        .collect();

    let block = Block::default().title(" Matches ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
