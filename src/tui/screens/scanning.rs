//! Scanning screen with live counters

use crate::session::MonitorSession;
use crate::tui::{screens::get_spinner, theme::Styles, AppState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Body shown before the first progress message
pub fn render_waiting(f: &mut Frame, area: Rect, app_state: &AppState) {
    let spinner = get_spinner(app_state.tick);

    let message = if app_state.transport_ended {
        "Transport stopped".to_string()
    } else {
        format!("{}  Waiting for scan progress...", spinner)
    };

    let waiting = Paragraph::new(Line::from(vec![Span::styled(message, Styles::secondary())]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border())
                .padding(Padding::uniform(1)),
        );
    f.render_widget(waiting, area);
}

pub fn render(f: &mut Frame, area: Rect, session: &MonitorSession, app_state: &AppState) {
    let view = session.view();
    let Some(progress) = view.progress else {
        render_waiting(f, area, app_state);
        return;
    };
    let spinner = get_spinner(app_state.tick);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(6), // Stats box
            Constraint::Min(0),
        ])
        .split(area);

    // Section label outside the box
    let label = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", spinner), Styles::emphasis()),
        Span::styled("PROGRESS", Styles::header()),
    ]));
    f.render_widget(label, chunks[0]);

    let stats_lines = vec![
        Line::from(vec![
            Span::styled("Total items: ", Styles::header()),
            Span::styled(progress.item_count.to_string(), Styles::value()),
        ]),
        Line::from(vec![
            Span::styled("Size: ", Styles::header()),
            Span::styled(progress.size, Styles::value()),
        ]),
    ];
    let stats = Paragraph::new(stats_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .padding(Padding::uniform(1)),
    );
    f.render_widget(stats, chunks[1]);
}
