//! Screen rendering modules

pub mod scanning;
pub mod summary;

use crate::scan_state::ScanStatus;
use crate::session::{ConnectionStatus, MonitorSession};
use crate::tui::{theme::Styles, AppState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Spinner frames for animation
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn get_spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize / 2) % SPINNER_FRAMES.len()]
}

/// Main render function: header, a body chosen by scan status, footer
pub fn render(f: &mut Frame, session: &MonitorSession, app_state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + status
            Constraint::Min(8),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], session);

    match session.status() {
        ScanStatus::Unset => scanning::render_waiting(f, chunks[1], app_state),
        ScanStatus::Scanning => scanning::render(f, chunks[1], session, app_state),
        ScanStatus::Done => summary::render(f, chunks[1], session),
    }

    render_footer(f, chunks[2], session, app_state);
}

fn render_header(f: &mut Frame, area: Rect, session: &MonitorSession) {
    let view = session.view();

    let mut spans = vec![Span::styled("  duwatch", Styles::title())];
    if let Some(label) = view.status {
        spans.push(Span::styled("(", Styles::secondary()));
        spans.push(Span::styled(format!("\"{}\"", label), Styles::status()));
        spans.push(Span::styled(")", Styles::secondary()));
    }

    let badge_style = match session.connection() {
        ConnectionStatus::Online => Styles::online(),
        ConnectionStatus::Offline => Styles::offline(),
        ConnectionStatus::Connecting => Styles::secondary(),
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(14)])
        .split(area);

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM | Borders::LEFT)
            .border_style(Styles::border()),
    );
    f.render_widget(title, columns[0]);

    let badge = Paragraph::new(Line::from(Span::styled(
        session.connection().to_string(),
        badge_style,
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT)
            .border_style(Styles::border()),
    );
    f.render_widget(badge, columns[1]);
}

fn render_footer(f: &mut Frame, area: Rect, session: &MonitorSession, app_state: &AppState) {
    let last_update = session
        .last_update()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut spans = vec![
        Span::styled("  ", Styles::secondary()),
        Span::styled(app_state.endpoint.clone(), Styles::secondary()),
        Span::styled("  │  Last update: ", Styles::secondary()),
        Span::styled(last_update, Styles::primary()),
    ];

    if session.decode_errors() > 0 {
        spans.push(Span::styled("  │  Bad frames: ", Styles::secondary()));
        spans.push(Span::styled(session.decode_errors().to_string(), Styles::offline()));
    }

    spans.push(Span::styled("  │  ", Styles::secondary()));
    spans.push(Span::styled("q", Styles::emphasis()));
    spans.push(Span::styled(" quit", Styles::secondary()));

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    f.render_widget(footer, area);
}
