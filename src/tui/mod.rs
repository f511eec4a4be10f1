//! Full-screen terminal front end

pub mod screens;
pub mod theme;

use crate::session::MonitorSession;
use crate::transport::TransportEvent;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Everything a frame needs besides the session
#[derive(Debug, Clone)]
pub struct AppState {
    pub endpoint: String,
    pub tick: u64,
    pub running: bool,
    /// Set once the transport has gone away for good
    pub transport_ended: bool,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tick: 0,
            running: true,
            transport_ended: false,
        }
    }
}

/// Feed every queued transport event into the session, in order
pub fn drain_events(
    events: &mut mpsc::UnboundedReceiver<TransportEvent>,
    session: &mut MonitorSession,
    app_state: &mut AppState,
) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                session.handle(event);
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                app_state.transport_ended = true;
                break;
            }
        }
    }
}

/// Run the UI until the user quits
pub fn run(
    events: &mut mpsc::UnboundedReceiver<TransportEvent>,
    session: &mut MonitorSession,
    endpoint: &str,
    tick_rate: Duration,
) -> Result<()> {
    let mut terminal = setup_terminal().context("Failed to set up terminal")?;
    let result = event_loop(&mut terminal, events, session, endpoint, tick_rate);
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    events: &mut mpsc::UnboundedReceiver<TransportEvent>,
    session: &mut MonitorSession,
    endpoint: &str,
    tick_rate: Duration,
) -> Result<()> {
    let mut app_state = AppState::new(endpoint);

    while app_state.running {
        drain_events(events, session, &mut app_state);
        terminal.draw(|f| screens::render(f, session, &app_state))?;
        handle_input(&mut app_state, tick_rate)?;
        app_state.tick = app_state.tick.wrapping_add(1);
    }

    Ok(())
}

fn handle_input(app_state: &mut AppState, tick_rate: Duration) -> Result<()> {
    if !event::poll(tick_rate)? {
        return Ok(());
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app_state.running = false;
        }
    }

    Ok(())
}
