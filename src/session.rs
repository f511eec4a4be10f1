//! The single message-handling path of a monitoring session
//!
//! A [`MonitorSession`] owns the only [`ClientState`] and is the only thing
//! that mutates it. Transport events are fed in one at a time, in arrival
//! order.

use crate::presenter::{self, View};
use crate::protocol::{self, ProgressMessage};
use crate::scan_state::{ClientState, ScanStatus, Transition};
use crate::size::SizeFormat;
use crate::transport::TransportEvent;
use chrono::{DateTime, Local};
use std::fmt;
use tracing::{debug, info, warn};

/// Reachability of the scanner, as seen by the transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Nothing has happened yet
    #[default]
    Connecting,
    Online,
    Offline,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Online => "Online",
            ConnectionStatus::Offline => "Offline",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct MonitorSession {
    state: ClientState,
    connection: ConnectionStatus,
    size_format: SizeFormat,
    frames_received: u64,
    decode_errors: u64,
    last_update: Option<DateTime<Local>>,
}

impl MonitorSession {
    pub fn new(size_format: SizeFormat) -> Self {
        Self {
            state: ClientState::new(),
            connection: ConnectionStatus::default(),
            size_format,
            frames_received: 0,
            decode_errors: 0,
            last_update: None,
        }
    }

    /// Process one transport event. Returns the status transition it caused, if any.
    pub fn handle(&mut self, event: TransportEvent) -> Option<Transition> {
        match event {
            TransportEvent::Opened => {
                self.connection = ConnectionStatus::Online;
                None
            }
            TransportEvent::Frame(text) => {
                self.frames_received += 1;
                match protocol::decode_frame(&text) {
                    Ok(message) => self.apply(message),
                    Err(e) => {
                        self.decode_errors += 1;
                        warn!(error = %e, frame = %text.trim_end(), "dropping undecodable frame");
                        None
                    }
                }
            }
            TransportEvent::Closed => {
                self.connection = ConnectionStatus::Offline;
                self.apply(ProgressMessage::Closed)
            }
        }
    }

    fn apply(&mut self, message: ProgressMessage) -> Option<Transition> {
        if let ProgressMessage::Progress(progress) = message {
            self.last_update = Some(Local::now());
            debug!(
                done = progress.done,
                items = progress.item_count,
                bytes = progress.total_size_bytes,
                "progress"
            );
        }

        let transition = self.state.apply(&message);
        if let Some(t) = transition {
            info!(kind = message.kind(), from = %t.from, to = %t.to, "scan status changed");
        }
        transition
    }

    pub fn view(&self) -> View {
        presenter::present(&self.state, self.size_format)
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn status(&self) -> ScanStatus {
        self.state.status
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn size_format(&self) -> SizeFormat {
        self.size_format
    }

    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    pub fn decode_errors(&self) -> u64 {
        self.decode_errors
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }
}
