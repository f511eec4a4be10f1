//! Streaming connection to the scanner with automatic reconnection
//!
//! [`TransportManager`] keeps at most one connection open. Whenever that
//! connection fails or closes it reports [`TransportEvent::Closed`], waits a
//! fixed delay and connects again, forever, until [`TransportManager::stop`]
//! is called.

use async_trait::async_trait;
use futures::future;
use futures::stream::{BoxStream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Default endpoint exposed by the scanner's web UI
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8888/ws";

/// Delay between a close and the next connection attempt
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Text frames received on an open connection
pub type FrameStream = BoxStream<'static, Result<String, TransportError>>;

/// What happened on the transport, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Frame(String),
    /// Emitted exactly once per failed attempt or dropped connection
    Closed,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("connection error: {0}")]
    Stream(String),

    #[error("transport is already running")]
    AlreadyRunning,
}

/// Opens streaming connections
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<FrameStream, TransportError>;

    /// Where this connector points, for logs
    fn endpoint(&self) -> &str;
}

/// WebSocket connector
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self) -> Result<FrameStream, TransportError> {
        let (socket, _response) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|e| TransportError::Connect {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        // Receive-only: text frames are forwarded, a close frame ends the
        // stream, everything else is dropped.
        let frames = socket
            .take_while(|message| future::ready(!matches!(message, Ok(Message::Close(_)))))
            .filter_map(|message| {
                future::ready(match message {
                    Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                    Ok(_) => None,
                    Err(e) => Some(Err(TransportError::Stream(e.to_string()))),
                })
            })
            .boxed();

        Ok(frames)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

/// Owns the reconnect loop
pub struct TransportManager<C> {
    connector: Arc<C>,
    reconnect_delay: Duration,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl<C: Connector + 'static> TransportManager<C> {
    pub fn new(connector: C, reconnect_delay: Duration) -> Self {
        Self {
            connector: Arc::new(connector),
            reconnect_delay,
            shutdown: None,
            task: None,
        }
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Spawn the connection loop on the current tokio runtime.
    ///
    /// Connection problems are never returned here; they show up as
    /// [`TransportEvent::Closed`] on `events`.
    pub fn start(&mut self, events: mpsc::UnboundedSender<TransportEvent>) -> Result<(), TransportError> {
        if self.is_running() {
            return Err(TransportError::AlreadyRunning);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let connector = Arc::clone(&self.connector);
        let delay = self.reconnect_delay;

        info!(endpoint = connector.endpoint(), "starting transport");
        self.task = Some(tokio::spawn(run_loop(connector, delay, events, shutdown_rx)));
        self.shutdown = Some(shutdown_tx);
        Ok(())
    }

    /// Stop reconnecting, close any open connection and wait for the loop to exit
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "transport task ended abnormally");
            }
            info!("transport stopped");
        }
    }
}

impl<C> Drop for TransportManager<C> {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
    }
}

/// Connect, forward frames until the connection ends, report the close,
/// sleep, repeat. Returns on shutdown or when nobody listens anymore.
async fn run_loop<C: Connector>(
    connector: Arc<C>,
    delay: Duration,
    events: mpsc::UnboundedSender<TransportEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        debug!(endpoint = connector.endpoint(), "connecting");

        let attempt = tokio::select! {
            result = connector.connect() => result,
            _ = shutdown.changed() => return,
        };

        match attempt {
            Ok(mut frames) => {
                info!(endpoint = connector.endpoint(), "connection open");
                if events.send(TransportEvent::Opened).is_err() {
                    return;
                }

                loop {
                    let next = tokio::select! {
                        next = frames.next() => next,
                        _ = shutdown.changed() => return,
                    };

                    match next {
                        Some(Ok(text)) => {
                            if events.send(TransportEvent::Frame(text)).is_err() {
                                return;
                            }
                        }
                        Some(Err(e)) => {
                            warn!(error = %e, "connection error, closing");
                            break;
                        }
                        None => break,
                    }
                }
            }
            Err(e) => warn!(error = %e, "connection attempt failed"),
        }

        info!(
            delay_ms = delay.as_millis() as u64,
            "connection closed, reconnecting"
        );
        if events.send(TransportEvent::Closed).is_err() {
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.changed() => return,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{frame, Attempt, ScriptedConnector};
    use super::*;

    async fn next_event(rx: &mut mpsc::UnboundedReceiver<TransportEvent>) -> TransportEvent {
        rx.recv().await.expect("transport loop ended unexpectedly")
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_are_forwarded_in_order() {
        let connector = ScriptedConnector::new(vec![Attempt::Open(vec![frame("a"), frame("b")])]);
        let mut manager = TransportManager::new(connector, DEFAULT_RECONNECT_DELAY);
        let (tx, mut rx) = mpsc::unbounded_channel();

        manager.start(tx).unwrap();

        assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
        assert_eq!(next_event(&mut rx).await, TransportEvent::Frame("a".into()));
        assert_eq!(next_event(&mut rx).await, TransportEvent::Frame("b".into()));
        assert_eq!(next_event(&mut rx).await, TransportEvent::Closed);

        manager.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnects_after_fixed_delay_without_bound() {
        let connector = ScriptedConnector::new(vec![]);
        let connects = Arc::clone(&connector.connects);
        let mut manager = TransportManager::new(connector, DEFAULT_RECONNECT_DELAY);
        let (tx, mut rx) = mpsc::unbounded_channel();

        manager.start(tx).unwrap();

        for _ in 0..6 {
            assert_eq!(next_event(&mut rx).await, TransportEvent::Closed);
        }
        manager.stop().await;

        let times = connects.lock().unwrap().clone();
        assert!(times.len() >= 6);
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_millis(1000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_reconnect_delay() {
        let connector = ScriptedConnector::new(vec![Attempt::Open(vec![])]);
        let connects = Arc::clone(&connector.connects);
        let mut manager = TransportManager::new(connector, Duration::from_millis(250));
        assert_eq!(manager.reconnect_delay(), Duration::from_millis(250));
        let (tx, mut rx) = mpsc::unbounded_channel();

        manager.start(tx).unwrap();
        assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
        assert_eq!(next_event(&mut rx).await, TransportEvent::Closed);
        assert_eq!(next_event(&mut rx).await, TransportEvent::Closed);
        manager.stop().await;

        let times = connects.lock().unwrap().clone();
        assert_eq!(times[1] - times[0], Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_error_closes_exactly_once() {
        let connector = ScriptedConnector::new(vec![
            Attempt::Open(vec![
                frame("first"),
                Err(TransportError::Stream("reset by peer".into())),
                frame("never delivered"),
            ]),
            Attempt::Hang,
        ]);
        let mut manager = TransportManager::new(connector, DEFAULT_RECONNECT_DELAY);
        let (tx, mut rx) = mpsc::unbounded_channel();

        manager.start(tx).unwrap();

        assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
        assert_eq!(next_event(&mut rx).await, TransportEvent::Frame("first".into()));
        assert_eq!(next_event(&mut rx).await, TransportEvent::Closed);
        // Second connection opens and stays quiet
        assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);

        manager.stop().await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts_open_connection() {
        let connector = ScriptedConnector::new(vec![Attempt::Hang]);
        let connects = Arc::clone(&connector.connects);
        let mut manager = TransportManager::new(connector, DEFAULT_RECONNECT_DELAY);
        let (tx, mut rx) = mpsc::unbounded_channel();

        manager.start(tx).unwrap();
        assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
        assert!(manager.is_running());

        manager.stop().await;
        assert!(!manager.is_running());

        // No close is reported for a deliberate stop and no reconnect follows
        assert!(rx.recv().await.is_none());
        assert_eq!(connects.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_rejected() {
        let connector = ScriptedConnector::new(vec![Attempt::Hang]);
        let mut manager = TransportManager::new(connector, DEFAULT_RECONNECT_DELAY);
        let (tx, mut rx) = mpsc::unbounded_channel();

        manager.start(tx.clone()).unwrap();
        assert_eq!(next_event(&mut rx).await, TransportEvent::Opened);
        assert!(matches!(manager.start(tx), Err(TransportError::AlreadyRunning)));

        manager.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ends_when_receiver_is_dropped() {
        let connector = ScriptedConnector::new(vec![]);
        let mut manager = TransportManager::new(connector, DEFAULT_RECONNECT_DELAY);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        manager.start(tx).unwrap();
        manager.stop().await;
        assert!(!manager.is_running());
    }
}
