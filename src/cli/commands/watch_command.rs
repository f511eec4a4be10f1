//! Watch command feature.
//!
//! This module owns the "duwatch watch" command: it wires the transport,
//! the session and one of the two front ends together.

use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::logging::{self, LogTarget};
use crate::output::{self, OutputMode};
use crate::scan_state::ScanStatus;
use crate::session::MonitorSession;
use crate::size::SizeFormat;
use crate::transport::{TransportManager, WsConnector};
use crate::tui;

pub(crate) struct WatchOptions {
    pub url: Option<String>,
    pub plain: bool,
    pub once: bool,
    pub reconnect_delay_ms: Option<u64>,
    pub size_format: Option<SizeFormat>,
    pub config: Option<PathBuf>,
    pub verbose: u8,
    pub quiet: bool,
}

/// Settings after merging command line flags over the config file
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WatchSettings {
    pub url: String,
    pub reconnect_delay: Duration,
    pub size_format: SizeFormat,
    pub tick_rate: Duration,
}

impl WatchSettings {
    pub fn resolve(options: &WatchOptions, config: &Config) -> Self {
        Self {
            url: options
                .url
                .clone()
                .unwrap_or_else(|| config.endpoint.url.clone()),
            reconnect_delay: options
                .reconnect_delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.reconnect.delay()),
            size_format: options.size_format.unwrap_or(config.display.size_format),
            tick_rate: Duration::from_millis(config.display.tick_rate_ms.max(10)),
        }
    }
}

pub(crate) fn handle_watch(options: WatchOptions) -> anyhow::Result<()> {
    let config = Config::load(options.config.as_deref()).context("Failed to load configuration")?;
    let settings = WatchSettings::resolve(&options, &config);
    let mode = OutputMode::from_flags(options.verbose, options.quiet);

    let level = logging::level_for(options.verbose, options.quiet, &config.logging.level);
    if options.plain {
        logging::init(LogTarget::Stderr, &level)?;
    } else if let Some(path) = config.log_path() {
        logging::init(LogTarget::File(&path), &level)?;
    }

    // One worker thread runs the transport; the session stays on this thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("duwatch-transport")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let mut manager = TransportManager::new(WsConnector::new(settings.url.clone()), settings.reconnect_delay);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = MonitorSession::new(settings.size_format);

    {
        let _guard = runtime.enter();
        manager.start(tx)?;
    }
    info!(
        url = %settings.url,
        reconnect_delay_ms = manager.reconnect_delay().as_millis() as u64,
        plain = options.plain,
        "watching scan"
    );

    let result = if options.plain {
        runtime.block_on(output::watch(&mut rx, &mut session, mode, options.once));
        Ok(())
    } else {
        tui::run(&mut rx, &mut session, &settings.url, settings.tick_rate)
    };

    runtime.block_on(manager.stop());
    result?;

    // The terminal UI clears its screen on exit; leave the result behind
    if !options.plain && mode != OutputMode::Quiet && session.status() == ScanStatus::Done {
        output::print_summary(&session);
    }

    Ok(())
}
