//! Line-oriented front end (`duwatch watch --plain`)

use crate::presenter::{SummaryChart, View};
use crate::progress;
use crate::scan_state::ScanStatus;
use crate::session::{ConnectionStatus, MonitorSession};
use crate::theme::Theme;
use crate::transport::TransportEvent;
use colored::Colorize;
use indicatif::ProgressBar;
use tokio::sync::mpsc;
use tracing::info;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,   // Only errors
    Normal,  // Standard output
    Verbose, // Also report every reconnect
}

impl OutputMode {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose > 0 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

const CHART_WIDTH: usize = 30;

/// Single-line description of the current view, used as the spinner message
pub fn status_line(view: &View, connection: ConnectionStatus) -> String {
    let mut parts = Vec::new();

    match view.status {
        Some(label) => parts.push(Theme::status(label).to_string()),
        None => parts.push(Theme::muted("Waiting for scan progress").to_string()),
    }

    if let Some(progress) = &view.progress {
        parts.push(format!(
            "Total items: {}",
            Theme::value(&progress.item_count.to_string())
        ));
        parts.push(format!("Size: {}", Theme::value(&progress.size)));
    }

    if connection == ConnectionStatus::Offline {
        parts.push(Theme::offline("Offline").to_string());
    }

    parts.join("  │  ")
}

/// Horizontal bar per chart slice, scaled to the largest value
pub fn chart_lines(chart: &SummaryChart, width: usize) -> Vec<String> {
    let max = chart.slices.iter().map(|s| s.value).max().unwrap_or(0);

    chart
        .slices
        .iter()
        .map(|slice| {
            let filled = if max == 0 {
                0
            } else {
                (slice.value as f64 / max as f64 * width as f64).round() as usize
            };
            let (r, g, b) = slice.color;
            format!(
                "  {:>3}  {}",
                slice.value,
                "█".repeat(filled).truecolor(r, g, b)
            )
        })
        .collect()
}

/// Print the end-of-scan summary
pub fn print_summary(session: &MonitorSession) {
    let view = session.view();
    let state = session.state();

    println!();
    println!(
        "{} {}",
        Theme::header("duwatch"),
        Theme::status(view.status.unwrap_or("Done"))
    );
    println!("{}", Theme::divider_bold(40));
    println!(
        "{:<14} {}",
        Theme::primary("Total items"),
        Theme::value(&state.item_count.to_string())
    );
    println!(
        "{:<14} {}",
        Theme::primary("Size"),
        Theme::value(&session.size_format().format(state.total_size_bytes))
    );

    if let Some(chart) = &view.chart {
        println!("{}", Theme::divider(40));
        for line in chart_lines(chart, CHART_WIDTH) {
            println!("{}", line);
        }
    }
    println!();
}

/// Drive the session from transport events until Ctrl+C, the transport
/// goes away, or (with `once`) the scan reports done.
pub async fn watch(
    events: &mut mpsc::UnboundedReceiver<TransportEvent>,
    session: &mut MonitorSession,
    mode: OutputMode,
    once: bool,
) {
    let spinner: ProgressBar = if mode == OutputMode::Quiet {
        progress::hidden_spinner()
    } else {
        progress::create_spinner(&status_line(&session.view(), session.connection()))
    };

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let event = tokio::select! {
            event = events.recv() => event,
            _ = &mut ctrl_c => {
                info!("interrupted");
                None
            }
        };
        let Some(event) = event else { break };

        let previous_connection = session.connection();
        let transition = session.handle(event);

        if mode == OutputMode::Verbose && session.connection() != previous_connection {
            spinner.println(format!("{} {}", Theme::muted("connection:"), session.connection()));
        }

        if transition.is_some_and(|t| t.to == ScanStatus::Done) {
            spinner.finish_and_clear();
            if mode != OutputMode::Quiet {
                print_summary(session);
            }
            if once {
                return;
            }
            continue;
        }

        if session.status() != ScanStatus::Done {
            spinner.set_message(status_line(&session.view(), session.connection()));
        }
    }

    spinner.finish_and_clear();
}
