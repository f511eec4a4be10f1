//! duwatch library crate
//!
//! Live monitor for a disk-usage scanner's progress stream. The binary wraps
//! this library with a terminal UI and a plain line-oriented mode.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod presenter;
pub mod progress;
pub mod protocol;
pub mod scan_state;
pub mod session;
pub mod size;
pub mod theme;
pub mod transport;
pub mod tui;
