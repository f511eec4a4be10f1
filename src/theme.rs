//! Text styling for plain (non-TUI) output

use colored::{ColoredString, Colorize};

pub struct Theme;

impl Theme {
    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn primary(text: &str) -> ColoredString {
        text.normal()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Status labels ("Scanning...", "Done")
    pub fn status(text: &str) -> ColoredString {
        text.green().bold()
    }

    /// Counters and sizes
    pub fn value(text: &str) -> ColoredString {
        text.red().bold()
    }

    pub fn offline(text: &str) -> ColoredString {
        text.red()
    }

    pub fn divider(width: usize) -> ColoredString {
        "─".repeat(width).dimmed()
    }

    pub fn divider_bold(width: usize) -> ColoredString {
        "━".repeat(width).normal()
    }
}
