//! Theme and styling for TUI - typography first, color only for status

use ratatui::style::{Color, Modifier, Style};

/// Style definitions
pub struct Styles;

impl Styles {
    /// Main title style - bold
    pub fn title() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Header style - bold
    pub fn header() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Primary text style - normal
    pub fn primary() -> Style {
        Style::default()
    }

    /// Secondary/muted text style - dimmed
    pub fn secondary() -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    /// Emphasized text - bold
    pub fn emphasis() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Scan status label
    pub fn status() -> Style {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }

    /// Counters in the progress block
    pub fn value() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    /// Border style - normal
    pub fn border() -> Style {
        Style::default()
    }

    pub fn online() -> Style {
        Style::default().fg(Color::Green)
    }

    /// Disconnected badge - red, bold
    pub fn offline() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }
}
