//! Terminal capability detection and utilities

use outline::HeadingLevel;
use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| usize::from(w.0))
}

/// Applies colors to output text, or passes it through unchanged when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    /// Colors output if stdout supports it
    pub fn detect() -> Self {
        Self {
            enabled: supports_color(),
        }
    }

    /// Never colors output
    #[cfg(test)]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Color a heading by its level
    pub fn heading(self, level: HeadingLevel, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match level.get() {
            1 => text.fg::<css::LightBlue>().bold().to_string(),
            2 => text.fg::<css::Green>().to_string(),
            3 => text.fg::<css::Orange>().to_string(),
            _ => text.to_string(),
        }
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
