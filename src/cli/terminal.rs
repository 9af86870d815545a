//! Terminal helpers for the build commands.

use owo_colors::OwoColorize;

/// Whether stdout wants colored output.
pub fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning `None` when not attached to a tty.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Extension trait for colorizing status output.
pub trait Colorize {
    /// Green, for successful outcomes.
    fn success(&self) -> String;
    /// Yellow, for diagnostics.
    fn warning(&self) -> String;
    /// Dimmed, for secondary detail.
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if color_enabled() {
            self.green().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if color_enabled() {
            self.yellow().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if color_enabled() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
