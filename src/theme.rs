//! Colors for CLI output.
//!
//! Color is dropped when stdout is not a terminal or `NO_COLOR` is set.

use crossterm::style::{style, Color, Stylize};

use crate::notice::{Notice, Severity};

#[derive(Debug, Clone)]
pub struct Theme {
    /// Most content
    pub text_primary: Color,
    /// Hints, ids and other dimmed text
    pub text_secondary: Color,
    /// Titles and the position a seek landed on
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
    pub success: Color,
    enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::Grey,
            text_secondary: Color::DarkGrey,
            accent: Color::Cyan,
            warning: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            enabled: true,
        }
    }
}

impl Theme {
    /// Same colors, but every helper returns the text unchanged.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }

    /// Render a notice in the color of its severity.
    pub fn notice(&self, notice: &Notice) -> String {
        let color = match notice.severity {
            Severity::Info => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        };
        self.paint(color, &notice.to_string())
    }
}

/// Theme for stdout, honoring `NO_COLOR` and non-terminal output.
pub fn current_theme() -> Theme {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    if no_color || !atty::is(atty::Stream::Stdout) {
        Theme::plain()
    } else {
        Theme::default()
    }
}
