//! Badges and color styles.

use owo_colors::{OwoColorize, Style};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Pass,
    Fail,
    Warn,
}

impl Badge {
    /// Plain badge text (e.g., "[PASS]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Pass => "[PASS]",
            Self::Fail => "[FAIL]",
            Self::Warn => "[WARN]",
        }
    }

    /// Badge for display, with a symbol when unicode is enabled.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Pass => "[\u{2713}]", // [✓]
            Self::Fail => "[\u{2717}]", // [✗]
            Self::Warn => "[\u{26A0}]", // [⚠]
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Pass => styles::green(),
            Self::Fail => styles::red(),
            Self::Warn => styles::yellow(),
        }
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn green() -> Style {
        Style::new().green().bold()
    }

    pub fn red() -> Style {
        Style::new().red().bold()
    }

    pub fn yellow() -> Style {
        Style::new().yellow()
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}
