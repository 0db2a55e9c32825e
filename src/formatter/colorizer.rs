//! Terminal colors for text output.

use nu_ansi_term::{Color, Style};

use crate::schema::{CardKind, Severity};

/// Color of entity names.
pub const ENTITY_COLOR: Color = Color::Rgb(0x4E, 0xC9, 0xB0);

/// Color of property names.
pub const PROPERTY_COLOR: Color = Color::Rgb(0x9C, 0xDC, 0xFE);

/// Applies colors when enabled; otherwise returns text unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// A machine token, colored by what it names.
    pub fn token(&self, text: &str, kind: CardKind) -> String {
        let color = match kind {
            CardKind::Entity => ENTITY_COLOR,
            CardKind::Property => PROPERTY_COLOR,
        };
        self.paint(color.bold(), text)
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(Style::new().dimmed(), text)
    }

    pub fn link(&self, text: &str) -> String {
        self.paint(Color::Blue.underline(), text)
    }

    pub fn severity(&self, severity: Severity) -> String {
        match severity {
            Severity::Info => self.paint(Color::Cyan.normal(), "info"),
            Severity::Warning => self.paint(Color::Yellow.bold(), "warning"),
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(Color::Green.normal(), text)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(Color::Red.normal(), text)
    }
}
