//! Color scheme and condition styling
//!
//! Icon codes from the provider are two digits plus a day/night suffix
//! ("10d", "01n"). The digits pick the condition family and its accent
//! color; a night suffix dims the style.

use ratatui::style::{Color, Modifier, Style};

use crate::data::AlertSeverity;

/// Section headers
pub const HEADER: Color = Color::Cyan;
/// Primary text
pub const PRIMARY: Color = Color::White;
/// Secondary/dimmed text
pub const SECONDARY: Color = Color::Gray;
/// Unknown/unavailable data
pub const UNKNOWN: Color = Color::DarkGray;
/// Selected list entry
pub const SELECTED: Color = Color::Yellow;
/// Error messages
pub const ERROR: Color = Color::Red;

/// Condition family derived from a provider icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionFamily {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Unknown,
}

impl ConditionFamily {
    /// Classifies an icon code ("01d".."50n") into a family.
    pub fn from_icon(icon: &str) -> Self {
        match icon.get(..2) {
            Some("01") => Self::Clear,
            Some("02") | Some("03") | Some("04") => Self::Clouds,
            Some("09") | Some("10") => Self::Rain,
            Some("11") => Self::Thunderstorm,
            Some("13") => Self::Snow,
            Some("50") => Self::Mist,
            _ => Self::Unknown,
        }
    }

    /// A single-character glyph for compact rows.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Clear => "\u{2600}",        // ☀
            Self::Clouds => "\u{2601}",       // ☁
            Self::Rain => "\u{1F327}",        // 🌧
            Self::Thunderstorm => "\u{26C8}", // ⛈
            Self::Snow => "\u{2744}",         // ❄
            Self::Mist => "\u{1F32B}",        // 🌫
            Self::Unknown => "?",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Clear => Color::Yellow,
            Self::Clouds => Color::Gray,
            Self::Rain => Color::Blue,
            Self::Thunderstorm => Color::Magenta,
            Self::Snow => Color::White,
            Self::Mist => Color::DarkGray,
            Self::Unknown => UNKNOWN,
        }
    }
}

/// Whether an icon code carries the night suffix.
pub fn is_night(icon: &str) -> bool {
    icon.ends_with('n')
}

/// Style for text describing the given icon's condition.
pub fn condition_style(icon: &str) -> Style {
    let style = Style::default().fg(ConditionFamily::from_icon(icon).color());
    if is_night(icon) {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

/// Style for an alert banner of the given severity.
pub fn alert_style(severity: AlertSeverity) -> Style {
    let color = match severity {
        AlertSeverity::Minor => Color::Yellow,
        AlertSeverity::Moderate => Color::LightRed,
        AlertSeverity::Severe => Color::Red,
        AlertSeverity::Extreme => Color::Magenta,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Color for a temperature value in Celsius.
pub fn temperature_color(celsius: f64) -> Color {
    if celsius >= 30.0 {
        Color::Red
    } else if celsius >= 25.0 {
        Color::LightRed
    } else if celsius >= 20.0 {
        Color::Yellow
    } else if celsius >= 15.0 {
        Color::Green
    } else if celsius >= 10.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Color for a UV index value, matching the qualitative bands.
pub fn uv_color(uvi: f64) -> Color {
    if uvi <= 2.0 {
        Color::Green
    } else if uvi <= 5.0 {
        Color::Yellow
    } else if uvi <= 7.0 {
        Color::LightRed
    } else if uvi <= 10.0 {
        Color::Red
    } else {
        Color::Magenta
    }
}
