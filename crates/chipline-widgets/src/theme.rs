//! Colors for the tag input.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Color theme for the tag input widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Background of the wrapper surface.
    pub background: Color,
    /// Chip background.
    pub chip: Color,
    /// Chip label text.
    pub chip_text: Color,
    /// Input field text.
    pub input_text: Color,
    /// Placeholder text in the empty input field.
    pub placeholder: Color,
    /// Border around the wrapper, when the embedding surface draws one.
    pub border: Color,
}

impl Theme {
    /// The default dark theme.
    pub fn default_dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Reset,
            chip: Color::DarkGray,
            chip_text: Color::White,
            input_text: Color::Gray,
            placeholder: Color::DarkGray,
            border: Color::DarkGray,
        }
    }

    /// A light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::White,
            chip: Color::Blue,
            chip_text: Color::White,
            input_text: Color::Black,
            placeholder: Color::Gray,
            border: Color::Gray,
        }
    }

    /// Style for a chip.
    pub fn chip_style(&self) -> Style {
        Style::default().fg(self.chip_text).bg(self.chip)
    }

    /// Style for the input field text.
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_text)
    }

    /// Style for the placeholder.
    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .add_modifier(Modifier::DIM)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default().name, "dark");
    }

    #[test]
    fn test_theme_round_trips_through_json() {
        let theme = Theme::light();
        let json = serde_json::to_string(&theme).unwrap();
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "light");
        assert_eq!(back.chip, Color::Blue);
    }
}
