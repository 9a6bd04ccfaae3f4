// Helper utilities for tab widgets
use ratatui::style::{Color, Modifier, Style};

/// Convert hex color to ratatui Color
pub fn hex_color(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

/// Parse color from string
pub fn parse_color(color: &str) -> Color {
    match color.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        // ratatui has no Dark* variants for these
        "dark_red" | "darkred" => Color::Rgb(139, 0, 0),
        "dark_green" | "darkgreen" => Color::Rgb(0, 100, 0),
        "dark_blue" | "darkblue" => Color::Rgb(0, 0, 139),
        "dark_cyan" | "darkcyan" => Color::Rgb(0, 139, 139),
        other => match other.strip_prefix('#').map(|hex| u32::from_str_radix(hex, 16)) {
            Some(Ok(value)) if other.len() == 7 => hex_color(value),
            _ => Color::Cyan, // Default
        },
    }
}

/// Colors used when painting a tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabPalette {
    /// Active tab label and ink bar
    pub accent: Color,
    /// Inactive tab labels
    pub text: Color,
    /// Disabled tab labels and hidden arrows
    pub disabled: Color,
    /// Extra content next to the tabs
    pub muted: Color,
}

impl TabPalette {
    pub fn new(accent: Color) -> Self {
        Self {
            accent,
            text: hex_color(0xCCCCCC),
            disabled: hex_color(0x555555),
            muted: hex_color(0x777777),
        }
    }

    pub fn tab_style(&self, active: bool, disabled: bool) -> Style {
        if disabled {
            Style::default().fg(self.disabled)
        } else if active {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn ink_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn arrow_style(&self) -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn extra_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for TabPalette {
    fn default() -> Self {
        Self::new(Color::Cyan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Green"), Color::Green);
        assert_eq!(parse_color("#1a2b3c"), Color::Rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(parse_color("not-a-color"), Color::Cyan);
    }
}
