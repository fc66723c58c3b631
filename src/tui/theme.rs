use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color palette for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            dark: true,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }

    pub fn light() -> Self {
        Theme {
            dark: false,
            background: Color::Rgb(0xFA, 0xFA, 0xF7),
            text: Color::Rgb(0x33, 0x33, 0x44),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            highlight: Color::Rgb(0xC2, 0x18, 0x5B),
            dim: Color::Rgb(0x88, 0x88, 0x99),
            red: Color::Rgb(0xC6, 0x28, 0x28),
            green: Color::Rgb(0x2E, 0x7D, 0x32),
            selection_bg: Color::Rgb(0xE8, 0xE0, 0xF0),
            search_match_bg: Color::Rgb(0xFF, 0xE0, 0x82),
            search_match_fg: Color::Rgb(0x00, 0x00, 0x00),
        }
    }

    /// Palette for the given mode with that mode's `[ui.*_colors]` overrides applied
    pub fn for_mode(dark: bool, ui: &UiConfig) -> Self {
        if dark {
            Theme::dark().with_overrides(&ui.dark_colors)
        } else {
            Theme::light().with_overrides(&ui.light_colors)
        }
    }

    fn with_overrides(mut self, colors: &HashMap<String, String>) -> Self {
        for (key, value) in colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!("ignoring invalid color {:?} for {}", value, key);
                continue;
            };
            match key.as_str() {
                "background" => self.background = color,
                "text" => self.text = color,
                "text_bright" => self.text_bright = color,
                "highlight" => self.highlight = color,
                "dim" => self.dim = color,
                "red" => self.red = color,
                "green" => self.green = color,
                "selection_bg" => self.selection_bg = color,
                "search_match_bg" => self.search_match_bg = color,
                "search_match_fg" => self.search_match_fg = color,
                _ => tracing::warn!("unknown color key {}", key),
            }
        }
        self
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
    }

    #[test]
    fn test_for_mode_picks_palette() {
        let ui = UiConfig::default();
        assert_eq!(Theme::for_mode(true, &ui), Theme::dark());
        assert_eq!(Theme::for_mode(false, &ui), Theme::light());
        assert_ne!(Theme::dark().background, Theme::light().background);
    }

    #[test]
    fn test_overrides_apply_per_mode() {
        let mut ui = UiConfig::default();
        ui.dark_colors.insert("background".into(), "#000000".into());
        ui.light_colors.insert("text".into(), "#112233".into());
        ui.light_colors.insert("red".into(), "not-a-color".into());

        let dark = Theme::for_mode(true, &ui);
        assert_eq!(dark.background, Color::Rgb(0, 0, 0));
        assert_eq!(dark.text, Theme::dark().text);

        let light = Theme::for_mode(false, &ui);
        assert_eq!(light.text, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(light.background, Theme::light().background);
        // Invalid value leaves the default
        assert_eq!(light.red, Theme::light().red);
    }
}
