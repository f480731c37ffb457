//! Style tokens for the cards and the title bar
//! Light and dark palettes, optionally patched with hex colors from the config

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

/// Which palette to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Guess from the terminal (COLORFGBG), dark when unknown
    #[default]
    System,
}

/// Hex color overrides, e.g. `accent = "#FFC107"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_surface_dim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Theme tokens for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,       // Screen background behind the list
    pub surface: Color,          // Card fill
    pub on_surface: Color,       // Hero name
    pub on_surface_dim: Color,   // Hero description
    pub outline: Color,          // Card border
    pub shadow: Color,           // Elevation shadow under cards
    pub header: Color,           // Title text
    pub accent: Color,           // Title rule
    pub card_shape: BorderType,  // Large corner token
    pub image_shape: BorderType, // Small corner token
    pub display: Modifier,       // Typography for names and the title
    pub body: Modifier,          // Typography for descriptions
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 251, 254),
            surface: Color::Rgb(243, 237, 247),
            on_surface: Color::Rgb(28, 27, 31),
            on_surface_dim: Color::Rgb(73, 69, 79),
            outline: Color::Rgb(121, 116, 126),
            shadow: Color::Rgb(202, 196, 208),
            header: Color::Rgb(56, 30, 114),
            accent: Color::Rgb(103, 80, 164),
            card_shape: BorderType::Rounded,
            image_shape: BorderType::Rounded,
            display: Modifier::BOLD,
            body: Modifier::empty(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(28, 27, 31),
            surface: Color::Rgb(43, 41, 48),
            on_surface: Color::Rgb(230, 225, 229),
            on_surface_dim: Color::Rgb(202, 196, 208),
            outline: Color::Rgb(147, 143, 153),
            shadow: Color::Rgb(12, 11, 14),
            header: Color::Rgb(234, 221, 255),
            accent: Color::Rgb(208, 188, 255),
            card_shape: BorderType::Rounded,
            image_shape: BorderType::Rounded,
            display: Modifier::BOLD,
            body: Modifier::empty(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::System => {
                let colorfgbg = std::env::var("COLORFGBG").ok();
                match colorfgbg.as_deref().and_then(background_is_dark) {
                    Some(false) => Self::light(),
                    _ => Self::dark(),
                }
            }
        }
    }

    /// Apply hex overrides; unparsable values are logged and skipped
    pub fn with_overrides(mut self, overrides: &PaletteOverrides) -> Self {
        let slots: [(&Option<String>, &mut Color, &str); 8] = [
            (&overrides.background, &mut self.background, "background"),
            (&overrides.surface, &mut self.surface, "surface"),
            (&overrides.on_surface, &mut self.on_surface, "on_surface"),
            (&overrides.on_surface_dim, &mut self.on_surface_dim, "on_surface_dim"),
            (&overrides.outline, &mut self.outline, "outline"),
            (&overrides.shadow, &mut self.shadow, "shadow"),
            (&overrides.header, &mut self.header, "header"),
            (&overrides.accent, &mut self.accent, "accent"),
        ];

        for (value, slot, name) in slots {
            let Some(value) = value else { continue };
            match parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring palette.{}: '{}' is not a hex color", name, value),
            }
        }

        self
    }

    pub fn display_style(&self) -> Style {
        Style::default().fg(self.on_surface).add_modifier(self.display)
    }

    pub fn body_style(&self) -> Style {
        Style::default().fg(self.on_surface_dim).add_modifier(self.body)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(self.display)
    }
}

/// COLORFGBG is `fg;bg` (sometimes `fg;default;bg`) with ANSI color indices
fn background_is_dark(colorfgbg: &str) -> Option<bool> {
    let bg: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    match s.len() {
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color(" #123 "), Some(Color::Rgb(17, 34, 51)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_overrides() {
        let overrides = PaletteOverrides {
            accent: Some("#FFC107".to_string()),
            header: Some("not a color".to_string()),
            ..Default::default()
        };
        let theme = Theme::dark().with_overrides(&overrides);

        assert_eq!(theme.accent, Color::Rgb(255, 193, 7));
        // Bad value leaves the token alone
        assert_eq!(theme.header, Theme::dark().header);
        assert_eq!(theme.surface, Theme::dark().surface);
    }

    #[test]
    fn test_background_detection() {
        assert_eq!(background_is_dark("15;0"), Some(true));
        assert_eq!(background_is_dark("0;15"), Some(false));
        assert_eq!(background_is_dark("12;default;8"), Some(true));
        assert_eq!(background_is_dark("garbage"), None);
    }

    #[test]
    fn test_explicit_modes() {
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::for_mode(ThemeMode::Dark), Theme::dark());
        assert_ne!(Theme::light(), Theme::dark());
    }
}
