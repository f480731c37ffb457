use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::theme::{PaletteOverrides, ThemeMode};

/// Sizes used to lay out the list and its cards, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTokens {
    pub content_padding_x: u16, // Around the whole list, left and right
    pub content_padding_y: u16, // Above the first card and below the last
    pub item_spacing: u16,      // Blank rows between cards
    pub card_height: u16,       // Including the border
    pub card_padding: u16,      // Inside the border, left and right
    pub image_gap: u16,         // Between the text block and the image
    pub image_width: u16,
    pub image_height: u16,
    pub elevation: u16,     // Shadow depth right of and below each card
    pub header_height: u16, // Fully expanded title bar
}

impl Default for LayoutTokens {
    fn default() -> Self {
        Self {
            content_padding_x: 2,
            content_padding_y: 1,
            item_spacing: 1,
            card_height: 6,
            card_padding: 1,
            image_gap: 2,
            image_width: 8,
            image_height: 4,
            elevation: 1,
            header_height: 3,
        }
    }
}

/// Largest spacing or padding token accepted from a config file
const MAX_GAP: u16 = 20;

impl LayoutTokens {
    /// Rows one card occupies, shadow included
    pub fn item_extent(&self) -> u16 {
        self.card_height.saturating_add(self.elevation)
    }

    /// Rows from one card's top to the next card's top
    pub fn stride(&self) -> u16 {
        self.item_extent().saturating_add(self.item_spacing).max(1)
    }

    /// Clamp values that would leave no room for a card's content
    pub fn sanitized(mut self) -> Self {
        self.card_height = self.card_height.clamp(3, 40);
        self.elevation = self.elevation.min(2);
        self.image_height = self.image_height.clamp(1, self.card_height - 2);
        self.image_width = self.image_width.max(2);
        self.header_height = self.header_height.min(10);
        self.item_spacing = self.item_spacing.min(MAX_GAP);
        self.content_padding_x = self.content_padding_x.min(MAX_GAP);
        self.content_padding_y = self.content_padding_y.min(MAX_GAP);
        self.card_padding = self.card_padding.min(MAX_GAP);
        self.image_gap = self.image_gap.min(MAX_GAP);
        self.image_width = self.image_width.min(MAX_GAP * 2);
        self
    }
}

/// Safe-area padding around the whole screen (status lines, tmux bars, ...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: u16,
    pub bottom: u16,
    pub left: u16,
    pub right: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Light, dark, or follow the terminal
    #[serde(default)]
    pub theme: ThemeMode,

    /// How many times the built-in catalog is listed
    #[serde(default = "default_repeat")]
    pub repeat: usize,

    #[serde(default)]
    pub layout: LayoutTokens,

    #[serde(default)]
    pub insets: Insets,

    /// Optional hex color overrides
    #[serde(default)]
    pub palette: PaletteOverrides,
}

fn default_repeat() -> usize {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            repeat: default_repeat(),
            layout: LayoutTokens::default(),
            insets: Insets::default(),
            palette: PaletteOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("heroes");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::from_toml(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
        }

        Ok(AppConfig::default())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.layout = config.layout.sanitized();
        config.repeat = config.repeat.max(1);
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
