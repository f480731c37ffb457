//! Resource lookup: opaque text and image keys resolved through a table.

use ratatui::style::Color;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Key for a piece of display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TextRef(pub u16);

/// Key for an image asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageRef(pub u16);

impl fmt::Display for TextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const TITLE: TextRef = TextRef(0);

pub const HERO_1: TextRef = TextRef(1);
pub const HERO_2: TextRef = TextRef(2);
pub const HERO_3: TextRef = TextRef(3);
pub const HERO_4: TextRef = TextRef(4);
pub const HERO_5: TextRef = TextRef(5);
pub const HERO_6: TextRef = TextRef(6);

pub const DESCRIPTION_1: TextRef = TextRef(101);
pub const DESCRIPTION_2: TextRef = TextRef(102);
pub const DESCRIPTION_3: TextRef = TextRef(103);
pub const DESCRIPTION_4: TextRef = TextRef(104);
pub const DESCRIPTION_5: TextRef = TextRef(105);
pub const DESCRIPTION_6: TextRef = TextRef(106);

pub const PORTRAIT_1: ImageRef = ImageRef(1);
pub const PORTRAIT_2: ImageRef = ImageRef(2);
pub const PORTRAIT_3: ImageRef = ImageRef(3);
pub const PORTRAIT_4: ImageRef = ImageRef(4);
pub const PORTRAIT_5: ImageRef = ImageRef(5);
pub const PORTRAIT_6: ImageRef = ImageRef(6);

/// A drawable stand-in for a bitmap: a monogram on a tinted square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub monogram: String,
    pub tint: Color,
}

impl ImageAsset {
    pub fn new(monogram: impl Into<String>, tint: Color) -> Self {
        Self {
            monogram: monogram.into(),
            tint,
        }
    }

    /// Shown when an image key has no asset
    pub fn placeholder() -> Self {
        Self::new("?", Color::DarkGray)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("no text resource for key {0}")]
    MissingText(TextRef),
    #[error("no image resource for key {0}")]
    MissingImage(ImageRef),
}

pub trait ResourceResolver {
    fn text(&self, key: TextRef) -> Result<&str, ResourceError>;
    fn image(&self, key: ImageRef) -> Result<&ImageAsset, ResourceError>;
}

/// Text shown when a text key cannot be resolved
pub const MISSING_TEXT: &str = "?";

/// Resolve `key`, falling back to [`MISSING_TEXT`]
pub fn resolve_text_or_placeholder<R>(resolver: &R, key: TextRef) -> &str
where
    R: ResourceResolver + ?Sized,
{
    match resolver.text(key) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{}", e);
            MISSING_TEXT
        }
    }
}

/// Resolve `key`, falling back to [`ImageAsset::placeholder`]
pub fn resolve_image_or_placeholder<R: ResourceResolver + ?Sized>(
    resolver: &R,
    key: ImageRef,
) -> ImageAsset {
    match resolver.image(key) {
        Ok(asset) => asset.clone(),
        Err(e) => {
            tracing::warn!("{}", e);
            ImageAsset::placeholder()
        }
    }
}

/// In-memory lookup table
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    texts: HashMap<TextRef, String>,
    images: HashMap<ImageRef, ImageAsset>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, key: TextRef, text: impl Into<String>) -> Self {
        self.texts.insert(key, text.into());
        self
    }

    pub fn with_image(mut self, key: ImageRef, asset: ImageAsset) -> Self {
        self.images.insert(key, asset);
        self
    }

    /// Strings and portraits for the bundled heroes
    pub fn builtin() -> Self {
        Self::new()
            .with_text(TITLE, "Superheroes")
            .with_text(HERO_1, "Nick the Night and Day")
            .with_text(HERO_2, "Reality Protector")
            .with_text(HERO_3, "Andre the Giant")
            .with_text(HERO_4, "Benjamin the Brave")
            .with_text(HERO_5, "Magnificent Maru")
            .with_text(HERO_6, "Dynamic Yasmine")
            .with_text(DESCRIPTION_1, "The Jetpack Hero")
            .with_text(DESCRIPTION_2, "Understands the absolute truth")
            .with_text(DESCRIPTION_3, "Immense strength")
            .with_text(DESCRIPTION_4, "Never gives up")
            .with_text(DESCRIPTION_5, "Effortless problem solving")
            .with_text(DESCRIPTION_6, "Multitasking at an epic scale")
            .with_image(PORTRAIT_1, ImageAsset::new("ND", Color::Rgb(61, 220, 132)))
            .with_image(PORTRAIT_2, ImageAsset::new("RP", Color::Rgb(66, 133, 244)))
            .with_image(PORTRAIT_3, ImageAsset::new("AG", Color::Rgb(234, 67, 53)))
            .with_image(PORTRAIT_4, ImageAsset::new("BB", Color::Rgb(251, 188, 5)))
            .with_image(PORTRAIT_5, ImageAsset::new("MM", Color::Rgb(171, 71, 188)))
            .with_image(PORTRAIT_6, ImageAsset::new("DY", Color::Rgb(0, 172, 193)))
    }
}

impl ResourceResolver for ResourceTable {
    fn text(&self, key: TextRef) -> Result<&str, ResourceError> {
        self.texts
            .get(&key)
            .map(String::as_str)
            .ok_or(ResourceError::MissingText(key))
    }

    fn image(&self, key: ImageRef) -> Result<&ImageAsset, ResourceError> {
        self.images.get(&key).ok_or(ResourceError::MissingImage(key))
    }
}
