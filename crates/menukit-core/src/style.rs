//! Screen style configuration.
//!
//! A [`Style`] can be built in code or loaded from TOML:
//!
//! ```
//! use menukit_core::{Color, Style};
//!
//! let style = Style::from_toml(r##"
//! title_color = "#202020"
//!
//! [panel_background]
//! kind = "solid"
//! color = "#c6c6c6"
//! "##).expect("valid style");
//!
//! assert_eq!(style.title_color, Color::from_rgb_u32(0x20_20_20));
//! ```

use crate::color::Color;
use crate::error::ConfigError;
use crate::widget::BackgroundPainter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Look of a menu screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Color of the screen title
    pub title_color: Color,
    /// Painter offered to the root panel by `add_painters`
    pub panel_background: BackgroundPainter,
    /// Fullscreen screens draw no root panel background
    pub fullscreen: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            title_color: Color::from_rgb_u32(0x40_40_40),
            panel_background: BackgroundPainter::Bordered {
                fill: Color::from_rgb_u32(0xc6_c6_c6),
                border: Color::from_rgb_u32(0x55_55_55),
            },
            fullscreen: false,
        }
    }
}

impl Style {
    /// Create the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title color.
    #[must_use]
    pub const fn title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Set the root panel painter.
    #[must_use]
    pub const fn panel_background(mut self, painter: BackgroundPainter) -> Self {
        self.panel_background = painter;
        self
    }

    /// Set fullscreen mode.
    #[must_use]
    pub const fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Parse a style from TOML. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a style file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }
}
