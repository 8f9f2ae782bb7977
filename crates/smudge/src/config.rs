//! Engine configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid config:
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//! fullscreen = false
//! target_fps = 60
//!
//! [redraw]
//! viewport_margin = 50
//! background = [0, 0, 0]
//!
//! [colors]
//! button_idle = [100, 100, 100]
//! button_hover = [0, 0, 200]
//! button_pressed = [200, 100, 100]
//! text = [255, 255, 255, 255]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use smudge_core::{Color, RedrawConfig, DEFAULT_VIEWPORT_MARGIN};

use crate::error::{ConfigError, ConfigResult};

/// Window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Request a fullscreen window. Headless surfaces ignore it.
    pub fullscreen: bool,
    /// Frame rate cap. `0` disables pacing.
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            target_fps: 60,
        }
    }
}

/// Redraw settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedrawSettings {
    /// Off-screen margin in pixels.
    pub viewport_margin: i32,
    /// Erase color.
    #[serde(with = "color_serde")]
    pub background: Color,
}

impl Default for RedrawSettings {
    fn default() -> Self {
        Self {
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            background: Color::BLACK,
        }
    }
}

/// Widget colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Button fill when the pointer is elsewhere.
    #[serde(with = "color_serde")]
    pub button_idle: Color,
    /// Button fill while the pointer is over it.
    #[serde(with = "color_serde")]
    pub button_hover: Color,
    /// Button fill while pressed.
    #[serde(with = "color_serde")]
    pub button_pressed: Color,
    /// Text color for pre-rendered captions.
    #[serde(with = "color_serde")]
    pub text: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            button_idle: Color::GRAY,
            button_hover: Color::BLUE,
            button_pressed: Color::ROSE,
            text: Color::WHITE,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Redraw settings.
    pub redraw: RedrawSettings,
    /// Widget colors.
    pub colors: ColorScheme,
}

impl EngineConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for values [`validate`](Self::validate) rejects.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero-sized window, a resolution
    /// beyond `i32`, or a negative margin.
    pub fn validate(&self) -> ConfigResult<()> {
        let WindowConfig { width, height, .. } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {width}x{height}"
            )));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(ConfigError::Invalid(format!(
                "resolution {width}x{height} is too large"
            )));
        }
        if self.redraw.viewport_margin < 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport_margin must be >= 0, got {}",
                self.redraw.viewport_margin
            )));
        }
        Ok(())
    }

    /// Resolution as signed surface dimensions.
    #[must_use]
    pub fn resolution(&self) -> (i32, i32) {
        (
            i32::try_from(self.window.width).unwrap_or(i32::MAX),
            i32::try_from(self.window.height).unwrap_or(i32::MAX),
        )
    }

    /// Settings for the redraw manager.
    #[must_use]
    pub const fn redraw_config(&self) -> RedrawConfig {
        RedrawConfig {
            viewport_margin: self.redraw.viewport_margin,
            background: self.redraw.background,
        }
    }
}

/// Colors as `[r, g, b]` or `[r, g, b, a]` arrays.
mod color_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use smudge_core::Color;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Rgb([u8; 3]),
        Rgba([u8; 4]),
    }

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = if color.a == u8::MAX {
            Repr::Rgb([color.r, color.g, color.b])
        } else {
            Repr::Rgba(color.to_array())
        };
        repr.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Rgb(rgb) => Color::from(rgb),
            Repr::Rgba(rgba) => Color::from(rgba),
        })
    }
}
