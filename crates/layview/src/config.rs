//! Configuration types for Layview rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file.
//!
//! # Example
//!
//! ```
//! # use layview::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.fonts().dir(), std::path::Path::new("fonts"));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Font configuration section.
    #[serde(default)]
    fonts: FontsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given font settings.
    pub fn new(fonts: FontsConfig) -> Self {
        Self { fonts }
    }

    /// Returns the font configuration.
    pub fn fonts(&self) -> &FontsConfig {
        &self.fonts
    }
}

/// Where font files named in layout headers are looked up.
#[derive(Debug, Clone, Deserialize)]
pub struct FontsConfig {
    /// Directory font paths are resolved against.
    #[serde(default = "default_fonts_dir")]
    dir: PathBuf,
}

impl FontsConfig {
    /// Creates a font configuration resolving paths against `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the fonts directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dir: default_fonts_dir(),
        }
    }
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts")
}
