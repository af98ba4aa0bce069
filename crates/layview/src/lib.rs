//! Layview - renders serialized layout fixtures into raster images.
//!
//! A layout file lists fonts and one or more layouts made of boxes and text.
//! Each layout is drawn on its own canvas, overlapping boxes in distinct
//! colors, and the canvases are stacked into one image for inspection.

pub mod config;
pub mod export;

mod box_renderer;
mod error;
mod multibox;

pub use layview_core::{canvas, color, font, geometry};

pub use box_renderer::{BoxRenderer, RenderError};
pub use error::{ErrorKind, LayviewError};
pub use multibox::{MARGIN, MultiboxRenderer, composite};

use std::{fs, path::Path};

use image::RgbaImage;
use log::{debug, info};

use config::AppConfig;

/// Builder for rendering layout files.
///
/// # Examples
///
/// ```rust,no_run
/// use layview::{RenderBuilder, config::AppConfig};
///
/// let source = "0\n1\n10 10\n1\nb 0 0 5 5\n";
///
/// let builder = RenderBuilder::new(AppConfig::default());
/// let image = builder.render(source)
///     .expect("Failed to render");
/// assert_eq!(image.dimensions(), (40, 40));
///
/// // Or use default config
/// let builder = RenderBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct RenderBuilder {
    config: AppConfig,
}

impl RenderBuilder {
    /// Create a new render builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render layout source text into one composite image.
    ///
    /// Font paths in the header are resolved against the configured fonts
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `LayviewError` for malformed input, invalid commands and font
    /// errors.
    pub fn render(&self, source: &str) -> Result<RgbaImage, LayviewError> {
        info!(fonts_dir = self.config.fonts().dir().display().to_string(); "Rendering layout file");

        let renderer = MultiboxRenderer::new(source, self.config.fonts().dir())?;
        let image = renderer.render_image()?;

        debug!("Layout file rendered successfully");
        Ok(image)
    }

    /// Read and render the layout file at `input`.
    ///
    /// # Errors
    ///
    /// Returns `LayviewError::Io` if the file cannot be read, and otherwise
    /// whatever [`Self::render`] returns.
    pub fn render_file(&self, input: &Path) -> Result<RgbaImage, LayviewError> {
        debug!(input = input.display().to_string(); "Reading layout file");
        let source = fs::read_to_string(input)?;
        self.render(&source)
    }

    /// Render layout source text and write the result to `output` as PNG.
    ///
    /// # Errors
    ///
    /// Returns `LayviewError::Export` if the image cannot be written, and
    /// otherwise whatever [`Self::render`] returns.
    pub fn render_png(&self, source: &str, output: &Path) -> Result<(), LayviewError> {
        let image = self.render(source)?;
        export::save_png(&image, output)?;
        Ok(())
    }
}
