//! Rendering of a whole layout file.
//!
//! A [`MultiboxRenderer`] reads the font table from the file header, renders
//! every layout with its own [`BoxRenderer`], and stacks the resulting
//! canvases top to bottom:
//!
//! ```text
//! +------------------------------+
//! |            margin            |
//! |  +---------------+           |
//! |  |   layout 0    |           |
//! |  +---------------+           |
//! |            margin            |
//! |  +------------------------+  |
//! |  |        layout 1        |  |
//! |  +------------------------+  |
//! |            margin            |
//! +------------------------------+
//! ```
//!
//! The composite background is transparent.

use std::path::Path;

use image::RgbaImage;
use log::{debug, info, warn};

use layview_core::{
    canvas::Canvas,
    font::{FileFontSource, FontSource, FontTable},
    geometry::{MAX_CANVAS_PIXELS, PixelSize, Size},
};
use layview_parser::{Diagnostic, ErrorCode, Header, LayoutReader, Spanned, parse_header};

use crate::{box_renderer::BoxRenderer, error::LayviewError};

/// Space around and between layouts in the composite, in pixels.
pub const MARGIN: u32 = 10;

/// Renderer for a layout file holding any number of layouts.
pub struct MultiboxRenderer {
    source: String,
    header: Header,
    fonts: FontTable,
    font_source: Box<dyn FontSource>,
    image: Option<RgbaImage>,
}

impl MultiboxRenderer {
    /// Reads the font table of `source`, resolving font paths against
    /// `fonts_dir`. Layouts are not parsed until [`Self::render`].
    ///
    /// # Errors
    ///
    /// Returns [`LayviewError::MalformedInput`] if the header is malformed.
    pub fn new(source: impl Into<String>, fonts_dir: &Path) -> Result<Self, LayviewError> {
        Self::with_font_source(source, fonts_dir, Box::new(FileFontSource::new()))
    }

    /// Like [`Self::new`], loading fonts through `font_source`.
    ///
    /// # Errors
    ///
    /// Returns [`LayviewError::MalformedInput`] if the header is malformed.
    pub fn with_font_source(
        source: impl Into<String>,
        fonts_dir: &Path,
        font_source: Box<dyn FontSource>,
    ) -> Result<Self, LayviewError> {
        let source = source.into();
        let header = parse_header(&source)
            .map_err(|err| LayviewError::new_parse_error(err, source.as_str()))?;

        let mut fonts = FontTable::new();
        for decl in header.fonts() {
            let path = fonts_dir.join(decl.path());
            if let Some(previous) = fonts.insert(decl.index(), path) {
                warn!(
                    index = decl.index(),
                    replaced = previous.display().to_string();
                    "Font index declared more than once, using the last declaration"
                );
            }
        }
        debug!(fonts = fonts.len(); "Font table built");

        Ok(Self {
            source,
            header,
            fonts,
            font_source,
            image: None,
        })
    }

    /// Returns the font table read from the header.
    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    /// Returns non-fatal diagnostics found in the header.
    pub fn warnings(&self) -> &[Diagnostic] {
        self.header.warnings()
    }

    /// Renders every layout and stacks them into one image.
    ///
    /// Replaces the result of any earlier call.
    ///
    /// # Errors
    ///
    /// Returns [`LayviewError::MalformedInput`] or
    /// [`LayviewError::InvalidCommand`] if the layouts cannot be parsed,
    /// [`LayviewError::MalformedInput`] if there are no layouts, and the
    /// error of the first failing command otherwise.
    pub fn render(&mut self) -> Result<&RgbaImage, LayviewError> {
        self.image = None;
        let image = self.render_image()?;
        Ok(self.image.insert(image))
    }

    /// Returns the composite image of the last successful [`Self::render`].
    pub fn export(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub(crate) fn render_image(&self) -> Result<RgbaImage, LayviewError> {
        let mut reader =
            LayoutReader::new(&self.source, &self.header).map_err(|err| self.parse_error(err))?;
        info!(layouts = reader.layout_count(); "Rendering layouts");

        let mut canvases = Vec::new();
        while let Some(size) = reader.next_layout().map_err(|err| self.parse_error(err))? {
            let canvas = self.render_layout(canvases.len(), size, &mut reader)?;
            canvases.push(canvas);

            if composite_size(&canvases).is_some_and(|total| total.area() > MAX_CANVAS_PIXELS) {
                return Err(self.parse_error(
                    Diagnostic::error("composite image is too large")
                        .with_code(ErrorCode::E105)
                        .with_label(size.span(), "this layout pushes the image over the pixel limit")
                        .with_help(format!("the composite holds at most {MAX_CANVAS_PIXELS} pixels"))
                        .into(),
                ));
            }
        }

        let image = composite(&canvases)
            .ok_or_else(|| {
                self.parse_error(
                    Diagnostic::error("layout file contains no layouts")
                        .with_help("at least one layout is needed to size the image")
                        .into(),
                )
            })?
            .into_image();

        info!(width = image.width(), height = image.height(); "Composite image rendered");
        Ok(image)
    }

    /// Parses and executes the commands of one layout, in file order.
    fn render_layout(
        &self,
        position: usize,
        size: Spanned<Size>,
        reader: &mut LayoutReader<'_>,
    ) -> Result<Canvas, LayviewError> {
        debug!(
            layout = position,
            width = size.width(),
            height = size.height(),
            commands = reader.pending_commands();
            "Rendering layout"
        );

        let mut renderer = BoxRenderer::new(&self.fonts, self.font_source.as_ref(), *size)
            .map_err(|err| LayviewError::new_render_error(err, size.span(), self.source.as_str()))?;

        while let Some(command) = reader.next_command().map_err(|err| self.parse_error(err))? {
            renderer.execute(&command).map_err(|err| {
                LayviewError::new_render_error(err, command.span(), self.source.as_str())
            })?;
        }

        debug!(layout = position, boxes = renderer.registry().len(); "Layout rendered");
        Ok(renderer.into_canvas())
    }

    fn parse_error(&self, err: layview_parser::ParseError) -> LayviewError {
        LayviewError::new_parse_error(err, self.source.as_str())
    }
}

/// Stacks `canvases` vertically on a transparent background.
///
/// Each canvas is placed [`MARGIN`] pixels from the left edge, the first one
/// [`MARGIN`] pixels from the top and every following one [`MARGIN`] pixels
/// below its predecessor. Returns `None` for an empty slice.
pub fn composite(canvases: &[Canvas]) -> Option<Canvas> {
    let mut image = Canvas::transparent(composite_size(canvases)?);
    let mut y = i64::from(MARGIN);
    for canvas in canvases {
        image.paste(canvas, i64::from(MARGIN), y);
        y += i64::from(canvas.height()) + i64::from(MARGIN);
    }

    Some(image)
}

/// Dimensions of the composite of `canvases`, saturating at `u32::MAX`.
fn composite_size(canvases: &[Canvas]) -> Option<PixelSize> {
    let widest = canvases.iter().map(Canvas::width).max()?;
    let gaps = u32::try_from(canvases.len())
        .unwrap_or(u32::MAX)
        .saturating_add(1);
    let height = canvases
        .iter()
        .map(Canvas::height)
        .fold(MARGIN.saturating_mul(gaps), u32::saturating_add);
    Some(PixelSize::new(widest.saturating_add(2 * MARGIN), height))
}
