//! Rendering of a single layout onto one canvas.
//!
//! A [`BoxRenderer`] interprets a stream of [`Command`]s. Besides the canvas
//! it keeps a text cursor, the active font, and a registry of every box drawn
//! so far. Overlapping boxes get distinct palette colors: the color cursor
//! walks the palette round-robin, skipping colors already used by boxes the
//! new one overlaps.

use std::collections::HashSet;

use log::trace;
use thiserror::Error;

use layview_core::{
    canvas::Canvas,
    color::{BLACK, ColorCursor, Palette, PaletteIndex, WHITE},
    font::{FontError, FontSource, FontTable, SizedFont},
    geometry::{MAX_CANVAS_PIXELS, PixelPoint, PixelRect, Size, pix},
};
use layview_parser::{Command, Diagnostic, Span};

/// Errors raised while interpreting commands.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("font {index} is not declared in the font table")]
    UnknownFont { index: i64 },

    #[error("text written before any font was selected")]
    NoActiveFont,

    #[error(transparent)]
    FontLoad(#[from] FontError),

    #[error("canvas size {width}x{height} is negative")]
    NegativeSize { width: f64, height: f64 },

    #[error("canvas of {pixels} pixels exceeds the limit of {MAX_CANVAS_PIXELS}")]
    TooLarge { pixels: u64 },

    #[error(transparent)]
    Parse(#[from] Diagnostic),
}

/// Interpreter for the commands of one layout.
pub struct BoxRenderer<'a> {
    fonts: &'a FontTable,
    font_source: &'a dyn FontSource,
    canvas: Canvas,
    cursor: PixelPoint,
    color_cursor: ColorCursor,
    registry: Vec<(PixelRect, PaletteIndex)>,
    font: Option<SizedFont>,
}

impl<'a> BoxRenderer<'a> {
    /// Creates a renderer with an opaque white canvas of `size` points.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NegativeSize`] if either dimension converts to
    /// a negative number of pixels, and [`RenderError::TooLarge`] if the
    /// canvas would hold more than [`MAX_CANVAS_PIXELS`] pixels.
    pub fn new(
        fonts: &'a FontTable,
        font_source: &'a dyn FontSource,
        size: Size,
    ) -> Result<Self, RenderError> {
        let pixels = size.to_pixels().ok_or(RenderError::NegativeSize {
            width: size.width(),
            height: size.height(),
        })?;
        if pixels.area() > MAX_CANVAS_PIXELS {
            return Err(RenderError::TooLarge {
                pixels: pixels.area(),
            });
        }

        Ok(Self {
            fonts,
            font_source,
            canvas: Canvas::filled(pixels, WHITE),
            cursor: PixelPoint::default(),
            color_cursor: ColorCursor::new(),
            registry: Vec::new(),
            font: None,
        })
    }

    /// Applies one command to the canvas.
    ///
    /// # Errors
    ///
    /// - [`RenderError::UnknownFont`] for a font index missing from the table
    /// - [`RenderError::FontLoad`] if the font cannot be loaded at that size
    /// - [`RenderError::NoActiveFont`] for text written before any font
    pub fn execute(&mut self, command: &Command) -> Result<(), RenderError> {
        trace!(command:% = command; "Executing command");

        match *command {
            Command::Move { x, y } => {
                self.cursor = PixelPoint::from_points(x, y);
                Ok(())
            }
            Command::SetFont { index, size } => self.set_font(index, size),
            Command::Write { ref text } => self.write(text),
            Command::DrawBox {
                x,
                y,
                width,
                height,
            } => {
                self.draw_box(PixelRect::from_points(x, y, width, height));
                Ok(())
            }
        }
    }

    /// Parses one raw command line and executes it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] if the line is not a valid command, and
    /// otherwise whatever [`Self::execute`] returns.
    pub fn execute_line(&mut self, line: &str) -> Result<(), RenderError> {
        let command = Command::parse(line, Span::new(0..line.len()))?;
        self.execute(&command)
    }

    /// Returns the canvas in its current state.
    pub fn export(&self) -> &Canvas {
        &self.canvas
    }

    /// Consumes the renderer, returning its canvas.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// Returns every box drawn so far with the color it was given.
    pub fn registry(&self) -> &[(PixelRect, PaletteIndex)] {
        &self.registry
    }

    /// Returns the palette position the next color scan starts from.
    pub fn color_cursor(&self) -> PaletteIndex {
        self.color_cursor.position()
    }

    /// Returns the text cursor in pixels.
    pub fn cursor(&self) -> PixelPoint {
        self.cursor
    }

    fn set_font(&mut self, index: i64, size: f64) -> Result<(), RenderError> {
        let path = self
            .fonts
            .get(index)
            .ok_or(RenderError::UnknownFont { index })?;
        self.font = Some(self.font_source.load(path, pix(size))?);
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), RenderError> {
        let font = self.font.as_ref().ok_or(RenderError::NoActiveFont)?;
        self.canvas.draw_text(self.cursor, text, BLACK, font);
        Ok(())
    }

    fn draw_box(&mut self, rect: PixelRect) {
        if self.registry.iter().any(|(drawn, _)| *drawn == rect) {
            trace!(rect:? = rect; "Box already drawn");
            return;
        }

        let forbidden: HashSet<PaletteIndex> = self
            .registry
            .iter()
            .filter(|(drawn, _)| drawn.overlaps(rect) || rect.overlaps(*drawn))
            .map(|(_, color)| *color)
            .collect();
        let color = self.color_cursor.pick(&forbidden);
        trace!(rect:? = rect, color:% = color, forbidden = forbidden.len(); "Drawing box");

        self.canvas.fill_rect(rect, Palette::color(color));
        self.registry.push((rect, color));
    }
}
