//! Raster canvases.
//!
//! A [`Canvas`] wraps an RGBA buffer and offers the three drawing operations
//! layouts need: filling a rectangle, drawing a line of text, and pasting
//! another canvas.
//!
//! # Example
//!
//! ```
//! # use layview_core::canvas::Canvas;
//! # use layview_core::color::{BLACK, WHITE};
//! # use layview_core::geometry::{PixelRect, PixelSize};
//! let mut canvas = Canvas::filled(PixelSize::new(20, 20), WHITE);
//! canvas.fill_rect(PixelRect::new(0, 0, 10, 10), BLACK);
//!
//! assert_eq!(canvas.image().get_pixel(9, 9), &BLACK);
//! assert_eq!(canvas.image().get_pixel(10, 10), &WHITE);
//! ```

use ab_glyph::{GlyphId, ScaleFont, point};
use image::{Pixel, Rgba, RgbaImage, imageops};

use crate::{
    font::SizedFont,
    geometry::{PixelPoint, PixelRect, PixelSize},
};

/// An RGBA pixel buffer with a fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Creates a canvas with every pixel set to `color`.
    pub fn filled(size: PixelSize, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width(), size.height(), color),
        }
    }

    /// Creates a fully transparent canvas.
    pub fn transparent(size: PixelSize) -> Self {
        Self {
            image: RgbaImage::new(size.width(), size.height()),
        }
    }

    /// Returns the canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Returns the canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns the canvas dimensions.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width(), self.height())
    }

    /// Returns the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the canvas and returns the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Composites `color` over every pixel covered by `rect`.
    ///
    /// Uses source-over blending, so an opaque color replaces whatever was
    /// painted before. Parts of `rect` outside the canvas are ignored.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.size()) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                composite_over(self.image.get_pixel_mut(x, y), color);
            }
        }
    }

    /// Draws a single line of text.
    ///
    /// `origin` is the top-left corner of the line: its x is where the first
    /// glyph's advance starts and its y is the ascender line, so the baseline
    /// sits `ascent` pixels below it. Glyph coverage is blended into the
    /// canvas. Kerning from the font is applied between glyphs.
    pub fn draw_text(&mut self, origin: PixelPoint, text: &str, color: Rgba<u8>, font: &SizedFont) {
        let scaled = font.as_scaled();
        let baseline = origin.y() as f32 + font.ascent();
        let mut caret = origin.x() as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            previous = Some(id);

            let glyph = id.with_scale_and_position(scaled.scale(), point(caret, baseline));
            caret += scaled.h_advance(id);

            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };

            let bounds = outlined.px_bounds();
            let (width, height) = (self.width() as i64, self.height() as i64);
            let image = &mut self.image;

            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if x < 0 || y < 0 || x >= width || y >= height {
                    return;
                }

                let mut ink = color;
                ink[3] = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                composite_over(image.get_pixel_mut(x as u32, y as u32), ink);
            });
        }
    }

    /// Copies `other` into this canvas with its top-left corner at `(x, y)`.
    ///
    /// Pixels are replaced, not blended. Parts of `other` falling outside
    /// this canvas are dropped.
    pub fn paste(&mut self, other: &Canvas, x: i64, y: i64) {
        imageops::replace(&mut self.image, &other.image, x, y);
    }
}

/// Source-over compositing of `color` onto `pixel`.
///
/// Opaque colors are stored exactly; only partial alpha goes through
/// floating point blending.
fn composite_over(pixel: &mut Rgba<u8>, color: Rgba<u8>) {
    match color[3] {
        0 => {}
        u8::MAX => *pixel = color,
        _ => pixel.blend(&color),
    }
}
