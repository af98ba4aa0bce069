//! Geometric primitives for layout rendering.
//!
//! Layout files describe everything in abstract *points*. Rendering happens in
//! *pixels*, with a fixed scale of two pixels per point. Conversion truncates
//! toward zero, so `pix(0.4) == 0` and `pix(-0.4) == 0`.
//!
//! # Overview
//!
//! - [`pix`] - Converts a point value to pixels
//! - [`Size`] - Width and height of a layout, in points
//! - [`PixelSize`] - Canvas dimensions, in pixels
//! - [`PixelPoint`] - A pixel position (cursor location)
//! - [`PixelRect`] - An axis-aligned rectangle in pixel space
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Origin is the top-left corner of the canvas, Y grows downward.

/// Number of pixels per point. Fixed by the layout format.
pub const PIXELS_PER_POINT: f64 = 2.0;

/// Largest number of pixels a canvas may hold (an 8192 x 8192 square).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Converts a point value to pixels, truncating toward zero.
///
/// Values outside the `i32` range saturate.
///
/// # Examples
///
/// ```
/// # use layview_core::geometry::pix;
/// assert_eq!(pix(10.0), 20);
/// assert_eq!(pix(0.4), 0);
/// assert_eq!(pix(1.75), 3);
/// ```
pub fn pix(points: f64) -> i32 {
    (points * PIXELS_PER_POINT) as i32
}

/// Width and height in points, as declared by a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size from point values.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width in points.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height in points.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Converts this size to pixel dimensions.
    ///
    /// Returns `None` if either converted dimension is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layview_core::geometry::{PixelSize, Size};
    /// assert_eq!(Size::new(10.0, 5.2).to_pixels(), Some(PixelSize::new(20, 10)));
    /// assert_eq!(Size::new(-1.0, 5.0).to_pixels(), None);
    /// ```
    pub fn to_pixels(self) -> Option<PixelSize> {
        let width = u32::try_from(pix(self.width)).ok()?;
        let height = u32::try_from(pix(self.height)).ok()?;
        Some(PixelSize::new(width, height))
    }
}

/// Dimensions of a raster buffer, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    width: u32,
    height: u32,
}

impl PixelSize {
    /// Creates a new pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width in pixels.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns the number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A position in pixel space. May lie outside the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    x: i32,
    y: i32,
}

impl PixelPoint {
    /// Creates a new pixel point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts a point-space coordinate pair to pixels.
    pub fn from_points(x: f64, y: f64) -> Self {
        Self::new(pix(x), pix(y))
    }

    /// Returns the x-coordinate.
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate.
    pub fn y(self) -> i32 {
        self.y
    }
}

/// An axis-aligned rectangle in pixel space.
///
/// Stored as edges. `right` and `bottom` are exclusive when painting: a
/// rectangle covers pixels `left <= x < right` and `top <= y < bottom`.
/// A rectangle with `right <= left` or `bottom <= top` covers no pixels but is
/// still a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl PixelRect {
    /// Creates a rectangle from its four edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from a point-space origin and size.
    ///
    /// Each value is converted independently, so the pixel width is
    /// `pix(width)`, not `pix(x + width) - pix(x)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layview_core::geometry::PixelRect;
    /// let rect = PixelRect::from_points(1.0, 2.0, 5.0, 5.0);
    /// assert_eq!(rect, PixelRect::new(2, 4, 12, 14));
    /// ```
    pub fn from_points(x: f64, y: f64, width: f64, height: f64) -> Self {
        let left = pix(x);
        let top = pix(y);
        Self::new(
            left,
            top,
            left.saturating_add(pix(width)),
            top.saturating_add(pix(height)),
        )
    }

    /// Returns the left edge.
    pub fn left(self) -> i32 {
        self.left
    }

    /// Returns the top edge.
    pub fn top(self) -> i32 {
        self.top
    }

    /// Returns the right edge (exclusive).
    pub fn right(self) -> i32 {
        self.right
    }

    /// Returns the bottom edge (exclusive).
    pub fn bottom(self) -> i32 {
        self.bottom
    }

    /// Returns `true` if the interiors of both rectangles intersect.
    ///
    /// Uses strict comparisons, so rectangles that only share an edge do
    /// not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layview_core::geometry::PixelRect;
    /// let a = PixelRect::new(0, 0, 10, 10);
    /// let b = PixelRect::new(5, 5, 15, 15);
    /// let c = PixelRect::new(10, 0, 20, 10);
    /// assert!(a.overlaps(b));
    /// assert!(!a.overlaps(c));
    /// ```
    pub fn overlaps(self, other: PixelRect) -> bool {
        (self.left < other.right && other.left < self.right)
            && (self.top < other.bottom && other.top < self.bottom)
    }

    /// Clips this rectangle to a canvas of the given size.
    ///
    /// Returns the covered pixel ranges as `(x_start, y_start, x_end, y_end)`
    /// with exclusive ends, or `None` if nothing remains visible.
    pub fn clip_to(self, size: PixelSize) -> Option<(u32, u32, u32, u32)> {
        let clamp_x = |v: i32| v.clamp(0, size.width() as i32) as u32;
        let clamp_y = |v: i32| v.clamp(0, size.height() as i32) as u32;

        let (x0, x1) = (clamp_x(self.left), clamp_x(self.right));
        let (y0, y1) = (clamp_y(self.top), clamp_y(self.bottom));

        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_scale() {
        assert_eq!(pix(10.0), 20);
        assert_eq!(pix(0.0), 0);
        assert_eq!(pix(2.5), 5);
    }

    #[test]
    fn test_pix_truncates_toward_zero() {
        assert_eq!(pix(0.4), 0);
        assert_eq!(pix(0.49), 0);
        assert_eq!(pix(0.5), 1);
        assert_eq!(pix(-0.4), 0);
        assert_eq!(pix(-1.3), -2);
    }

    #[test]
    fn test_pix_saturates() {
        assert_eq!(pix(1e12), i32::MAX);
        assert_eq!(pix(-1e12), i32::MIN);
    }

    #[test]
    fn test_pixel_size_area() {
        assert_eq!(PixelSize::new(20, 10).area(), 200);
        assert_eq!(PixelSize::new(u32::MAX, u32::MAX).area(), u64::from(u32::MAX).pow(2));
        assert_eq!(PixelSize::new(8192, 8192).area(), MAX_CANVAS_PIXELS);
    }

    #[test]
    fn test_size_to_pixels() {
        assert_eq!(
            Size::new(10.0, 10.0).to_pixels(),
            Some(PixelSize::new(20, 20))
        );
        assert_eq!(Size::new(0.2, 0.0).to_pixels(), Some(PixelSize::new(0, 0)));
        assert_eq!(Size::new(10.0, -3.0).to_pixels(), None);
    }

    #[test]
    fn test_rect_from_points() {
        let rect = PixelRect::from_points(0.0, 0.0, 5.0, 5.0);
        assert_eq!(rect.left(), 0);
        assert_eq!(rect.top(), 0);
        assert_eq!(rect.right(), 10);
        assert_eq!(rect.bottom(), 10);
    }

    #[test]
    fn test_overlap_nested() {
        let outer = PixelRect::new(0, 0, 100, 100);
        let inner = PixelRect::new(10, 10, 20, 20);
        assert!(outer.overlaps(inner));
        assert!(inner.overlaps(outer));
    }

    #[test]
    fn test_overlap_touching_edges() {
        let a = PixelRect::new(0, 0, 10, 10);
        let below = PixelRect::new(0, 10, 10, 20);
        let corner = PixelRect::new(10, 10, 20, 20);
        assert!(!a.overlaps(below));
        assert!(!a.overlaps(corner));
    }

    #[test]
    fn test_overlap_empty_rect() {
        let a = PixelRect::new(0, 0, 10, 10);
        let empty = PixelRect::new(5, 5, 5, 5);
        assert!(!a.overlaps(empty));
    }

    #[test]
    fn test_clip_inside() {
        let rect = PixelRect::new(2, 3, 8, 9);
        assert_eq!(rect.clip_to(PixelSize::new(20, 20)), Some((2, 3, 8, 9)));
    }

    #[test]
    fn test_clip_partially_outside() {
        let rect = PixelRect::new(-5, 15, 10, 40);
        assert_eq!(rect.clip_to(PixelSize::new(20, 20)), Some((0, 15, 10, 20)));
    }

    #[test]
    fn test_clip_fully_outside() {
        let rect = PixelRect::new(30, 30, 40, 40);
        assert_eq!(rect.clip_to(PixelSize::new(20, 20)), None);

        let inverted = PixelRect::new(10, 10, 5, 5);
        assert_eq!(inverted.clip_to(PixelSize::new(20, 20)), None);
    }
}
