//! Colors used when painting layouts.
//!
//! Boxes are filled from a fixed palette of eight entries. Which entry a box
//! receives is decided by a [`ColorCursor`], a rotating position into the
//! palette that skips colors already used by overlapping boxes.
//!
//! Some palette components are declared above 255. They are kept as declared
//! in [`Palette::raw`] and clamped to 255 when converted to pixels.

use std::{collections::HashSet, fmt};

use image::Rgba;

/// Opaque black, used for text.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque white, the background of every layout canvas.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Fully transparent, the background of the composite image.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

const RAW_PALETTE: [[u16; 3]; Palette::LEN] = [
    [176, 264, 158],
    [274, 173, 207],
    [158, 252, 264],
    [285, 275, 187],
    [132, 217, 136],
    [236, 177, 246],
    [174, 232, 279],
    [285, 234, 158],
];

/// Position of a color in the [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaletteIndex(usize);

impl PaletteIndex {
    /// Creates an index, wrapping values past the end of the palette.
    pub fn new(index: usize) -> Self {
        Self(index % Palette::LEN)
    }

    /// Returns the numeric position.
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns the opaque pixel color at this position.
    pub fn color(self) -> Rgba<u8> {
        Palette::color(self)
    }
}

impl fmt::Display for PaletteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed box palette.
#[derive(Debug, Clone, Copy)]
pub struct Palette;

impl Palette {
    /// Number of colors in the palette.
    pub const LEN: usize = 8;

    /// Returns the declared RGB components, before clamping.
    pub fn raw(index: PaletteIndex) -> [u16; 3] {
        RAW_PALETTE[index.get()]
    }

    /// Returns the opaque pixel color for `index`, each channel clamped to 255.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layview_core::color::{Palette, PaletteIndex};
    /// # use image::Rgba;
    /// assert_eq!(Palette::color(PaletteIndex::new(0)), Rgba([176, 255, 158, 255]));
    /// ```
    pub fn color(index: PaletteIndex) -> Rgba<u8> {
        let [r, g, b] = Self::raw(index);
        Rgba([clamp_channel(r), clamp_channel(g), clamp_channel(b), 255])
    }

    /// Iterates over all palette positions in order.
    pub fn indices() -> impl Iterator<Item = PaletteIndex> {
        (0..Self::LEN).map(PaletteIndex)
    }
}

fn clamp_channel(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Rotating position into the [`Palette`].
///
/// Every color the cursor examines advances it by one, whether the color is
/// taken or not. The cursor is never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCursor {
    position: usize,
}

impl ColorCursor {
    /// Creates a cursor at the first palette entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the palette position the next scan starts from.
    pub fn position(self) -> PaletteIndex {
        PaletteIndex(self.position)
    }

    /// Picks the first color at or after the cursor that is not forbidden.
    ///
    /// Scans at most one full cycle. If every color is forbidden, the last
    /// color examined is returned and the cursor ends where it started.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::collections::HashSet;
    /// # use layview_core::color::{ColorCursor, PaletteIndex};
    /// let mut cursor = ColorCursor::new();
    /// let forbidden = HashSet::from([PaletteIndex::new(0), PaletteIndex::new(1)]);
    ///
    /// assert_eq!(cursor.pick(&forbidden), PaletteIndex::new(2));
    /// assert_eq!(cursor.position(), PaletteIndex::new(3));
    /// ```
    pub fn pick(&mut self, forbidden: &HashSet<PaletteIndex>) -> PaletteIndex {
        let mut examined = self.position();
        for _ in 0..Palette::LEN {
            examined = self.position();
            self.position = (self.position + 1) % Palette::LEN;
            if !forbidden.contains(&examined) {
                break;
            }
        }
        examined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_clamps_out_of_range_channels() {
        assert_eq!(Palette::raw(PaletteIndex::new(3)), [285, 275, 187]);
        assert_eq!(
            Palette::color(PaletteIndex::new(3)),
            Rgba([255, 255, 187, 255])
        );
        assert_eq!(
            Palette::color(PaletteIndex::new(4)),
            Rgba([132, 217, 136, 255])
        );
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        let colors: HashSet<_> = Palette::indices().map(Palette::color).collect();
        assert_eq!(colors.len(), Palette::LEN);
    }

    #[test]
    fn test_palette_index_wraps() {
        assert_eq!(PaletteIndex::new(9), PaletteIndex::new(1));
        assert_eq!(PaletteIndex::new(9).get(), 1);
    }

    #[test]
    fn test_cursor_takes_current_when_free() {
        let mut cursor = ColorCursor::new();
        assert_eq!(cursor.pick(&HashSet::new()), PaletteIndex::new(0));
        assert_eq!(cursor.pick(&HashSet::new()), PaletteIndex::new(1));
        assert_eq!(cursor.position(), PaletteIndex::new(2));
    }

    #[test]
    fn test_cursor_wraps_around() {
        let mut cursor = ColorCursor::new();
        for _ in 0..7 {
            cursor.pick(&HashSet::new());
        }
        let forbidden = HashSet::from([PaletteIndex::new(7)]);
        assert_eq!(cursor.pick(&forbidden), PaletteIndex::new(0));
        assert_eq!(cursor.position(), PaletteIndex::new(1));
    }

    #[test]
    fn test_cursor_all_forbidden_falls_back_to_last_examined() {
        let mut cursor = ColorCursor::new();
        cursor.pick(&HashSet::new());
        cursor.pick(&HashSet::new());
        cursor.pick(&HashSet::new());

        let forbidden: HashSet<_> = Palette::indices().collect();
        let picked = cursor.pick(&forbidden);

        assert_eq!(picked, PaletteIndex::new(2));
        assert_eq!(cursor.position(), PaletteIndex::new(3));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn forbidden_strategy() -> impl Strategy<Value = HashSet<PaletteIndex>> {
        prop::collection::vec(any::<bool>(), Palette::LEN).prop_map(|mask| {
            Palette::indices()
                .zip(mask)
                .filter_map(|(index, forbidden)| forbidden.then_some(index))
                .collect()
        })
    }

    /// A free color is always chosen when one exists, and the cursor lands
    /// right after it.
    fn check_pick_avoids_forbidden(
        start: usize,
        forbidden: HashSet<PaletteIndex>,
    ) -> Result<(), TestCaseError> {
        let mut cursor = ColorCursor::new();
        for _ in 0..start {
            cursor.pick(&HashSet::new());
        }

        let picked = cursor.pick(&forbidden);

        if forbidden.len() < Palette::LEN {
            prop_assert!(!forbidden.contains(&picked));
            prop_assert_eq!(cursor.position(), PaletteIndex::new(picked.get() + 1));
        } else {
            prop_assert_eq!(picked, PaletteIndex::new(start + Palette::LEN - 1));
            prop_assert_eq!(cursor.position(), PaletteIndex::new(start));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn pick_avoids_forbidden(start in 0usize..16, forbidden in forbidden_strategy()) {
            check_pick_avoids_forbidden(start, forbidden)?;
        }
    }
}
