//! Font declarations and font loading.
//!
//! A layout file declares its fonts once, as a table from integer index to
//! font file path ([`FontTable`]). Drawing commands refer to fonts by index
//! and a size; resolving a path and size into something drawable is the job
//! of a [`FontSource`].
//!
//! [`FileFontSource`] reads font files from disk and keeps the parsed font
//! data for each path, so switching back and forth between fonts only reads
//! each file once.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt, fs, io,
    path::{Path, PathBuf},
};

use ab_glyph::{Font, FontArc, FontVec, PxScale, PxScaleFont, ScaleFont};
use log::{debug, trace};
use thiserror::Error;

/// Errors raised while turning a font path into a drawable font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file `{}`: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("`{}` is not a valid font file", path.display())]
    InvalidData { path: PathBuf },

    #[error("font size must be positive, got {size}px")]
    InvalidSize { size: i32 },
}

/// Mapping from font index to font file path.
///
/// Built once from the header of a layout file and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    fonts: BTreeMap<i64, PathBuf>,
}

impl FontTable {
    /// Creates an empty font table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the font at `index`, returning any path it replaces.
    pub fn insert(&mut self, index: i64, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.fonts.insert(index, path.into())
    }

    /// Returns the path declared for `index`.
    pub fn get(&self, index: i64) -> Option<&Path> {
        self.fonts.get(&index).map(PathBuf::as_path)
    }

    /// Returns the number of declared fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if no fonts are declared.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Iterates over declarations in index order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Path)> {
        self.fonts.iter().map(|(index, path)| (*index, path.as_path()))
    }
}

/// A font at a fixed pixel size.
///
/// The pixel size is the em size: a 20px font has an em square 20 pixels
/// tall, matching how font sizes are given in layout files.
#[derive(Clone)]
pub struct SizedFont {
    font: FontArc,
    px_size: u32,
}

impl SizedFont {
    /// Wraps `font` at `px_size` pixels per em.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidSize`] if `px_size` is zero or negative.
    pub fn new(font: FontArc, px_size: i32) -> Result<Self, FontError> {
        match u32::try_from(px_size) {
            Ok(px_size) if px_size > 0 => Ok(Self { font, px_size }),
            _ => Err(FontError::InvalidSize { size: px_size }),
        }
    }

    /// Returns the em size in pixels.
    pub fn px_size(&self) -> u32 {
        self.px_size
    }

    /// Returns the glyph scale for this font.
    ///
    /// `ab_glyph` scales by line height (ascent minus descent), so the em size
    /// is converted using the font's own metrics.
    pub fn scale(&self) -> PxScale {
        let em = self.px_size as f32;
        let height = match self.font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                em * self.font.height_unscaled() / units_per_em
            }
            _ => em,
        };
        PxScale::from(height)
    }

    /// Distance from the top of a line to the baseline, in pixels.
    pub fn ascent(&self) -> f32 {
        self.as_scaled().ascent()
    }

    /// Distance from the baseline to the bottom of a line, in pixels.
    /// Negative for fonts descending below the baseline.
    pub fn descent(&self) -> f32 {
        self.as_scaled().descent()
    }

    /// Returns the font with its scale applied, for glyph layout.
    pub fn as_scaled(&self) -> PxScaleFont<&FontArc> {
        self.font.as_scaled(self.scale())
    }
}

impl fmt::Debug for SizedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizedFont")
            .field("px_size", &self.px_size)
            .finish_non_exhaustive()
    }
}

/// Resolves a font file path and pixel size into a drawable font.
pub trait FontSource {
    /// Loads the font at `path` with an em size of `px_size` pixels.
    ///
    /// # Errors
    ///
    /// Returns a [`FontError`] if the file cannot be read or parsed, or if
    /// `px_size` is not positive.
    fn load(&self, path: &Path, px_size: i32) -> Result<SizedFont, FontError>;
}

/// A [`FontSource`] reading font files from the filesystem.
///
/// Parsed font data is cached per path for the lifetime of the source.
#[derive(Default)]
pub struct FileFontSource {
    cache: RefCell<HashMap<PathBuf, FontArc>>,
}

impl FileFontSource {
    /// Creates a source with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many font files have been parsed so far.
    pub fn cached_fonts(&self) -> usize {
        self.cache.borrow().len()
    }

    fn font_data(&self, path: &Path) -> Result<FontArc, FontError> {
        if let Some(font) = self.cache.borrow().get(path) {
            trace!(path = path.display().to_string(); "Font cache hit");
            return Ok(font.clone());
        }

        debug!(path = path.display().to_string(); "Loading font file");
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data)
            .map(FontArc::new)
            .map_err(|_| FontError::InvalidData {
                path: path.to_path_buf(),
            })?;

        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), font.clone());
        Ok(font)
    }
}

impl FontSource for FileFontSource {
    fn load(&self, path: &Path, px_size: i32) -> Result<SizedFont, FontError> {
        if px_size <= 0 {
            return Err(FontError::InvalidSize { size: px_size });
        }
        SizedFont::new(self.font_data(path)?, px_size)
    }
}

impl fmt::Debug for FileFontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileFontSource")
            .field("cached", &self.cached_fonts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn fixture_font() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/fonts/DejaVuSansMono.ttf")
    }

    #[test]
    fn test_font_table_insert_and_get() {
        let mut table = FontTable::new();
        assert!(table.is_empty());

        assert_eq!(table.insert(0, "fonts/a.ttf"), None);
        assert_eq!(table.insert(3, "fonts/b.otf"), None);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(3), Some(Path::new("fonts/b.otf")));
        assert_eq!(table.get(1), None);
    }

    #[test]
    fn test_font_table_last_declaration_wins() {
        let mut table = FontTable::new();
        table.insert(1, "first.ttf");
        let replaced = table.insert(1, "second.ttf");

        assert_eq!(replaced, Some(PathBuf::from("first.ttf")));
        assert_eq!(table.get(1), Some(Path::new("second.ttf")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_font_table_iter_in_index_order() {
        let mut table = FontTable::new();
        table.insert(5, "e.ttf");
        table.insert(-1, "z.ttf");
        table.insert(2, "b.ttf");

        let indices: Vec<_> = table.iter().map(|(index, _)| index).collect();
        assert_eq!(indices, vec![-1, 2, 5]);
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileFontSource::new();
        let result = source.load(Path::new("/nonexistent/font.ttf"), 20);
        assert!(matches!(result, Err(FontError::Io { .. })));
    }

    #[test]
    fn test_file_source_invalid_data() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let source = FileFontSource::new();
        let result = source.load(file.path(), 20);
        assert!(matches!(result, Err(FontError::InvalidData { .. })));
        assert_eq!(source.cached_fonts(), 0);
    }

    #[test]
    fn test_file_source_loads_and_caches() {
        let source = FileFontSource::new();

        let small = source.load(&fixture_font(), 10).unwrap();
        let large = source.load(&fixture_font(), 40).unwrap();

        assert_eq!(small.px_size(), 10);
        assert_eq!(large.px_size(), 40);
        assert_eq!(source.cached_fonts(), 1);
        assert!(large.ascent() > small.ascent());
        assert!(small.descent() < 0.0);
    }

    #[test]
    fn test_scale_uses_em_size() {
        let source = FileFontSource::new();
        let font = source.load(&fixture_font(), 20).unwrap();

        let units_per_em = font.font.units_per_em().unwrap();
        let id = font.font.glyph_id('M');
        let expected = font.font.h_advance_unscaled(id) * 20.0 / units_per_em;

        assert!((font.as_scaled().h_advance(id) - expected).abs() < 0.01);
        // The line is taller than the em square.
        assert!(font.ascent() - font.descent() > 20.0);
    }

    #[test]
    fn test_file_source_rejects_non_positive_size() {
        let source = FileFontSource::new();
        let result = source.load(Path::new("/nonexistent/font.ttf"), 0);
        assert!(matches!(result, Err(FontError::InvalidSize { size: 0 })));
    }
}
