//! PNG export of rendered images.

use std::{
    fs::File,
    io::{BufWriter, Cursor, Write},
    path::Path,
};

use image::{ImageFormat, RgbaImage};
use log::info;

#[derive(Debug)]
pub enum Error {
    Encode(image::ImageError),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "PNG encoding error: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

/// Encodes `image` as PNG into memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(bytes.into_inner())
}

/// Writes `image` to `path` as PNG, replacing any existing file.
///
/// The parent directory must already exist.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(Error::Io)?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(Error::Encode)?;
    writer.flush().map_err(Error::Io)?;

    info!(
        path = path.display().to_string(),
        width = image.width(),
        height = image.height();
        "PNG written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn test_png_round_trip() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(1, 1, Rgba([176, 255, 158, 255]));

        let bytes = encode_png(&image).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .into_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        save_png(&RgbaImage::new(4, 4), &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn test_save_png_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let err = save_png(&RgbaImage::new(1, 1), &path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
