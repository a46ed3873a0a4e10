//! Image decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag};
use image::{ImageError, ImageReader};
use thiserror::Error;
use tracing::debug;

use crate::raster::RasterImage;
use crate::transform::{mirror_horizontal, mirror_vertical, rotate90};

/// Errors raised while turning a file or byte buffer into a `RasterImage`.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source could not be read at all.
    #[error("Cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The data is not in a format the decoder understands.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The data looked like an image but could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// EXIF orientation values (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal after a clockwise quarter turn.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal after a counter-clockwise quarter turn.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

impl Orientation {
    /// Bring an image stored with this orientation upright.
    pub fn apply(self, image: RasterImage) -> RasterImage {
        match self {
            Orientation::Normal => image,
            Orientation::FlipHorizontal => mirror_horizontal(&image),
            Orientation::Rotate180 => mirror_vertical(&mirror_horizontal(&image)),
            Orientation::FlipVertical => mirror_vertical(&image),
            Orientation::Transpose => mirror_horizontal(&rotate90(&image)),
            Orientation::Rotate90CW => rotate90(&image),
            Orientation::Transverse => mirror_horizontal(&rotate_ccw(&image)),
            Orientation::Rotate270CW => rotate_ccw(&image),
        }
    }
}

fn rotate_ccw(image: &RasterImage) -> RasterImage {
    rotate90(&rotate90(&rotate90(image)))
}

/// Load an image file from disk.
///
/// See [`load_from_bytes`].
pub fn load(path: impl AsRef<Path>) -> Result<RasterImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "loading image");
    load_from_bytes(&bytes)
}

/// Decode an encoded image held in memory.
///
/// The format is sniffed from the data. Any colour type the decoder produces
/// is converted to 8-bit, 3-channel, and the EXIF orientation tag (if any) is
/// applied so the result is upright.
pub fn load_from_bytes(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let decoded = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let rgb = decoded.into_rgb8();
    let (width, height) = rgb.dimensions();
    let image = RasterImage::from_rgb(width, height, rgb.as_raw())
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer size mismatch".to_string()))?;

    debug!(width, height, ?orientation, "decoded image");
    Ok(orientation.apply(image))
}

/// EXIF orientation stored in `bytes`, or `Normal` when there is none.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::encode_png;

    /// 2x1 image: blue-ish pixel on the left, red-ish on the right (BGR).
    fn two_pixels() -> RasterImage {
        RasterImage::new(2, 1, vec![200, 10, 20, 30, 40, 250])
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_orientation_normal_is_identity() {
        assert_eq!(Orientation::Normal.apply(two_pixels()), two_pixels());
    }

    #[test]
    fn test_orientation_rotations_swap_dimensions() {
        for orientation in [
            Orientation::Transpose,
            Orientation::Rotate90CW,
            Orientation::Transverse,
            Orientation::Rotate270CW,
        ] {
            let result = orientation.apply(two_pixels());
            assert_eq!((result.width, result.height), (1, 2), "{:?}", orientation);
        }
    }

    #[test]
    fn test_orientation_rotate180_reverses() {
        let result = Orientation::Rotate180.apply(two_pixels());
        assert_eq!(result.pixels, vec![30, 40, 250, 200, 10, 20]);
    }

    #[test]
    fn test_orientation_quarter_turns() {
        // Clockwise: the left pixel ends on top
        let cw = Orientation::Rotate90CW.apply(two_pixels());
        assert_eq!(cw.pixel(0, 0), [200, 10, 20]);

        // Counter-clockwise: the right pixel ends on top
        let ccw = Orientation::Rotate270CW.apply(two_pixels());
        assert_eq!(ccw.pixel(0, 0), [30, 40, 250]);
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
        let png = encode_png(&two_pixels()).unwrap();
        assert_eq!(read_orientation(&png), Orientation::Normal);
    }

    #[test]
    fn test_load_from_bytes_swaps_to_bgr() {
        // PNG is lossless, so the exact values come back
        let png = encode_png(&two_pixels()).unwrap();
        let loaded = load_from_bytes(&png).unwrap();
        assert_eq!(loaded, two_pixels());
    }

    #[test]
    fn test_load_invalid_bytes() {
        let result = load_from_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_load_empty_bytes() {
        assert!(load_from_bytes(&[]).is_err());
    }

    #[test]
    fn test_load_truncated_png() {
        let png = encode_png(&two_pixels()).unwrap();
        let result = load_from_bytes(&png[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.jpeg");
        match load(&path) {
            Err(DecodeError::Unreadable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Unreadable, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.png");
        std::fs::write(&path, encode_png(&two_pixels()).unwrap()).unwrap();
        assert_eq!(load(&path).unwrap(), two_pixels());
    }

    #[test]
    fn test_decode_error_display() {
        assert_eq!(
            DecodeError::InvalidFormat.to_string(),
            "Invalid or unsupported image format"
        );
        let err = DecodeError::Unreadable {
            path: PathBuf::from("a/b.jpeg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Cannot read a/b.jpeg: gone");
    }
}
