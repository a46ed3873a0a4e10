//! Image encoding for export.
//!
//! JPEG is the editor's save format; PNG is available for lossless output.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::raster::{RasterImage, CHANNELS};

/// File name used when the caller does not choose one.
pub const DEFAULT_FILE_NAME: &str = "DuckyShop.jpeg";

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target path has no extension we can encode to
    #[error("Unsupported output format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoded bytes could not be written
    #[error("Cannot write {}: {source}", .path.display())]
    Unwritable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Options for [`save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    /// JPEG quality, 1-100. Values outside the range are clamped.
    pub quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Encode an image as JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty image and
/// `EncodeError::InvalidPixelData` when the buffer length is inconsistent
/// with the dimensions.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let rgb = validated_rgb(image)?;
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
    let rgb = validated_rgb(image)?;
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode an image and write it to `path`.
///
/// The format follows the file extension: `.jpeg`/`.jpg` (using
/// `options.quality`) or `.png`. Nothing is written if encoding fails.
pub fn save(
    image: &RasterImage,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let bytes = match extension.as_deref() {
        Some("jpeg" | "jpg") => encode_jpeg(image, options.quality)?,
        Some("png") => encode_png(image)?,
        _ => return Err(EncodeError::UnsupportedFormat(path.to_path_buf())),
    };

    std::fs::write(path, &bytes).map_err(|source| EncodeError::Unwritable {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        bytes = bytes.len(),
        "saved image"
    );
    Ok(())
}

fn validated_rgb(image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(image.to_rgb())
}
