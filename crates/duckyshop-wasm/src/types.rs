//! WASM-compatible wrapper types for image data.
//!
//! JavaScript works in interleaved RGB; the engine stores BGR. The swap
//! happens here, once on the way in and once on the way out.

use std::fmt::Display;

use duckyshop_core::RasterImage;
use wasm_bindgen::prelude::*;

/// A raster image handle for JavaScript.
///
/// The pixel data stays in WASM memory. `pixels()` copies it out as RGB.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: &[u8]) -> Result<JsRasterImage, JsValue> {
        RasterImage::from_rgb(width, height, pixels)
            .map(Self::from_core)
            .ok_or_else(|| {
                JsValue::from_str(&format!(
                    "Invalid pixel data: expected {} bytes for {}x{}, got {}",
                    width as usize * height as usize * 3,
                    width,
                    height,
                    pixels.len()
                ))
            })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.to_rgb()
    }
}

impl JsRasterImage {
    pub(crate) fn from_core(inner: RasterImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &RasterImage {
        &self.inner
    }
}

/// Convert any engine error into the string value thrown to JavaScript.
pub(crate) fn to_js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
