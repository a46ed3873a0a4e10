//! Image decoding and encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_jpeg } from '@duckyshop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const jpeg = encode_jpeg(image, 90);
//! ```

use duckyshop_core::io;
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsRasterImage};

/// Decode a JPEG or PNG file from bytes.
///
/// EXIF orientation is applied so the result is upright.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    io::load_from_bytes(bytes)
        .map(JsRasterImage::from_core)
        .map_err(to_js_error)
}

/// Encode an image to JPEG bytes (quality 1-100, recommended: 90).
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    io::encode_jpeg(image.as_core(), quality).map_err(to_js_error)
}

/// Encode an image to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    io::encode_png(image.as_core()).map_err(to_js_error)
}

/// Default quality for exports.
#[wasm_bindgen]
pub fn default_jpeg_quality() -> u8 {
    io::SaveOptions::default().quality
}

/// Suggested file name for exports.
#[wasm_bindgen]
pub fn default_file_name() -> String {
    io::DEFAULT_FILE_NAME.to_string()
}
