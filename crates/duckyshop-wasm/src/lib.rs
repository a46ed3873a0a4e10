//! Ducky Shop WASM - WebAssembly bindings for the Ducky Shop editor
//!
//! This crate exposes the duckyshop-core editing session, image I/O and
//! histograms to a JavaScript/TypeScript UI.
//!
//! # Module Structure
//!
//! - `types` - JS-facing image handle (RGB at the boundary)
//! - `session` - The editing session, one method per editor command
//! - `histogram` - Histogram arrays for charting
//! - `io` - Decoding and encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditingSession } from '@duckyshop/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditingSession(decode_image(bytes));
//! session.mirror_horizontal();
//! session.adjust_brightness(20);
//! const preview = session.visible();
//! ```

use wasm_bindgen::prelude::*;

mod histogram;
mod io;
mod session;
mod types;

pub use histogram::{compute_histogram, JsHistogram};
pub use io::{decode_image, default_file_name, default_jpeg_quality, encode_jpeg, encode_png};
pub use session::{filter_presets, JsEditingSession};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
