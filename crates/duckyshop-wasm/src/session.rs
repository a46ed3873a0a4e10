//! Editing session WASM bindings.
//!
//! `JsEditingSession` exposes every editor command of the core session 1:1.
//! Rejected requests throw a string and leave the session unchanged.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditingSession(decode_image(bytes));
//! session.apply_preset("sobel_horizontal");
//! session.adjust_contrast(1.5);
//! canvas.draw(session.visible());
//! ```

use duckyshop_core::{AdjustmentParams, EditingSession, Kernel};
use wasm_bindgen::prelude::*;

use crate::histogram::JsHistogram;
use crate::types::{to_js_error, JsRasterImage};

/// An editing session for one image.
#[wasm_bindgen]
pub struct JsEditingSession {
    inner: EditingSession,
}

#[wasm_bindgen]
impl JsEditingSession {
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsRasterImage) -> JsEditingSession {
        Self {
            inner: EditingSession::new(image.as_core().clone()),
        }
    }

    /// The image the session was started with.
    pub fn original(&self) -> JsRasterImage {
        JsRasterImage::from_core(self.inner.original().clone())
    }

    /// The image to display.
    pub fn visible(&self) -> JsRasterImage {
        JsRasterImage::from_core(self.inner.visible().clone())
    }

    #[wasm_bindgen(getter)]
    pub fn is_grey(&self) -> bool {
        self.inner.is_grey()
    }

    pub fn mirror_horizontal(&mut self) {
        self.inner.mirror_horizontal();
    }

    pub fn mirror_vertical(&mut self) {
        self.inner.mirror_vertical();
    }

    pub fn rotate(&mut self) {
        self.inner.rotate();
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self, row_factor: u32, col_factor: u32) -> Result<(), JsValue> {
        self.inner
            .zoom_out(row_factor, col_factor)
            .map_err(to_js_error)
    }

    pub fn convert_greyscale(&mut self) {
        self.inner.convert_greyscale();
    }

    pub fn convert_negative(&mut self) {
        self.inner.convert_negative();
    }

    /// Filter with a custom kernel given as nine row-major coefficients.
    pub fn apply_filter(&mut self, coefficients: &[f64], clamp: bool) -> Result<(), JsValue> {
        let kernel = Kernel::from_slice(coefficients, clamp).ok_or_else(|| {
            JsValue::from_str(&format!(
                "Kernel needs 9 coefficients, got {}",
                coefficients.len()
            ))
        })?;
        self.inner.apply_filter(&kernel).map_err(to_js_error)
    }

    /// Filter with a named kernel, e.g. `"gaussian"` or `"sobel_vertical"`.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let kernel = Kernel::preset(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown filter: {}", name)))?;
        self.inner.apply_filter(&kernel).map_err(to_js_error)
    }

    pub fn equalize_histogram(&mut self) {
        self.inner.equalize_histogram();
    }

    pub fn equalize_perceptual(&mut self) {
        self.inner.equalize_perceptual();
    }

    /// Grey-level counts of the visible image (256 bins). Converts to grey.
    pub fn grey_histogram(&mut self) -> Vec<u32> {
        self.inner.grey_histogram().to_vec()
    }

    pub fn histograms(&self) -> JsHistogram {
        JsHistogram::from_core(self.inner.histograms())
    }

    pub fn adjust_quantization(&mut self, levels: u32) -> Result<(), JsValue> {
        self.inner.adjust_quantization(levels).map_err(to_js_error)
    }

    pub fn adjust_brightness(&mut self, bias: i32) {
        self.inner.adjust_brightness(bias);
    }

    pub fn adjust_contrast(&mut self, gain: f32) -> Result<(), JsValue> {
        self.inner.adjust_contrast(gain).map_err(to_js_error)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// The visible image as JPEG bytes.
    pub fn export_jpeg(&self, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.inner.export_jpeg(quality).map_err(to_js_error)
    }

    /// Adjustment state as a plain object, for persisting slider positions.
    pub fn params_to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.params()).map_err(to_js_error)
    }

    /// Restore adjustment state saved by `params_to_json`.
    pub fn params_from_json(&mut self, value: JsValue) -> Result<(), JsValue> {
        let params: AdjustmentParams =
            serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        self.inner.apply_params(params).map_err(to_js_error)
    }
}

/// Names accepted by `JsEditingSession.apply_preset`.
#[wasm_bindgen]
pub fn filter_presets() -> Vec<String> {
    Kernel::PRESET_NAMES.iter().map(|s| s.to_string()).collect()
}
