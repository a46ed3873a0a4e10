//! Histogram WASM bindings.
//!
//! Hands the presentation layer the four arrays it charts per channel.
//! Rendering stays on the JavaScript side.

use duckyshop_core::histogram::ChannelHistogram;
use duckyshop_core::{Channel, ImageHistogram};
use wasm_bindgen::prelude::*;

use crate::types::JsRasterImage;

/// Histogram result accessible from JavaScript.
///
/// Channel arguments use storage order: 0 = blue, 1 = green, 2 = red.
/// Any other value throws.
#[wasm_bindgen]
pub struct JsHistogram {
    inner: ImageHistogram,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Raw counts per value (256 bins).
    pub fn frequencies(&self, channel: u8) -> Result<Vec<u32>, JsValue> {
        Ok(self.channel(channel)?.frequencies.to_vec())
    }

    /// Running sum of the counts (256 bins).
    pub fn cumulative(&self, channel: u8) -> Result<Vec<u32>, JsValue> {
        Ok(self.channel(channel)?.cumulative.to_vec())
    }

    /// Counts scaled to 0-255 by pixel count.
    pub fn normalized(&self, channel: u8) -> Result<Vec<u32>, JsValue> {
        Ok(self.channel(channel)?.normalized.to_vec())
    }

    /// Running sum scaled to 0-255 by pixel count.
    pub fn normalized_cumulative(&self, channel: u8) -> Result<Vec<u32>, JsValue> {
        Ok(self.channel(channel)?.normalized_cumulative.to_vec())
    }

    /// Largest bin across all channels, for scaling a chart.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.inner.max_frequency()
    }
}

impl JsHistogram {
    pub(crate) fn from_core(inner: ImageHistogram) -> Self {
        Self { inner }
    }

    fn channel(&self, channel: u8) -> Result<&ChannelHistogram, JsValue> {
        let channel = Channel::ALL
            .get(channel as usize)
            .copied()
            .ok_or_else(|| JsValue::from_str(&format!("Unknown channel: {}", channel)))?;
        Ok(self.inner.channel(channel))
    }
}

/// Compute all histogram arrays for an image.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(image);
/// const blue = hist.frequencies(0);      // Uint32Array[256], throws past 2
/// const table = hist.normalized_cumulative(0);
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(image: &JsRasterImage) -> JsHistogram {
    JsHistogram::from_core(ImageHistogram::compute(image.as_core()))
}
