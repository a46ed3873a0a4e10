//! Non-destructive adjustment settings and their replay.

use serde::{Deserialize, Serialize};

use crate::adjustments::{brightness, contrast, quantize};
use crate::raster::RasterImage;

/// A setting that can be switched on and off independently of its value.
///
/// The value is kept while inactive so re-enabling restores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustable<T> {
    pub active: bool,
    pub value: T,
}

impl<T> Adjustable<T> {
    pub fn inactive(value: T) -> Self {
        Self {
            active: false,
            value,
        }
    }

    /// Store `value` and switch the setting on.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.active = true;
    }

    /// The value if the setting is on.
    pub fn get(&self) -> Option<&T> {
        self.active.then_some(&self.value)
    }
}

/// The adjustable parameter set replayed onto the structural buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentParams {
    /// Number of grey levels to keep.
    pub quantization: Adjustable<u32>,
    /// Multiplicative gain.
    pub contrast: Adjustable<f32>,
    /// Additive bias.
    pub brightness: Adjustable<i32>,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            quantization: Adjustable::inactive(256),
            contrast: Adjustable::inactive(1.0),
            brightness: Adjustable::inactive(0),
        }
    }
}

impl AdjustmentParams {
    /// Switch every setting off, keeping the stored values.
    pub fn deactivate_all(&mut self) {
        self.quantization.active = false;
        self.contrast.active = false;
        self.brightness.active = false;
    }

    /// True when no setting is active.
    pub fn is_inactive(&self) -> bool {
        !self.quantization.active && !self.contrast.active && !self.brightness.active
    }
}

/// Rebuild the visible image from the structural one.
///
/// Active settings are applied from scratch in a fixed order: quantization,
/// then contrast, then brightness. Nothing carries over from a previous call.
pub fn recompute(structural: &RasterImage, params: &AdjustmentParams) -> RasterImage {
    let mut visible = structural.clone();
    if let Some(&levels) = params.quantization.get() {
        visible = quantize(&visible, levels);
    }
    if let Some(&gain) = params.contrast.get() {
        visible = contrast(&visible, gain);
    }
    if let Some(&bias) = params.brightness.get() {
        visible = brightness(&visible, bias);
    }
    visible
}
