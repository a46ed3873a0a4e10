//! Histogram computation and histogram equalization.
//!
//! This module builds 256-bin channel histograms, their running sums and
//! normalized forms, and uses the normalized running sum as a lookup table
//! for two equalization strategies:
//! - [`equalize_direct`]: each channel remapped through its own table
//! - [`equalize_via_lab`]: only the Lab lightness plane is remapped, through
//!   the table of the source image's channel 0

use crate::color::{CieLab, PerceptualSpace};
use crate::raster::{Channel, RasterImage, CHANNELS};

/// Number of bins in every histogram.
pub const BINS: usize = 256;

/// Count of pixels per channel value.
///
/// # Example
///
/// ```
/// use duckyshop_core::{histogram::frequencies, Channel, RasterImage};
///
/// let img = RasterImage::new(2, 1, vec![7, 0, 0, 7, 0, 0]);
/// assert_eq!(frequencies(&img, Channel::Blue)[7], 2);
/// ```
pub fn frequencies(image: &RasterImage, channel: Channel) -> [u32; BINS] {
    let mut bins = [0u32; BINS];
    for v in image.channel_values(channel) {
        bins[v as usize] += 1;
    }
    bins
}

/// Running prefix sum of a histogram.
pub fn accumulate(freqs: &[u32; BINS]) -> [u32; BINS] {
    let mut acc = *freqs;
    for i in 1..BINS {
        acc[i] += acc[i - 1];
    }
    acc
}

/// Scale each bin to `floor(freqs[i] / max_value * 255)`.
///
/// `max_value` is usually the pixel count. It is not guarded: with a
/// `max_value` of zero, empty bins become 0 and non-empty bins saturate to
/// `u32::MAX`.
pub fn normalize(freqs: &[u32; BINS], max_value: u32) -> [u32; BINS] {
    let max_value = max_value as f64;
    std::array::from_fn(|i| (freqs[i] as f64 / max_value * 255.0) as u32)
}

/// Equalization lookup table for one channel of `image`.
///
/// The normalized cumulative histogram, mapping each input value to its
/// equalized output.
pub fn equalization_table(image: &RasterImage, channel: Channel) -> [u8; BINS] {
    let total = image.pixel_count() as u32;
    let table = normalize(&accumulate(&frequencies(image, channel)), total);
    std::array::from_fn(|i| table[i].min(255) as u8)
}

/// Equalize each channel independently through its own table.
pub fn equalize_direct(image: &RasterImage) -> RasterImage {
    if image.is_empty() {
        return image.clone();
    }

    let tables = Channel::ALL.map(|channel| equalization_table(image, channel));

    let pixels = image
        .pixels
        .chunks_exact(CHANNELS)
        .flat_map(|px| [tables[0][px[0] as usize], tables[1][px[1] as usize], tables[2][px[2] as usize]])
        .collect();

    RasterImage::new(image.width, image.height, pixels)
}

/// Equalize lightness in CIE Lab, keeping chroma.
///
/// See [`equalize_via_lab_with`].
pub fn equalize_via_lab(image: &RasterImage) -> RasterImage {
    equalize_via_lab_with(image, &CieLab)
}

/// Equalize the lightness plane of `space`, keeping chroma.
///
/// The lookup table comes from channel 0 of the source BGR image, not from
/// the lightness plane's own histogram. Only lightness is remapped before
/// converting back.
pub fn equalize_via_lab_with(image: &RasterImage, space: &impl PerceptualSpace) -> RasterImage {
    if image.is_empty() {
        return image.clone();
    }

    let table = equalization_table(image, Channel::Blue);
    let mut planes = space.to_perceptual(image);
    for l in planes.lightness.iter_mut() {
        *l = table[*l as usize];
    }
    space.from_perceptual(&planes)
}

/// The arrays a presentation layer renders for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistogram {
    /// Raw counts per value.
    pub frequencies: [u32; BINS],
    /// Running sum of `frequencies`.
    pub cumulative: [u32; BINS],
    /// `frequencies` scaled to 0-255 by pixel count.
    pub normalized: [u32; BINS],
    /// `cumulative` scaled to 0-255 by pixel count: the equalization table.
    pub normalized_cumulative: [u32; BINS],
}

impl ChannelHistogram {
    pub fn compute(image: &RasterImage, channel: Channel) -> Self {
        let total = image.pixel_count() as u32;
        let frequencies = frequencies(image, channel);
        let cumulative = accumulate(&frequencies);
        Self {
            normalized: normalize(&frequencies, total),
            normalized_cumulative: normalize(&cumulative, total),
            frequencies,
            cumulative,
        }
    }

    /// Largest bin in `frequencies`.
    pub fn max_frequency(&self) -> u32 {
        self.frequencies.iter().copied().max().unwrap_or(0)
    }
}

/// Histograms for all three channels of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHistogram {
    /// Channel 0.
    pub blue: ChannelHistogram,
    /// Channel 1.
    pub green: ChannelHistogram,
    /// Channel 2.
    pub red: ChannelHistogram,
}

impl ImageHistogram {
    pub fn compute(image: &RasterImage) -> Self {
        Self {
            blue: ChannelHistogram::compute(image, Channel::Blue),
            green: ChannelHistogram::compute(image, Channel::Green),
            red: ChannelHistogram::compute(image, Channel::Red),
        }
    }

    pub fn channel(&self, channel: Channel) -> &ChannelHistogram {
        match channel {
            Channel::Blue => &self.blue,
            Channel::Green => &self.green,
            Channel::Red => &self.red,
        }
    }

    /// Largest bin across all channels, for scaling a chart.
    pub fn max_frequency(&self) -> u32 {
        self.blue
            .max_frequency()
            .max(self.green.max_frequency())
            .max(self.red.max_frequency())
    }
}
