//! 3x3 spatial filtering.
//!
//! [`convolve`] slides a kernel over the interior of an image as written: it
//! multiplies `kernel[m][n]` with the source pixel at `(i - 1 + m, j - 1 + n)`.
//! Callers that want a true convolution pass [`Kernel::reflected`]; the
//! editing session does this for every filter request.

use serde::{Deserialize, Serialize};

use crate::raster::{RasterImage, CHANNELS};

/// Offset added to every sum before clipping when a kernel asks for it.
/// Keeps signed edge responses visible around mid-grey.
pub const CLAMP_OFFSET: f64 = 127.0;

/// A 3x3 filter kernel.
///
/// The engine never resizes or normalizes the coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kernel {
    /// Coefficients indexed `[row][column]`.
    pub coefficients: [[f64; 3]; 3],
    /// Add [`CLAMP_OFFSET`] to each sum before clipping to `[0, 255]`.
    pub clamp: bool,
}

impl Kernel {
    pub fn new(coefficients: [[f64; 3]; 3], clamp: bool) -> Self {
        Self {
            coefficients,
            clamp,
        }
    }

    /// Build a kernel from nine row-major coefficients.
    ///
    /// Returns `None` unless exactly nine values are given.
    pub fn from_slice(values: &[f64], clamp: bool) -> Option<Self> {
        if values.len() != 9 {
            return None;
        }
        let coefficients = std::array::from_fn(|i| std::array::from_fn(|j| values[i * 3 + j]));
        Some(Self::new(coefficients, clamp))
    }

    /// 3x3 Gaussian blur.
    pub fn gaussian() -> Self {
        Self::new(
            [
                [0.0625, 0.125, 0.0625],
                [0.125, 0.25, 0.125],
                [0.0625, 0.125, 0.0625],
            ],
            false,
        )
    }

    pub fn laplacian() -> Self {
        Self::new([[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]], false)
    }

    pub fn high_pass() -> Self {
        Self::new(
            [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]],
            false,
        )
    }

    pub fn prewitt_horizontal() -> Self {
        Self::new([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]], true)
    }

    pub fn prewitt_vertical() -> Self {
        Self::new([[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], true)
    }

    pub fn sobel_horizontal() -> Self {
        Self::new([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]], true)
    }

    pub fn sobel_vertical() -> Self {
        Self::new([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]], true)
    }

    /// Names accepted by [`Kernel::preset`], in filter-menu order.
    pub const PRESET_NAMES: [&'static str; 7] = [
        "gaussian",
        "laplacian",
        "high_pass",
        "prewitt_horizontal",
        "prewitt_vertical",
        "sobel_horizontal",
        "sobel_vertical",
    ];

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        let kernel = match name {
            "gaussian" => Self::gaussian(),
            "laplacian" => Self::laplacian(),
            "high_pass" => Self::high_pass(),
            "prewitt_horizontal" => Self::prewitt_horizontal(),
            "prewitt_vertical" => Self::prewitt_vertical(),
            "sobel_horizontal" => Self::sobel_horizontal(),
            "sobel_vertical" => Self::sobel_vertical(),
            _ => return None,
        };
        Some(kernel)
    }

    /// Point reflection of the kernel: `k'[i][j] = k[2 - i][2 - j]`.
    pub fn reflected(&self) -> Self {
        let c = &self.coefficients;
        Self {
            coefficients: std::array::from_fn(|i| std::array::from_fn(|j| c[2 - i][2 - j])),
            clamp: self.clamp,
        }
    }

    /// True iff every coefficient is non-negative and they sum to exactly 1.
    ///
    /// The comparison is exact, so a box blur written as nine `1.0 / 9.0`
    /// entries does not qualify.
    pub fn is_low_pass(&self) -> bool {
        let mut sum = 0.0;
        for &value in self.coefficients.iter().flatten() {
            if value < 0.0 {
                return false;
            }
            sum += value;
        }
        sum == 1.0
    }

    /// Whether every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().flatten().all(|v| v.is_finite())
    }
}

/// Apply a 3x3 kernel to the interior of an image.
///
/// The output has the input's dimensions. The one-pixel border stays black;
/// images narrower or shorter than three pixels come back entirely black.
/// Each interior channel value is the kernel-weighted sum of its 3x3
/// neighbourhood, plus [`CLAMP_OFFSET`] when `kernel.clamp` is set, clipped
/// to `[0, 255]` and truncated.
pub fn convolve(image: &RasterImage, kernel: &Kernel) -> RasterImage {
    let (width, height) = (image.width as usize, image.height as usize);
    let mut output = RasterImage::zeros(image.width, image.height);

    if width < 3 || height < 3 {
        return output;
    }

    let offset = if kernel.clamp { CLAMP_OFFSET } else { 0.0 };

    for i in 1..height - 1 {
        for j in 1..width - 1 {
            let mut sums = [0.0f64; 3];
            for (m, row) in kernel.coefficients.iter().enumerate() {
                for (n, &weight) in row.iter().enumerate() {
                    let px = image.pixel(i - 1 + m, j - 1 + n);
                    for k in 0..CHANNELS {
                        sums[k] += px[k] as f64 * weight;
                    }
                }
            }

            let mut pixel = [0u8; 3];
            for k in 0..CHANNELS {
                pixel[k] = (sums[k] + offset).clamp(0.0, 255.0) as u8;
            }
            output.set_pixel(i, j, pixel);
        }
    }

    output
}
