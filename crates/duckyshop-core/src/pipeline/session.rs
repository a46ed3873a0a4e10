//! The stateful editing session behind every editor command.

use std::path::Path;

use tracing::debug;

use super::{recompute, AdjustmentParams, ParameterError};
use crate::adjustments::{negative, to_grey};
use crate::convolution::{convolve, Kernel};
use crate::histogram::{equalize_direct, equalize_via_lab, frequencies, ImageHistogram, BINS};
use crate::io::{self, EncodeError, SaveOptions};
use crate::luminance::is_grey_buffer;
use crate::raster::{Channel, RasterImage};
use crate::transform::{enlarge, mirror_horizontal, mirror_vertical, reduce, rotate90};

/// Owner of the buffers and flags for one image being edited.
///
/// Every method runs to completion and leaves `visible` up to date before
/// returning. Rejected requests leave the session unchanged.
#[derive(Debug, Clone)]
pub struct EditingSession {
    original: RasterImage,
    structural: RasterImage,
    visible: RasterImage,
    is_grey: bool,
    params: AdjustmentParams,
}

impl EditingSession {
    /// Start a session on `image`.
    ///
    /// An image whose pixels already have three equal channels starts out
    /// grey.
    pub fn new(image: RasterImage) -> Self {
        let is_grey = is_grey_buffer(&image.pixels);
        debug!(width = image.width, height = image.height, is_grey, "new editing session");
        Self {
            structural: image.clone(),
            visible: image.clone(),
            original: image,
            is_grey,
            params: AdjustmentParams::default(),
        }
    }

    /// The image the session was started with.
    pub fn original(&self) -> &RasterImage {
        &self.original
    }

    /// The image with every destructive edit applied.
    pub fn structural(&self) -> &RasterImage {
        &self.structural
    }

    /// The image to display and save.
    pub fn visible(&self) -> &RasterImage {
        &self.visible
    }

    /// Whether the working image is grey, either from the start or by
    /// conversion.
    ///
    /// Once set, only [`reset`](Self::reset) clears it.
    pub fn is_grey(&self) -> bool {
        self.is_grey
    }

    pub fn params(&self) -> &AdjustmentParams {
        &self.params
    }

    // ===== Structural edits =====

    pub fn mirror_horizontal(&mut self) {
        self.replace_structural("mirror_horizontal", mirror_horizontal(&self.structural));
    }

    pub fn mirror_vertical(&mut self) {
        self.replace_structural("mirror_vertical", mirror_vertical(&self.structural));
    }

    /// Quarter turn clockwise.
    pub fn rotate(&mut self) {
        self.replace_structural("rotate", rotate90(&self.structural));
    }

    /// Enlarge to `(2w - 1) x (2h - 1)`.
    pub fn zoom_in(&mut self) {
        self.replace_structural("zoom_in", enlarge(&self.structural));
    }

    /// Shrink by averaging `row_factor x col_factor` blocks.
    pub fn zoom_out(&mut self, row_factor: u32, col_factor: u32) -> Result<(), ParameterError> {
        if row_factor == 0 || col_factor == 0 {
            return Err(ParameterError::ZeroResampleFactor {
                row_factor,
                col_factor,
            });
        }
        let reduced = reduce(&self.structural, row_factor, col_factor);
        self.replace_structural("zoom_out", reduced);
        Ok(())
    }

    /// Convert to grey. Does nothing if the image is already grey.
    pub fn convert_greyscale(&mut self) {
        if self.is_grey {
            debug!("greyscale already applied");
            return;
        }
        self.is_grey = true;
        self.replace_structural("convert_greyscale", to_grey(&self.structural));
    }

    pub fn convert_negative(&mut self) {
        self.replace_structural("convert_negative", negative(&self.structural));
    }

    /// Filter the image with `kernel`.
    ///
    /// The kernel is point-reflected before use so the engine performs a
    /// true convolution. A kernel that is not low-pass forces a greyscale
    /// conversion first.
    pub fn apply_filter(&mut self, kernel: &Kernel) -> Result<(), ParameterError> {
        if !kernel.is_finite() {
            return Err(ParameterError::NonFiniteKernel);
        }
        if !kernel.is_low_pass() && !self.is_grey {
            debug!("forcing greyscale before edge filter");
            self.convert_greyscale();
        }
        let filtered = convolve(&self.structural, &kernel.reflected());
        self.replace_structural("apply_filter", filtered);
        Ok(())
    }

    /// Equalize each channel through its own cumulative histogram.
    pub fn equalize_histogram(&mut self) {
        self.replace_structural("equalize_histogram", equalize_direct(&self.structural));
    }

    /// Equalize lightness only, keeping colour.
    ///
    /// A grey image has no colour to keep, so it is equalized per channel.
    pub fn equalize_perceptual(&mut self) {
        let equalized = if self.is_grey {
            equalize_direct(&self.structural)
        } else {
            equalize_via_lab(&self.structural)
        };
        self.replace_structural("equalize_perceptual", equalized);
    }

    // ===== Histograms =====

    /// Grey-level histogram of the visible image.
    ///
    /// Converts the session to grey first, like every grey-level operation.
    pub fn grey_histogram(&mut self) -> [u32; BINS] {
        self.convert_greyscale();
        frequencies(&self.visible, Channel::Blue)
    }

    /// All four histogram arrays for every channel of the visible image.
    pub fn histograms(&self) -> ImageHistogram {
        ImageHistogram::compute(&self.visible)
    }

    // ===== Adjustments =====

    /// Keep at most `levels` grey levels. Converts to grey first.
    pub fn adjust_quantization(&mut self, levels: u32) -> Result<(), ParameterError> {
        if levels == 0 {
            return Err(ParameterError::ZeroQuantization);
        }
        self.convert_greyscale();
        self.params.quantization.set(levels);
        self.refresh("adjust_quantization");
        Ok(())
    }

    pub fn adjust_brightness(&mut self, bias: i32) {
        self.params.brightness.set(bias);
        self.refresh("adjust_brightness");
    }

    pub fn adjust_contrast(&mut self, gain: f32) -> Result<(), ParameterError> {
        validate_gain(gain)?;
        self.params.contrast.set(gain);
        self.refresh("adjust_contrast");
        Ok(())
    }

    /// Replace the whole parameter set, e.g. restored from saved UI state.
    ///
    /// Active values are validated like the individual setters; an active
    /// quantization converts to grey.
    pub fn apply_params(&mut self, params: AdjustmentParams) -> Result<(), ParameterError> {
        if params.quantization.get() == Some(&0) {
            return Err(ParameterError::ZeroQuantization);
        }
        if let Some(&gain) = params.contrast.get() {
            validate_gain(gain)?;
        }
        if params.quantization.active {
            self.convert_greyscale();
        }
        self.params = params;
        self.refresh("apply_params");
        Ok(())
    }

    // ===== Session =====

    /// Drop every edit and return to the original image.
    ///
    /// The grey flag is cleared even for a grey original. Adjustment values
    /// stay stored but inactive.
    pub fn reset(&mut self) {
        self.structural = self.original.clone();
        self.visible = self.original.clone();
        self.is_grey = false;
        self.params.deactivate_all();
        debug!("session reset");
    }

    /// Write the visible image to `path`.
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<(), EncodeError> {
        io::save(&self.visible, path, options)
    }

    /// The visible image as JPEG bytes.
    pub fn export_jpeg(&self, quality: u8) -> Result<Vec<u8>, EncodeError> {
        io::encode_jpeg(&self.visible, quality)
    }

    fn replace_structural(&mut self, operation: &'static str, image: RasterImage) {
        self.structural = image;
        self.refresh(operation);
    }

    fn refresh(&mut self, operation: &'static str) {
        self.visible = recompute(&self.structural, &self.params);
        debug!(
            operation,
            width = self.visible.width,
            height = self.visible.height,
            is_grey = self.is_grey,
            params = ?self.params,
            "pipeline updated"
        );
    }
}

fn validate_gain(gain: f32) -> Result<(), ParameterError> {
    if !gain.is_finite() || gain < 0.0 {
        return Err(ParameterError::InvalidContrast(gain));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::{brightness, contrast};
    use crate::luminance::is_grey_buffer;

    fn grey(width: u32, height: u32, value: u8) -> RasterImage {
        RasterImage::filled(width, height, [value; 3])
    }

    /// Colourful 4x3 image with distinct pixels.
    fn colourful() -> RasterImage {
        let pixels = (0..4 * 3 * 3).map(|i| (i * 7 % 256) as u8).collect();
        RasterImage::new(4, 3, pixels)
    }

    /// Grey image whose value grows by `step` per column.
    fn column_ramp(width: u32, height: u32, step: u8) -> RasterImage {
        let mut img = RasterImage::zeros(width, height);
        for row in 0..height as usize {
            for col in 0..width as usize {
                let v = col as u8 * step;
                img.set_pixel(row, col, [v, v, v]);
            }
        }
        img
    }

    #[test]
    fn test_new_session_is_clean() {
        let session = EditingSession::new(colourful());
        assert_eq!(session.visible(), session.original());
        assert_eq!(session.structural(), session.original());
        assert!(!session.is_grey());
        assert!(session.params().is_inactive());
    }

    #[test]
    fn test_adjustments_replay_in_fixed_order() {
        let mut session = EditingSession::new(grey(10, 10, 100));
        session.adjust_brightness(50);
        session.adjust_contrast(2.0).unwrap();

        let expected = brightness(&contrast(session.structural(), 2.0), 50);
        assert_eq!(session.visible(), &expected);
        assert_eq!(session.visible(), &grey(10, 10, 250));
    }

    #[test]
    fn test_adjustments_do_not_compound() {
        let mut session = EditingSession::new(grey(2, 2, 100));
        session.adjust_brightness(10);
        session.adjust_brightness(20);
        assert_eq!(session.visible(), &grey(2, 2, 120));
        assert_eq!(session.structural(), &grey(2, 2, 100));
    }

    #[test]
    fn test_structural_edit_keeps_adjustments() {
        let img = RasterImage::new(2, 1, vec![10, 10, 10, 50, 50, 50]);
        let mut session = EditingSession::new(img);
        session.adjust_brightness(5);
        session.mirror_horizontal();
        assert_eq!(session.structural().pixels, vec![50, 50, 50, 10, 10, 10]);
        assert_eq!(session.visible().pixels, vec![55, 55, 55, 15, 15, 15]);
    }

    #[test]
    fn test_reset_restores_original() {
        let original = colourful();
        let mut session = EditingSession::new(original.clone());

        session.rotate();
        session.mirror_vertical();
        session.zoom_in();
        session.apply_filter(&Kernel::laplacian()).unwrap();
        session.convert_negative();
        session.adjust_quantization(3).unwrap();
        session.adjust_contrast(1.5).unwrap();
        session.adjust_brightness(-30);
        session.zoom_out(2, 2).unwrap();
        assert!(session.is_grey());

        session.reset();
        assert_eq!(session.structural(), &original);
        assert_eq!(session.visible(), &original);
        assert!(!session.is_grey());
        assert!(session.params().is_inactive());
        assert_eq!(session.params().quantization.value, 3);
    }

    #[test]
    fn test_greyscale_is_sticky() {
        let mut session = EditingSession::new(colourful());
        session.convert_greyscale();
        assert!(session.is_grey());
        assert!(is_grey_buffer(&session.structural().pixels));

        session.convert_negative();
        session.mirror_horizontal();
        session.apply_filter(&Kernel::gaussian()).unwrap();
        assert!(session.is_grey());

        let before = session.structural().clone();
        session.convert_greyscale();
        assert_eq!(session.structural(), &before);
    }

    #[test]
    fn test_edge_filter_forces_grey() {
        let mut session = EditingSession::new(colourful());
        session.apply_filter(&Kernel::sobel_horizontal()).unwrap();
        assert!(session.is_grey());
        assert!(is_grey_buffer(&session.structural().pixels));
    }

    #[test]
    fn test_low_pass_filter_keeps_colour() {
        let img = RasterImage::filled(3, 3, [10, 20, 30]);
        let mut session = EditingSession::new(img);
        session.apply_filter(&Kernel::gaussian()).unwrap();
        assert!(!session.is_grey());
        assert_eq!(session.structural().pixel(1, 1), [10, 20, 30]);
        assert_eq!(session.structural().pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_filter_is_true_convolution() {
        // Correlating with horizontal Sobel gives 127 + 80 on this ramp;
        // the reflected kernel gives 127 - 80.
        let mut session = EditingSession::new(column_ramp(3, 3, 10));
        session.apply_filter(&Kernel::sobel_horizontal()).unwrap();
        assert_eq!(session.structural().pixel(1, 1), [47; 3]);
    }

    #[test]
    fn test_non_finite_kernel_rejected() {
        let mut session = EditingSession::new(colourful());
        let mut kernel = Kernel::laplacian();
        kernel.coefficients[1][1] = f64::INFINITY;
        assert_eq!(
            session.apply_filter(&kernel),
            Err(ParameterError::NonFiniteKernel)
        );
        assert!(!session.is_grey());
        assert_eq!(session.structural(), session.original());
    }

    #[test]
    fn test_quantization_forces_grey() {
        let mut session = EditingSession::new(colourful());
        session.adjust_quantization(2).unwrap();
        assert!(session.is_grey());
        assert!(is_grey_buffer(&session.structural().pixels));
        assert!(session.params().quantization.active);
    }

    #[test]
    fn test_quantization_flat_image_is_identity() {
        let mut session = EditingSession::new(grey(4, 4, 100));
        session.adjust_quantization(2).unwrap();
        assert_eq!(session.visible(), &grey(4, 4, 100));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut session = EditingSession::new(colourful());
        assert_eq!(
            session.adjust_quantization(0),
            Err(ParameterError::ZeroQuantization)
        );
        assert_eq!(
            session.adjust_contrast(-1.0),
            Err(ParameterError::InvalidContrast(-1.0))
        );
        assert!(session.adjust_contrast(f32::NAN).is_err());
        assert_eq!(
            session.zoom_out(0, 2),
            Err(ParameterError::ZeroResampleFactor {
                row_factor: 0,
                col_factor: 2
            })
        );

        assert!(!session.is_grey());
        assert!(session.params().is_inactive());
        assert_eq!(session.visible(), session.original());
    }

    #[test]
    fn test_zoom_dimensions() {
        let mut session = EditingSession::new(RasterImage::zeros(6, 4));
        session.zoom_in();
        assert_eq!((session.visible().width, session.visible().height), (11, 7));

        session.reset();
        // 4 rows / 2 and 6 columns / 3
        session.zoom_out(2, 3).unwrap();
        assert_eq!((session.visible().width, session.visible().height), (2, 2));
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let mut session = EditingSession::new(colourful());
        session.rotate();
        assert_eq!((session.visible().width, session.visible().height), (3, 4));
    }

    #[test]
    fn test_equalize_histogram() {
        let mut session = EditingSession::new(grey(2, 2, 10));
        session.equalize_histogram();
        assert_eq!(session.visible(), &grey(2, 2, 255));
    }

    #[test]
    fn test_grey_input_starts_grey() {
        let session = EditingSession::new(grey(3, 2, 10));
        assert!(session.is_grey());
        assert!(session.params().is_inactive());

        let session = EditingSession::new(RasterImage::filled(3, 2, [10, 10, 11]));
        assert!(!session.is_grey());
    }

    #[test]
    fn test_grey_input_skips_forced_conversion() {
        // Already grey, so the quantization does not run a greyscale pass
        // and the flag was never flipped by it.
        let mut session = EditingSession::new(grey(4, 1, 50));
        session.adjust_quantization(2).unwrap();
        assert!(session.is_grey());
        assert_eq!(session.structural(), session.original());
    }

    #[test]
    fn test_equalize_perceptual_grey_input_is_direct() {
        let mut session = EditingSession::new(grey(2, 2, 10));
        session.equalize_perceptual();
        assert_eq!(session.visible(), &grey(2, 2, 255));
    }

    #[test]
    fn test_equalize_perceptual_colour_uses_lab() {
        // Lightness of this near-black pixel falls below the only populated
        // channel-0 bin, so the Lab path darkens it; the per-channel path
        // would send every channel to 255.
        let mut session = EditingSession::new(RasterImage::filled(2, 2, [10, 10, 11]));
        session.equalize_perceptual();
        assert!(session.visible().pixels.iter().all(|&v| v < 16), "{:?}", session.visible());
    }

    #[test]
    fn test_reset_clears_grey_of_grey_original() {
        let mut session = EditingSession::new(grey(2, 2, 10));
        session.reset();
        assert!(!session.is_grey());

        session.convert_greyscale();
        session.equalize_perceptual();
        assert_eq!(session.visible(), &grey(2, 2, 255));
    }

    #[test]
    fn test_grey_histogram_forces_grey() {
        let img = RasterImage::filled(3, 2, [0, 0, 255]);
        let mut session = EditingSession::new(img);
        let hist = session.grey_histogram();
        assert!(session.is_grey());
        assert_eq!(hist[76], 6);
        assert_eq!(hist.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_histograms_follow_visible() {
        let mut session = EditingSession::new(grey(2, 2, 100));
        session.adjust_brightness(20);
        let hist = session.histograms();
        assert_eq!(hist.blue.frequencies[120], 4);
        assert_eq!(hist.red.normalized_cumulative[120], 255);
    }

    #[test]
    fn test_apply_params() {
        let mut session = EditingSession::new(grey(2, 2, 100));
        let mut params = AdjustmentParams::default();
        params.contrast.set(2.0);
        params.brightness.set(50);
        session.apply_params(params).unwrap();
        assert_eq!(session.visible(), &grey(2, 2, 250));

        let mut bad = params;
        bad.quantization.set(0);
        assert_eq!(session.apply_params(bad), Err(ParameterError::ZeroQuantization));
        assert_eq!(session.params(), &params);
    }

    #[test]
    fn test_save_writes_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.png");

        let mut session = EditingSession::new(colourful());
        session.convert_negative();
        session.save(&path, &SaveOptions::default()).unwrap();

        assert_eq!(&io::load(&path).unwrap(), session.visible());
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(io::DEFAULT_FILE_NAME);

        let mut session = EditingSession::new(colourful());
        session.adjust_brightness(10);
        let before = session.visible().clone();
        assert!(session.save(&path, &SaveOptions::default()).is_err());
        assert_eq!(session.visible(), &before);
    }

    #[test]
    fn test_export_jpeg() {
        let session = EditingSession::new(grey(8, 8, 64));
        let jpeg = session.export_jpeg(90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
