//! Edge detection: Sobel gradient with a single magnitude cutoff.
//!
//! The camera pipeline calls this "Canny", but there is no non-maximum
//! suppression and no hysteresis. Each interior pixel gets a 3x3 Sobel
//! gradient over the Red channel and becomes opaque white when the gradient
//! magnitude exceeds the threshold, opaque black otherwise. The outermost
//! ring of pixels is always opaque black.
//!
//! ## Gradient norm
//!
//! - **Manhattan** (default): `|gx| + |gy|` against `floor(threshold1 * 4)`.
//!   The factor of four keeps thresholds in the same range callers used with
//!   the Euclidean form.
//! - **Euclidean**: `sqrt(gx² + gy²)` clamped to 0-255 against `threshold1`.
//!   Slower; kept for comparing against frames captured with the older build.
//!
//! `threshold2` is accepted for API compatibility with the two-threshold
//! Canny signature and is ignored.

use log::debug;
use ndarray::{ArrayView3, ArrayViewMut3};

use crate::error::{FilterError, FilterResult};
use crate::filters::core::{check_dimensions, put_pixel, rgba_pair, BLACK, CHANNELS, WHITE};

/// Smallest image with at least one interior pixel.
pub const MIN_EDGE_SIZE: usize = 3;

/// Scale from the Euclidean threshold range to the Manhattan one.
const MANHATTAN_SCALE: f64 = 4.0;

/// How the Sobel components are combined into one magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientNorm {
    #[default]
    Manhattan,
    Euclidean,
}

/// Thresholds for [`canny_edge_u8`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyParams {
    /// Magnitude cutoff
    pub threshold1: f64,
    /// Unused
    pub threshold2: f64,
    pub norm: GradientNorm,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            threshold1: 50.0,
            threshold2: 150.0,
            norm: GradientNorm::Manhattan,
        }
    }
}

impl CannyParams {
    pub fn new(threshold1: f64, threshold2: f64) -> Self {
        Self {
            threshold1,
            threshold2,
            ..Self::default()
        }
    }

    pub fn with_norm(mut self, norm: GradientNorm) -> Self {
        self.norm = norm;
        self
    }
}

/// Sobel gradient `(gx, gy)` of the Red channel around `(y, x)`.
///
/// `(y, x)` must be an interior pixel.
#[inline]
fn sobel_red(input: &ArrayView3<u8>, y: usize, x: usize) -> (i32, i32) {
    let r = |py: usize, px: usize| input[[py, px, 0]] as i32;

    let gx = (r(y - 1, x + 1) + 2 * r(y, x + 1) + r(y + 1, x + 1))
        - (r(y - 1, x - 1) + 2 * r(y, x - 1) + r(y + 1, x - 1));
    let gy = (r(y + 1, x - 1) + 2 * r(y + 1, x) + r(y + 1, x + 1))
        - (r(y - 1, x - 1) + 2 * r(y - 1, x) + r(y - 1, x + 1));

    (gx, gy)
}

/// Run edge detection from an RGBA view into an equally shaped RGBA view.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4), height and width >= 3
/// * `output` - Destination of the same shape; every pixel is overwritten
/// * `params` - Thresholds and gradient norm
pub fn canny_edge_u8(
    input: ArrayView3<u8>,
    mut output: ArrayViewMut3<u8>,
    params: &CannyParams,
) -> FilterResult<()> {
    let (height, width, channels) = input.dim();
    if channels != CHANNELS {
        return Err(FilterError::UnsupportedFormat(format!(
            "expected {CHANNELS} channels, got {channels}"
        )));
    }
    check_dimensions(width, height, MIN_EDGE_SIZE)?;
    if output.dim() != input.dim() {
        let (oh, ow, oc) = output.dim();
        return Err(FilterError::BufferSizeMismatch {
            buffer: "output",
            expected: height * width * channels,
            actual: oh * ow * oc,
        });
    }

    match params.norm {
        GradientNorm::Manhattan => {
            let cutoff = (params.threshold1 * MANHATTAN_SCALE).floor();
            for y in 1..height - 1 {
                for x in 1..width - 1 {
                    let (gx, gy) = sobel_red(&input, y, x);
                    let magnitude = gx.abs() + gy.abs();
                    let rgba = if f64::from(magnitude) > cutoff { WHITE } else { BLACK };
                    put_pixel(&mut output, y, x, rgba);
                }
            }
        }
        GradientNorm::Euclidean => {
            for y in 1..height - 1 {
                for x in 1..width - 1 {
                    let (gx, gy) = sobel_red(&input, y, x);
                    let magnitude = (((gx * gx + gy * gy) as f64).sqrt() as i32).clamp(0, 255);
                    let rgba = if f64::from(magnitude) > params.threshold1 { WHITE } else { BLACK };
                    put_pixel(&mut output, y, x, rgba);
                }
            }
        }
    }

    // Border ring
    for x in 0..width {
        put_pixel(&mut output, 0, x, BLACK);
        put_pixel(&mut output, height - 1, x, BLACK);
    }
    for y in 1..height - 1 {
        put_pixel(&mut output, y, 0, BLACK);
        put_pixel(&mut output, y, width - 1, BLACK);
    }

    debug!("Canny edge detection processed: {}x{}", width, height);
    Ok(())
}

/// Edge detection over flat RGBA byte buffers.
///
/// Both buffers must be exactly `width * height * 4` bytes. Nothing is written
/// when validation fails.
pub fn canny_edge_rgba(
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
    threshold1: f64,
    threshold2: f64,
) -> FilterResult<()> {
    canny_edge_with(input, output, width, height, &CannyParams::new(threshold1, threshold2))
}

/// [`canny_edge_rgba`] with explicit parameters.
pub fn canny_edge_with(
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
    params: &CannyParams,
) -> FilterResult<()> {
    check_dimensions(width, height, MIN_EDGE_SIZE)?;
    let (input, output) = rgba_pair(input, output, width, height)?;
    canny_edge_u8(input, output, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn image_from_red(width: usize, height: usize, red: impl Fn(usize, usize) -> u8) -> Vec<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 4));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = red(y, x);
                img[[y, x, 1]] = 17;
                img[[y, x, 2]] = 99;
                img[[y, x, 3]] = 255;
            }
        }
        img.into_raw_vec_and_offset().0
    }

    fn pixel(buf: &[u8], width: usize, y: usize, x: usize) -> [u8; 4] {
        let i = (y * width + x) * 4;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let (w, h) = (6, 5);
        let input = image_from_red(w, h, |_, _| 128);
        let mut output = vec![7u8; input.len()];

        canny_edge_rgba(&input, &mut output, w, h, 0.0, 0.0).unwrap();

        for y in 0..h {
            for x in 0..w {
                assert_eq!(pixel(&output, w, y, x), BLACK);
            }
        }
    }

    #[test]
    fn test_vertical_edge_detected() {
        let (w, h) = (10, 6);
        let input = image_from_red(w, h, |_, x| if x < w / 2 { 0 } else { 255 });
        let mut output = vec![0u8; input.len()];

        canny_edge_rgba(&input, &mut output, w, h, 10.0, 0.0).unwrap();

        for y in 1..h - 1 {
            // Columns straddling the step at x = 5
            assert_eq!(pixel(&output, w, y, 4), WHITE, "y={y} x=4");
            assert_eq!(pixel(&output, w, y, 5), WHITE, "y={y} x=5");
            // Far from the step
            assert_eq!(pixel(&output, w, y, 1), BLACK, "y={y} x=1");
            assert_eq!(pixel(&output, w, y, 8), BLACK, "y={y} x=8");
        }
    }

    #[test]
    fn test_border_always_black() {
        let (w, h) = (5, 4);
        // Noisy input that lights up every interior pixel
        let input = image_from_red(w, h, |y, x| if (x + y) % 2 == 0 { 0 } else { 255 });
        let mut output = vec![123u8; input.len()];

        canny_edge_rgba(&input, &mut output, w, h, 0.0, 0.0).unwrap();

        for x in 0..w {
            assert_eq!(pixel(&output, w, 0, x), BLACK);
            assert_eq!(pixel(&output, w, h - 1, x), BLACK);
        }
        for y in 0..h {
            assert_eq!(pixel(&output, w, y, 0), BLACK);
            assert_eq!(pixel(&output, w, y, w - 1), BLACK);
        }
    }

    #[test]
    fn test_only_red_channel_matters() {
        let (w, h) = (5, 5);
        let mut input = image_from_red(w, h, |_, _| 40);
        // Strong step in green and blue only
        for y in 0..h {
            for x in 3..w {
                let i = (y * w + x) * 4;
                input[i + 1] = 255;
                input[i + 2] = 255;
            }
        }
        let mut output = vec![0u8; input.len()];

        canny_edge_rgba(&input, &mut output, w, h, 0.0, 0.0).unwrap();
        assert_eq!(pixel(&output, w, 2, 2), BLACK);
    }

    #[test]
    fn test_threshold_is_scaled_by_four() {
        // Single bright column at x = 2: at (2, 1) gx = 0 and gy = 0,
        // at (1, 1) gx = 4 * 100 = 400, gy = 0.
        let (w, h) = (5, 3);
        let input = image_from_red(w, h, |_, x| if x == 2 { 100 } else { 0 });

        let mut output = vec![0u8; input.len()];
        canny_edge_rgba(&input, &mut output, w, h, 99.9, 0.0).unwrap();
        // floor(399.6) = 399 < 400
        assert_eq!(pixel(&output, w, 1, 1), WHITE);
        assert_eq!(pixel(&output, w, 1, 2), BLACK);

        canny_edge_rgba(&input, &mut output, w, h, 100.0, 0.0).unwrap();
        // 400 is not > 400
        assert_eq!(pixel(&output, w, 1, 1), BLACK);
    }

    #[test]
    fn test_negative_threshold_marks_flat_interior() {
        let (w, h) = (5, 4);
        let input = image_from_red(w, h, |_, _| 77);
        let mut output = vec![0u8; input.len()];

        canny_edge_rgba(&input, &mut output, w, h, -1.0, 0.0).unwrap();

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                assert_eq!(pixel(&output, w, y, x), WHITE, "y={y} x={x}");
            }
        }
        assert_eq!(pixel(&output, w, 0, 0), BLACK);
    }

    #[test]
    fn test_nan_threshold_marks_nothing() {
        let (w, h) = (6, 5);
        let input = image_from_red(w, h, |_, x| if x < 3 { 0 } else { 255 });

        for norm in [GradientNorm::Manhattan, GradientNorm::Euclidean] {
            let mut output = vec![0u8; input.len()];
            let params = CannyParams::new(f64::NAN, 0.0).with_norm(norm);
            canny_edge_with(&input, &mut output, w, h, &params).unwrap();

            for px in output.chunks_exact(4) {
                assert_eq!(px, &BLACK, "{norm:?}");
            }
        }
    }

    #[test]
    fn test_threshold2_is_ignored() {
        let (w, h) = (8, 8);
        let input = image_from_red(w, h, |y, x| ((x * 31 + y * 17) % 256) as u8);
        let mut a = vec![0u8; input.len()];
        let mut b = vec![0u8; input.len()];

        canny_edge_rgba(&input, &mut a, w, h, 20.0, 0.0).unwrap();
        canny_edge_rgba(&input, &mut b, w, h, 20.0, 1000.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterministic_and_input_untouched() {
        let (w, h) = (7, 6);
        let input = image_from_red(w, h, |y, x| ((x * x + y * 13) % 256) as u8);
        let snapshot = input.clone();
        let mut first = vec![0u8; input.len()];
        let mut second = vec![0u8; input.len()];

        canny_edge_rgba(&input, &mut first, w, h, 15.0, 30.0).unwrap();
        canny_edge_rgba(&input, &mut second, w, h, 15.0, 30.0).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), input.len());
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_euclidean_norm_clamps_and_uses_raw_threshold() {
        let (w, h) = (6, 4);
        let input = image_from_red(w, h, |_, x| if x < 3 { 0 } else { 255 });
        let mut output = vec![0u8; input.len()];
        let params = CannyParams::new(254.0, 0.0).with_norm(GradientNorm::Euclidean);

        canny_edge_with(&input, &mut output, w, h, &params).unwrap();
        // sqrt(1020²) clamps to 255 > 254
        assert_eq!(pixel(&output, w, 1, 2), WHITE);

        let params = CannyParams::new(255.0, 0.0).with_norm(GradientNorm::Euclidean);
        canny_edge_with(&input, &mut output, w, h, &params).unwrap();
        assert_eq!(pixel(&output, w, 1, 2), BLACK);
    }

    #[test]
    fn test_too_small_is_rejected() {
        let input = vec![0u8; 2 * 5 * 4];
        let mut output = vec![9u8; input.len()];
        let err = canny_edge_rgba(&input, &mut output, 2, 5, 10.0, 0.0).unwrap_err();
        assert_eq!(err, FilterError::InvalidDimensions { width: 2, height: 5, min: 3 });
        assert!(output.iter().all(|&v| v == 9));
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let input = vec![0u8; 4 * 4 * 4];
        let mut output = vec![0u8; 4 * 4 * 4 - 1];
        let err = canny_edge_rgba(&input, &mut output, 4, 4, 10.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            FilterError::BufferSizeMismatch { buffer: "output", expected: 64, actual: 63 }
        );
    }

    #[test]
    fn test_default_params() {
        let params = CannyParams::default();
        assert_eq!(params.threshold1, 50.0);
        assert_eq!(params.threshold2, 150.0);
        assert_eq!(params.norm, GradientNorm::Manhattan);
    }
}
