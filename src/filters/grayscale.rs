//! Grayscale conversion filter.
//!
//! Plain channel average, `(R + G + B) / 3` with integer division, written to
//! all three color channels. Alpha is forced to opaque. This is what the
//! camera preview has always shown; it is not a luminance conversion.

use log::debug;
use ndarray::{ArrayView3, ArrayViewMut3};

use crate::error::{FilterError, FilterResult};
use crate::filters::core::{check_dimensions, put_pixel, rgba_pair, CHANNELS};

/// Average of the three color channels.
#[inline]
pub fn average_gray(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}

/// Convert an RGBA view to averaged grayscale.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `output` - Destination of the same shape
pub fn grayscale_rgba_u8(input: ArrayView3<u8>, mut output: ArrayViewMut3<u8>) -> FilterResult<()> {
    let (height, width, channels) = input.dim();
    if channels != CHANNELS {
        return Err(FilterError::UnsupportedFormat(format!(
            "expected {CHANNELS} channels, got {channels}"
        )));
    }
    if output.dim() != input.dim() {
        let (oh, ow, oc) = output.dim();
        return Err(FilterError::BufferSizeMismatch {
            buffer: "output",
            expected: height * width * channels,
            actual: oh * ow * oc,
        });
    }

    for y in 0..height {
        for x in 0..width {
            let gray = average_gray(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            put_pixel(&mut output, y, x, [gray, gray, gray, 255]);
        }
    }

    debug!("Grayscale processed: {}x{}", width, height);
    Ok(())
}

/// Grayscale over flat RGBA byte buffers of `width * height * 4` bytes.
pub fn grayscale_rgba(input: &[u8], output: &mut [u8], width: usize, height: usize) -> FilterResult<()> {
    check_dimensions(width, height, 1)?;
    let (input, output) = rgba_pair(input, output, width, height)?;
    grayscale_rgba_u8(input, output)
}
