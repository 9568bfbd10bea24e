//! Shared pixel-buffer plumbing for the filters.
//!
//! Callers hand us flat RGBA byte slices plus a width and height. These
//! helpers check the geometry once and wrap the slices as `(height, width, 4)`
//! ndarray views, so the filter bodies can index `[[y, x, c]]` without worrying
//! about bounds.

use ndarray::{ArrayView3, ArrayViewMut3};

use crate::error::{FilterError, FilterResult};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Opaque black, written to border pixels and below-threshold pixels.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Opaque white.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Expected byte length of a `width x height` RGBA buffer.
pub fn rgba_len(width: usize, height: usize) -> FilterResult<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(FilterError::DimensionOverflow { width, height })
}

/// Reject images smaller than `min x min`.
pub fn check_dimensions(width: usize, height: usize, min: usize) -> FilterResult<()> {
    if width < min || height < min {
        return Err(FilterError::InvalidDimensions { width, height, min });
    }
    Ok(())
}

fn check_len(buffer: &'static str, actual: usize, width: usize, height: usize) -> FilterResult<()> {
    let expected = rgba_len(width, height)?;
    if actual != expected {
        return Err(FilterError::BufferSizeMismatch { buffer, expected, actual });
    }
    Ok(())
}

/// View a flat RGBA slice as a `(height, width, 4)` array.
pub fn rgba_view(data: &[u8], width: usize, height: usize) -> FilterResult<ArrayView3<'_, u8>> {
    check_len("input", data.len(), width, height)?;
    ArrayView3::from_shape((height, width, CHANNELS), data).map_err(|_| {
        FilterError::BufferSizeMismatch {
            buffer: "input",
            expected: width * height * CHANNELS,
            actual: data.len(),
        }
    })
}

/// Mutable counterpart of [`rgba_view`] for output buffers.
pub fn rgba_view_mut(
    data: &mut [u8],
    width: usize,
    height: usize,
) -> FilterResult<ArrayViewMut3<'_, u8>> {
    check_len("output", data.len(), width, height)?;
    let actual = data.len();
    ArrayViewMut3::from_shape((height, width, CHANNELS), data).map_err(|_| {
        FilterError::BufferSizeMismatch {
            buffer: "output",
            expected: width * height * CHANNELS,
            actual,
        }
    })
}

/// Write one RGBA pixel.
#[inline]
pub fn put_pixel(output: &mut ArrayViewMut3<u8>, y: usize, x: usize, rgba: [u8; 4]) {
    for (c, &v) in rgba.iter().enumerate() {
        output[[y, x, c]] = v;
    }
}

/// Validate both buffers of a same-size filter, input first.
pub fn rgba_pair<'a, 'b>(
    input: &'a [u8],
    output: &'b mut [u8],
    width: usize,
    height: usize,
) -> FilterResult<(ArrayView3<'a, u8>, ArrayViewMut3<'b, u8>)> {
    let input = rgba_view(input, width, height)?;
    let output = rgba_view_mut(output, width, height)?;
    Ok((input, output))
}
