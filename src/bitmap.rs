//! Scoped access to platform bitmaps.
//!
//! A platform bitmap hands out its pixels only between a successful lock and
//! the matching unlock. [`PixelLock`] ties that window to a Rust scope: the
//! unlock runs in `Drop`, so it happens exactly once on every exit path,
//! including early returns with `?`.

use crate::error::{FilterError, FilterResult};
use crate::filters::core::CHANNELS;

/// Pixel layout reported by a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8888,
    Rgb565,
    /// Platform format name
    Other(String),
}

/// Geometry of a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: usize,
    pub height: usize,
    /// Bytes per row
    pub stride: usize,
    pub format: PixelFormat,
}

impl BitmapInfo {
    /// Tightly packed RGBA bitmap.
    pub fn rgba(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            stride: width * CHANNELS,
            format: PixelFormat::Rgba8888,
        }
    }

    /// Check that the filters can address this bitmap as a flat RGBA buffer.
    pub fn ensure_packed_rgba(&self) -> FilterResult<()> {
        if self.format != PixelFormat::Rgba8888 {
            return Err(FilterError::UnsupportedFormat(format!("{:?}", self.format)));
        }
        if self.stride != self.width * CHANNELS {
            return Err(FilterError::UnsupportedFormat(format!(
                "row stride {} for width {}",
                self.stride, self.width
            )));
        }
        Ok(())
    }

    /// Byte length of the pixel data, row padding included.
    pub fn byte_len(&self) -> FilterResult<usize> {
        self.stride
            .checked_mul(self.height)
            .ok_or(FilterError::DimensionOverflow {
                width: self.width,
                height: self.height,
            })
    }
}

/// A bitmap whose pixels must be locked before use.
pub trait LockablePixels {
    fn info(&self) -> FilterResult<BitmapInfo>;

    /// Pin the pixels in memory.
    fn lock(&mut self) -> FilterResult<()>;

    /// Release a previous successful [`lock`](Self::lock).
    fn unlock(&mut self);

    /// Pixel bytes. Only called while locked.
    fn pixels(&self) -> &[u8];

    /// Mutable pixel bytes. Only called while locked.
    fn pixels_mut(&mut self) -> &mut [u8];
}

/// Locked bitmap; unlocks on drop.
pub struct PixelLock<'a, B: LockablePixels + ?Sized> {
    bitmap: &'a mut B,
    info: BitmapInfo,
}

impl<'a, B: LockablePixels + ?Sized> PixelLock<'a, B> {
    /// Read the bitmap info, then lock.
    pub fn acquire(bitmap: &'a mut B) -> FilterResult<Self> {
        let info = bitmap.info()?;
        bitmap.lock()?;
        Ok(Self { bitmap, info })
    }

    pub fn info(&self) -> &BitmapInfo {
        &self.info
    }

    pub fn pixels(&self) -> &[u8] {
        self.bitmap.pixels()
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.bitmap.pixels_mut()
    }
}

impl<B: LockablePixels + ?Sized> Drop for PixelLock<'_, B> {
    fn drop(&mut self) {
        self.bitmap.unlock();
    }
}

/// Lock `input` then `output` and run `f` on their pixels.
///
/// If locking `output` fails, `input` is unlocked before the error returns.
/// Both are unlocked after `f`, whatever it returns.
pub fn with_locked_pair<I, O, T>(
    input: &mut I,
    output: &mut O,
    f: impl FnOnce(&[u8], &mut [u8], BitmapInfo) -> FilterResult<T>,
) -> FilterResult<T>
where
    I: LockablePixels + ?Sized,
    O: LockablePixels + ?Sized,
{
    let src = PixelLock::acquire(input)?;
    let mut dst = PixelLock::acquire(output)?;

    let info = src.info().clone();
    info.ensure_packed_rgba()?;
    dst.info().ensure_packed_rgba()?;
    if (dst.info().width, dst.info().height) != (info.width, info.height) {
        return Err(FilterError::BufferSizeMismatch {
            buffer: "output",
            expected: info.byte_len()?,
            actual: dst.info().byte_len()?,
        });
    }

    f(src.pixels(), dst.pixels_mut(), info)
}
