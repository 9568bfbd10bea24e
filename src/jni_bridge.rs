//! JNI exports for `max.ohm.assignment.jni.NativeProcessor`.
//!
//! Every export validates its input before touching pixels. Failures are
//! logged and rethrown on the Java side: `IllegalArgumentException` for bad
//! dimensions, buffer sizes or modes, `IllegalStateException` when a bitmap
//! cannot be read or locked. Nothing is processed in either case.
//!
//! The bitmap exports go through the `ndk` crate's `libjnigraphics` wrapper
//! and are only built for Android.
//! `processYUVFrame` works anywhere.

use jni::objects::{JByteArray, JObject};
use jni::sys::{jboolean, jbyteArray, jint, jstring, JNI_TRUE};
use jni::JNIEnv;
use log::{debug, error};

use crate::error::FilterError;
use crate::filters::yuv::process_yuv;
use crate::processor::VERSION;

const ILLEGAL_ARGUMENT: &str = "java/lang/IllegalArgumentException";
const ILLEGAL_STATE: &str = "java/lang/IllegalStateException";

/// Log `err` and raise it as a Java exception.
fn throw(env: &mut JNIEnv, context: &str, err: &FilterError) {
    error!("{}: {}", context, err);
    let class = match err {
        FilterError::BitmapAccess(_) => ILLEGAL_STATE,
        _ => ILLEGAL_ARGUMENT,
    };
    if let Err(e) = env.throw_new(class, format!("{context}: {err}")) {
        error!("failed to raise {}: {}", class, e);
    }
}

#[no_mangle]
pub extern "system" fn Java_max_ohm_assignment_jni_NativeProcessor_initNative(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    debug!("Native library initialized");
    JNI_TRUE
}

#[no_mangle]
pub extern "system" fn Java_max_ohm_assignment_jni_NativeProcessor_processYUVFrame<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    yuv_data: JByteArray<'local>,
    width: jint,
    height: jint,
    processing_mode: jint,
) -> jbyteArray {
    let data = match env.convert_byte_array(&yuv_data) {
        Ok(data) => data,
        Err(e) => {
            throw(&mut env, "processYUVFrame", &FilterError::BitmapAccess(e.to_string()));
            return std::ptr::null_mut();
        }
    };

    let processed = process_yuv(
        &data,
        width.max(0) as usize,
        height.max(0) as usize,
        processing_mode,
    );

    match env.byte_array_from_slice(&processed) {
        Ok(array) => array.into_raw(),
        Err(e) => {
            throw(&mut env, "processYUVFrame", &FilterError::BitmapAccess(e.to_string()));
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_max_ohm_assignment_jni_NativeProcessor_getOpenCVVersion(
    env: JNIEnv,
    _this: JObject,
) -> jstring {
    match env.new_string(VERSION) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            error!("getOpenCVVersion: {}", e);
            std::ptr::null_mut()
        }
    }
}

#[cfg(target_os = "android")]
mod android {
    use jni::objects::JObject;
    use jni::sys::jdouble;
    use jni::JNIEnv;
    use ndk::bitmap::{Bitmap, BitmapFormat};

    use super::throw;
    use crate::bitmap::{with_locked_pair, BitmapInfo, LockablePixels, PixelFormat};
    use crate::error::{FilterError, FilterResult};
    use crate::filters::edge::canny_edge_rgba;
    use crate::filters::grayscale::grayscale_rgba;

    /// `android.graphics.Bitmap` plus the pixel window of the current lock.
    struct AndroidBitmap {
        bitmap: Bitmap,
        pixels: *mut u8,
        len: usize,
    }

    impl AndroidBitmap {
        fn new(env: &JNIEnv, bitmap: &JObject) -> Self {
            // SAFETY: env and bitmap are the live local references passed to
            // the current JNI call and outlive this wrapper.
            let bitmap = unsafe { Bitmap::from_jni(env.get_raw(), bitmap.as_raw()) };
            Self {
                bitmap,
                pixels: std::ptr::null_mut(),
                len: 0,
            }
        }
    }

    impl LockablePixels for AndroidBitmap {
        fn info(&self) -> FilterResult<BitmapInfo> {
            let raw = self
                .bitmap
                .info()
                .map_err(|e| FilterError::BitmapAccess(format!("getInfo: {e:?}")))?;
            let format = match raw.format() {
                BitmapFormat::RGBA_8888 => PixelFormat::Rgba8888,
                BitmapFormat::RGB_565 => PixelFormat::Rgb565,
                other => PixelFormat::Other(format!("{other:?}")),
            };
            Ok(BitmapInfo {
                width: raw.width() as usize,
                height: raw.height() as usize,
                stride: raw.stride() as usize,
                format,
            })
        }

        fn lock(&mut self) -> FilterResult<()> {
            let len = self.info()?.byte_len()?;
            let addr = self
                .bitmap
                .lock_pixels()
                .map_err(|e| FilterError::BitmapAccess(format!("lockPixels: {e:?}")))?;
            if addr.is_null() {
                // Locked but unusable; release before reporting.
                let _ = self.bitmap.unlock_pixels();
                return Err(FilterError::BitmapAccess("lockPixels returned null".into()));
            }
            self.pixels = addr.cast();
            self.len = len;
            Ok(())
        }

        fn unlock(&mut self) {
            if let Err(e) = self.bitmap.unlock_pixels() {
                log::error!("unlockPixels: {:?}", e);
            }
            self.pixels = std::ptr::null_mut();
            self.len = 0;
        }

        fn pixels(&self) -> &[u8] {
            // SAFETY: the bitmap is locked, so `pixels` points at `len` bytes
            // that stay put until unlock.
            unsafe { std::slice::from_raw_parts(self.pixels, self.len) }
        }

        fn pixels_mut(&mut self) -> &mut [u8] {
            // SAFETY: as above; input and output are distinct bitmaps.
            unsafe { std::slice::from_raw_parts_mut(self.pixels, self.len) }
        }
    }

    #[no_mangle]
    pub extern "system" fn Java_max_ohm_assignment_jni_NativeProcessor_processFrameCanny(
        mut env: JNIEnv,
        _this: JObject,
        input_bitmap: JObject,
        output_bitmap: JObject,
        threshold1: jdouble,
        threshold2: jdouble,
    ) {
        let mut input = AndroidBitmap::new(&env, &input_bitmap);
        let mut output = AndroidBitmap::new(&env, &output_bitmap);

        let result = with_locked_pair(&mut input, &mut output, |src, dst, info| {
            canny_edge_rgba(src, dst, info.width, info.height, threshold1, threshold2)
        });
        if let Err(err) = result {
            throw(&mut env, "processFrameCanny", &err);
        }
    }

    #[no_mangle]
    pub extern "system" fn Java_max_ohm_assignment_jni_NativeProcessor_processFrameGrayscale(
        mut env: JNIEnv,
        _this: JObject,
        input_bitmap: JObject,
        output_bitmap: JObject,
    ) {
        let mut input = AndroidBitmap::new(&env, &input_bitmap);
        let mut output = AndroidBitmap::new(&env, &output_bitmap);

        let result = with_locked_pair(&mut input, &mut output, |src, dst, info| {
            grayscale_rgba(src, dst, info.width, info.height)
        });
        if let Err(err) = result {
            throw(&mut env, "processFrameGrayscale", &err);
        }
    }
}
