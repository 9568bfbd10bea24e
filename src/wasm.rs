//! WebAssembly exports for the frame filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen so the web
//! viewer can run the same filters as the phone. Buffers are flat RGBA bytes
//! (length = width * height * 4); invalid input is thrown as a JS error.

use wasm_bindgen::prelude::*;

use crate::error::FilterError;
use crate::filters::edge::canny_edge_rgba;
use crate::filters::grayscale::grayscale_rgba;
use crate::filters::yuv::process_yuv;
use crate::processor::VERSION;

fn to_js(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Sobel edge mask of an RGBA frame.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels, at least 3
/// * `height` - Image height in pixels, at least 3
/// * `threshold1` - Magnitude cutoff
/// * `threshold2` - Ignored
///
/// # Returns
/// Flat array of RGBA bytes, opaque white on edges, opaque black elsewhere
#[wasm_bindgen]
pub fn canny_edge_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold1: f64,
    threshold2: f64,
) -> Result<Vec<u8>, JsValue> {
    let mut output = vec![0u8; data.len()];
    canny_edge_rgba(data, &mut output, width, height, threshold1, threshold2).map_err(to_js)?;
    Ok(output)
}

/// Average grayscale of an RGBA frame.
#[wasm_bindgen]
pub fn grayscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let mut output = vec![0u8; data.len()];
    grayscale_rgba(data, &mut output, width, height).map_err(to_js)?;
    Ok(output)
}

/// YUV passthrough.
#[wasm_bindgen]
pub fn process_yuv_wasm(data: &[u8], width: usize, height: usize, mode: i32) -> Vec<u8> {
    process_yuv(data, width, height, mode)
}

#[wasm_bindgen]
pub fn version_wasm() -> String {
    VERSION.to_string()
}
