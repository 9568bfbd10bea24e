//! Native frame processing for the camera app.
//!
//! Pixel-buffer filters called from managed code: JNI for the Android app,
//! with optional Python (PyO3) and WASM bindings for desktop tooling and the
//! web viewer.
//!
//! ## Image Format
//! - **RGBA8**: flat `width * height * 4` bytes, row-major, no row padding.
//!   Viewed internally as an ndarray of shape (height, width, 4).
//! - **YUV_420_888**: opaque bytes, passed through untouched.
//!
//! ## Filters
//! - [`filters::edge`]: Sobel edge mask, Manhattan magnitude, one threshold
//! - [`filters::grayscale`]: `(R + G + B) / 3` into every color channel
//! - [`filters::yuv`]: passthrough
//!
//! Every call is stateless and runs to completion on the calling thread.
//! Inputs are validated up front and reported as [`FilterError`].

pub mod bitmap;
pub mod error;
pub mod filters;
pub mod processor;

#[cfg(feature = "jni")]
mod jni_bridge;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, FilterResult};
pub use filters::edge::{canny_edge_rgba, CannyParams, GradientNorm};
pub use filters::grayscale::grayscale_rgba;
pub use filters::yuv::process_yuv;
pub use processor::{process_frame, ProcessingMode, VERSION};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::Array3;
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::error::FilterError;
    use crate::filters::edge::{canny_edge_u8, CannyParams, GradientNorm};
    use crate::filters::grayscale::grayscale_rgba_u8;
    use crate::filters::yuv::process_yuv as process_yuv_impl;
    use crate::processor::VERSION;

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Sobel edge mask of an RGBA u8 image of shape (height, width, 4).
    ///
    /// Set `euclidean=True` to use `sqrt(gx² + gy²)` against the raw threshold
    /// instead of the default `|gx| + |gy|` against `threshold1 * 4`.
    #[pyfunction]
    #[pyo3(signature = (image, threshold1=50.0, threshold2=150.0, euclidean=false))]
    pub fn canny_edge<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold1: f64,
        threshold2: f64,
        euclidean: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let norm = if euclidean { GradientNorm::Euclidean } else { GradientNorm::Manhattan };
        let params = CannyParams::new(threshold1, threshold2).with_norm(norm);

        let mut output = Array3::<u8>::zeros(input.raw_dim());
        canny_edge_u8(input, output.view_mut(), &params)?;
        Ok(output.into_pyarray(py))
    }

    /// Average grayscale of an RGBA u8 image; alpha becomes 255.
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let mut output = Array3::<u8>::zeros(input.raw_dim());
        grayscale_rgba_u8(input, output.view_mut())?;
        Ok(output.into_pyarray(py))
    }

    /// YUV passthrough.
    #[pyfunction]
    #[pyo3(signature = (data, width, height, mode=0))]
    pub fn process_yuv<'py>(
        py: Python<'py>,
        data: &[u8],
        width: usize,
        height: usize,
        mode: i32,
    ) -> Bound<'py, PyBytes> {
        PyBytes::new(py, &process_yuv_impl(data, width, height, mode))
    }

    #[pyfunction]
    pub fn version() -> &'static str {
        VERSION
    }

    #[pymodule]
    pub fn native_processor(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(canny_edge, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(process_yuv, m)?)?;
        m.add_function(wrap_pyfunction!(version, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::native_processor;
