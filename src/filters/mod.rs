//! Filter modules for camera frames.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Used by |
//! |--------|-------|------|---------|
//! | RGBA8 | (H, W, 4) | u8 | edge, grayscale |
//! | YUV_420_888 | flat bytes | u8 | yuv |
//!
//! RGBA filters take flat byte slices of exactly `width * height * 4` bytes
//! (row-major, no row padding) or the equivalent ndarray views, and write into
//! a caller-provided output of the same size. Nothing is allocated per frame
//! except in the YUV path, which returns a new buffer.

pub mod core;
pub mod edge;
pub mod grayscale;
pub mod yuv;
