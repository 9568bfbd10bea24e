//! YUV frame path.
//!
//! Frames arrive straight from the camera analyzer as YUV_420_888 bytes. No
//! conversion is done yet: the data is handed back unchanged, whatever mode
//! is requested.

use log::debug;

/// Return a copy of `data`, byte for byte.
pub fn process_yuv(data: &[u8], width: usize, height: usize, mode: i32) -> Vec<u8> {
    let result = data.to_vec();
    debug!("YUV processing (passthrough): mode={}, {}x{}", mode, width, height);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuv_passthrough() {
        let data: Vec<u8> = (0..=255).cycle().take(4 * 4 * 3 / 2).collect();
        for mode in [0, 1, 2, 42] {
            let out = process_yuv(&data, 4, 4, mode);
            assert_eq!(out, data);
        }
    }

    #[test]
    fn test_yuv_ignores_dimensions() {
        let data = vec![1, 2, 3];
        assert_eq!(process_yuv(&data, 640, 480, 0), data);
        assert!(process_yuv(&[], 0, 0, 2).is_empty());
    }
}
