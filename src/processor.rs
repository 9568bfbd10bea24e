//! Processing modes and the per-frame dispatcher.

use std::fmt;

use log::debug;

use crate::error::{FilterError, FilterResult};
use crate::filters::core::rgba_pair;
use crate::filters::edge::{canny_edge_with, CannyParams};
use crate::filters::grayscale::grayscale_rgba;

/// Reported to the app in place of a library version.
pub const VERSION: &str = "Custom Image Processing v1.0";

/// What to do with a camera frame.
///
/// Integer values match the `ProcessingMode` enum on the Kotlin side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ProcessingMode {
    #[default]
    Raw = 0,
    Grayscale = 1,
    CannyEdge = 2,
}

impl ProcessingMode {
    pub const ALL: [ProcessingMode; 3] = [Self::Raw, Self::Grayscale, Self::CannyEdge];

    /// Next mode in the preview toggle cycle: raw, grayscale, edges, raw.
    pub fn next(self) -> Self {
        match self {
            Self::Raw => Self::Grayscale,
            Self::Grayscale => Self::CannyEdge,
            Self::CannyEdge => Self::Raw,
        }
    }

    /// Label sent alongside frames to the web viewer.
    pub fn label(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Grayscale => "GRAYSCALE",
            Self::CannyEdge => "EDGE_DETECTION",
        }
    }
}

impl TryFrom<i32> for ProcessingMode {
    type Error = FilterError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Raw),
            1 => Ok(Self::Grayscale),
            2 => Ok(Self::CannyEdge),
            other => Err(FilterError::UnknownMode(other)),
        }
    }
}

impl From<ProcessingMode> for i32 {
    fn from(mode: ProcessingMode) -> Self {
        mode as i32
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Run the filter selected by `mode` from `input` into `output`.
///
/// `params` is only read in [`ProcessingMode::CannyEdge`].
pub fn process_frame(
    mode: ProcessingMode,
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
    params: &CannyParams,
) -> FilterResult<()> {
    debug!("process_frame: mode={}, {}x{}", mode, width, height);
    match mode {
        ProcessingMode::Raw => {
            let (input, mut output) = rgba_pair(input, output, width, height)?;
            output.assign(&input);
            Ok(())
        }
        ProcessingMode::Grayscale => grayscale_rgba(input, output, width, height),
        ProcessingMode::CannyEdge => canny_edge_with(input, output, width, height, params),
    }
}
