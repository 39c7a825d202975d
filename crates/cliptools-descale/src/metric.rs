//! Rescale error between a luma plane and its descale/rescale round trip.
//!
//! Pixels whose absolute difference is at or below [`DIFF_FLOOR`] count as
//! zero so that dithering and rounding noise do not mask a real match. The
//! error is the plane average of what remains.

use cliptools_core::{ClipToolsError, FrameMetric, Result};
use tracing::warn;

/// Per-pixel differences at or below this are ignored.
pub const DIFF_FLOOR: f32 = 0.015;

/// A single-plane float image, row-major, values nominally in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl LumaPlane {
    /// Wrap `data`, checking it holds `width * height` samples.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(ClipToolsError::DimensionMismatch {
                expected: format!("{expected} samples for {width}x{height}"),
                got: format!("{} samples", data.len()),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Plane filled with a constant value.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }
}

/// Thresholded mean absolute difference between `source` and `rescaled`.
pub fn scale_error(source: &LumaPlane, rescaled: &LumaPlane) -> Result<f64> {
    if source.width != rescaled.width || source.height != rescaled.height {
        return Err(ClipToolsError::DimensionMismatch {
            expected: format!("{}x{}", source.width, source.height),
            got: format!("{}x{}", rescaled.width, rescaled.height),
        });
    }
    if source.data.is_empty() {
        return Ok(0.0);
    }

    let total: f64 = source
        .data
        .iter()
        .zip(&rescaled.data)
        .map(|(&x, &y)| {
            let diff = (x - y).abs();
            if diff > DIFF_FLOOR {
                diff as f64
            } else {
                0.0
            }
        })
        .sum();

    Ok(total / source.data.len() as f64)
}

/// Scale error as shown in debug overlays, e.g. `7.00e-06`.
///
/// The exponent is signed and at least two digits wide.
pub fn format_scale_error(error: f64) -> String {
    let formatted = format!("{error:.2e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Source frames paired with their rescaled counterparts for one candidate
/// height.
#[derive(Debug, Clone, Default)]
pub struct RescalePairs {
    pairs: Vec<(LumaPlane, LumaPlane)>,
}

impl RescalePairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next frame's source and rescaled planes.
    pub fn push(&mut self, source: LumaPlane, rescaled: LumaPlane) {
        self.pairs.push((source, rescaled));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FrameMetric for RescalePairs {
    fn frame_metric(&self, n: usize) -> Result<f64> {
        let (source, rescaled) = self.pairs.get(n).ok_or(ClipToolsError::OutOfBounds {
            index: n,
            len: self.pairs.len(),
        })?;
        let error = scale_error(source, rescaled)?;
        if !error.is_finite() {
            warn!(frame = n, error, "Non-finite scale error");
        }
        Ok(error)
    }
}
