//! Resampling kernels and output geometry.

use cliptools_core::{ClipToolsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default display aspect ratio used to derive widths from heights.
pub const DEFAULT_ASPECT: f64 = 16.0 / 9.0;

/// A resampling kernel and its parameters.
///
/// The same kernel is used for the descale and for the rescale that the
/// error is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Kernel {
    Bilinear,
    Spline16,
    Spline36,
    /// Mitchell-Netravali family; `b = c = 1/3` is Mitchell.
    Bicubic { b: f64, c: f64 },
    Lanczos { taps: u32 },
}

impl Kernel {
    /// Resolve a kernel by its lowercase name.
    ///
    /// `b` and `c` only apply to bicubic, `taps` only to lanczos.
    pub fn from_name(name: &str, b: f64, c: f64, taps: u32) -> Result<Self> {
        match name {
            "bilinear" => Ok(Self::Bilinear),
            "spline16" => Ok(Self::Spline16),
            "spline36" => Ok(Self::Spline36),
            "bicubic" => Ok(Self::Bicubic { b, c }),
            "lanczos" => {
                if taps == 0 {
                    return Err(ClipToolsError::InvalidParameter(
                        "lanczos needs at least one tap".to_string(),
                    ));
                }
                Ok(Self::Lanczos { taps })
            }
            other => Err(ClipToolsError::InvalidParameter(format!(
                "unknown kernel: {other}"
            ))),
        }
    }

    /// Lowercase kernel name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bilinear => "bilinear",
            Self::Spline16 => "spline16",
            Self::Spline36 => "spline36",
            Self::Bicubic { .. } => "bicubic",
            Self::Lanczos { .. } => "lanczos",
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::Bicubic {
            b: 1.0 / 3.0,
            c: 1.0 / 3.0,
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bicubic { b, c } => write!(f, "bicubic (b={b:.3}, c={c:.3})"),
            Self::Lanczos { taps } => write!(f, "lanczos ({taps} taps)"),
            other => f.write_str(other.name()),
        }
    }
}

/// Width matching `height` at `aspect`, rounded to the nearest even number.
#[inline]
pub fn width_for_height(height: u32, aspect: f64) -> u32 {
    ((height as f64 * aspect / 2.0).round() as u32) * 2
}
