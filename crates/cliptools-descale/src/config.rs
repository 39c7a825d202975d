//! Descale detection settings.

use cliptools_core::{ClipToolsError, Result};
use serde::{Deserialize, Serialize};

use crate::kernel::{Kernel, DEFAULT_ASPECT};

/// Errors below this pick the descaled frame over the source.
pub const DEFAULT_THRESHOLD: f64 = 7e-6;

/// Configuration for descale detection.
///
/// Kernel parameters are kept flat (`kernel`, `b`, `c`, `taps`) so a config
/// file only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescaleConfig {
    /// Candidate native heights, in the order their errors are supplied.
    pub heights: Vec<u32>,
    /// Output height; `None` keeps the source height.
    pub target_height: Option<u32>,
    /// Kernel name (default: "bicubic").
    pub kernel: String,
    /// Bicubic `b` (default: 1/3).
    pub b: f64,
    /// Bicubic `c` (default: 1/3).
    pub c: f64,
    /// Lanczos taps (default: 5).
    pub taps: u32,
    /// Maximum error accepted for a descale (default: 7e-6).
    pub threshold: f64,
    /// Display aspect ratio for width derivation (default: 16/9).
    pub aspect: f64,
    /// Protect detail the kernel can't reproduce with a mask.
    pub mask_detail: bool,
    /// Burn heights and errors into the output.
    pub debug: bool,
}

impl Default for DescaleConfig {
    fn default() -> Self {
        Self {
            heights: Vec::new(),
            target_height: None,
            kernel: "bicubic".to_string(),
            b: 1.0 / 3.0,
            c: 1.0 / 3.0,
            taps: 5,
            threshold: DEFAULT_THRESHOLD,
            aspect: DEFAULT_ASPECT,
            mask_detail: false,
            debug: false,
        }
    }
}

impl DescaleConfig {
    /// Resolve the configured kernel.
    pub fn resolve_kernel(&self) -> Result<Kernel> {
        Kernel::from_name(&self.kernel, self.b, self.c, self.taps)
    }

    /// Check that the settings describe a runnable detection pass.
    pub fn validate(&self) -> Result<()> {
        if self.heights.is_empty() {
            return Err(ClipToolsError::InvalidParameter(
                "at least one candidate height is required".to_string(),
            ));
        }
        if let Some(&h) = self.heights.iter().find(|&&h| h == 0) {
            return Err(ClipToolsError::InvalidParameter(format!(
                "candidate height must be positive, got {h}"
            )));
        }
        if self.target_height == Some(0) {
            return Err(ClipToolsError::InvalidParameter(
                "target height must be positive".to_string(),
            ));
        }
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(ClipToolsError::InvalidParameter(format!(
                "threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        if self.aspect.is_nan() || self.aspect <= 0.0 {
            return Err(ClipToolsError::InvalidParameter(format!(
                "aspect ratio must be positive, got {}",
                self.aspect
            )));
        }
        self.resolve_kernel()?;
        Ok(())
    }

    /// Deserialize from JSON bytes. Missing fields take their defaults.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| {
            ClipToolsError::Serialization(format!("Failed to parse descale config: {}", e))
        })
    }

    /// Load from a file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}
