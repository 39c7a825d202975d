//! Seams to the external filter engine.
//!
//! Frame statistics and text burn-in are done by the engine. These traits
//! describe the two calls the helpers make into it.

use serde::{Deserialize, Serialize};

use crate::error::{ClipToolsError, Result};

/// A per-frame scalar statistic, e.g. the plane average of a difference mask.
pub trait FrameMetric {
    /// Statistic for frame `n`.
    fn frame_metric(&self, n: usize) -> Result<f64>;
}

/// Precomputed metrics, one value per frame.
impl FrameMetric for [f64] {
    fn frame_metric(&self, n: usize) -> Result<f64> {
        self.get(n).copied().ok_or(ClipToolsError::OutOfBounds {
            index: n,
            len: self.len(),
        })
    }
}

impl FrameMetric for Vec<f64> {
    fn frame_metric(&self, n: usize) -> Result<f64> {
        self.as_slice().frame_metric(n)
    }
}

/// Text placement, numbered like a numeric keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    BottomLeft = 1,
    Bottom = 2,
    BottomRight = 3,
    Left = 4,
    Center = 5,
    Right = 6,
    #[default]
    TopLeft = 7,
    Top = 8,
    TopRight = 9,
}

/// Burns text into a frame.
pub trait TextOverlay<F> {
    /// Return `frame` with `text` drawn at `alignment`.
    fn overlay_text(&self, frame: F, text: &str, alignment: Alignment) -> F;
}
