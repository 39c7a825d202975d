//! Frame-range replacement between two clips of equal length.
//!
//! Ranges are applied one after another. Every step rebuilds the working
//! clip from the previous step's output, so overlapping or descending ranges
//! chain: a later range slices content an earlier range already patched.

use cliptools_core::{ClipToolsError, FrameSequence, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// A frame or an inclusive run of frames to take from the patch clip.
///
/// Serialized as a bare integer or a two-element array: `12`, `[30, 45]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameRange {
    /// A single frame.
    Single(usize),
    /// Inclusive `start..=end`.
    Span(usize, usize),
}

impl FrameRange {
    /// Closed interval `(start, end)`.
    #[inline]
    pub fn bounds(self) -> (usize, usize) {
        match self {
            Self::Single(frame) => (frame, frame),
            Self::Span(start, end) => (start, end),
        }
    }

    /// Number of frames covered, or `None` for an inverted span.
    pub fn frame_count(self) -> Option<usize> {
        let (start, end) = self.bounds();
        end.checked_sub(start).map(|d| d + 1)
    }

    /// Check the range against a clip of `len` frames.
    pub fn validate(self, len: usize) -> Result<(usize, usize)> {
        let (start, end) = self.bounds();
        if start > end {
            return Err(ClipToolsError::InvalidRange { start, end });
        }
        if end >= len {
            return Err(ClipToolsError::OutOfBounds { index: end, len });
        }
        Ok((start, end))
    }
}

impl From<usize> for FrameRange {
    fn from(frame: usize) -> Self {
        Self::Single(frame)
    }
}

impl From<(usize, usize)> for FrameRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::Span(start, end)
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(frame) => write!(f, "{frame}"),
            Self::Span(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

/// Replace `ranges` of `base` with the same frames from `patch`.
///
/// Both clips must have the same length. An empty range list returns `base`
/// unchanged. Fails on the first inverted or out-of-bounds range.
pub fn replace_ranges<S>(base: S, patch: &S, ranges: &[FrameRange]) -> Result<S>
where
    S: FrameSequence,
{
    if base.len() != patch.len() {
        return Err(ClipToolsError::LengthMismatch {
            base: base.len(),
            patch: patch.len(),
        });
    }

    ranges
        .iter()
        .try_fold(base, |out, &range| replace_range(out, patch, range))
}

/// Apply a single range to the working clip.
pub fn replace_range<S>(out: S, patch: &S, range: FrameRange) -> Result<S>
where
    S: FrameSequence,
{
    let len = out.len();
    let (start, end) = range.validate(len)?;
    trace!(start, end, len, "Replacing frame range");

    let middle = patch.slice(start..end + 1)?;
    let mut spliced = if start == 0 {
        middle
    } else {
        out.slice(0..start)?.concat(middle)
    };
    if end + 1 < len {
        spliced = spliced.concat(out.slice(end + 1..len)?);
    }

    Ok(spliced)
}
