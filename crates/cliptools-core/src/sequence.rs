//! Frame sequences addressed purely by position.
//!
//! A clip in the filter engine is an ordered list of frames that can be
//! sliced and joined without ever touching pixel data. `FrameSequence`
//! captures exactly that surface so the editing helpers never depend on a
//! concrete engine.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{ClipToolsError, Result};

/// An ordered, sliceable, concatenable sequence of frames.
///
/// Slices are half-open: `slice(2..5)` yields frames 2, 3 and 4.
pub trait FrameSequence: Sized {
    /// Frame handle returned by [`FrameSequence::frame`].
    type Frame;

    /// Number of frames.
    fn len(&self) -> usize;

    /// True when the sequence holds no frames.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame at zero-based position `index`.
    fn frame(&self, index: usize) -> Result<Self::Frame>;

    /// Contiguous sub-range `[range.start, range.end)`.
    fn slice(&self, range: Range<usize>) -> Result<Self>;

    /// Join `other` onto the end of `self`.
    fn concat(self, other: Self) -> Self;
}

/// Validate a half-open range against a sequence length.
pub fn check_slice(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end {
        return Err(ClipToolsError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    if range.end > len {
        return Err(ClipToolsError::OutOfBounds {
            index: range.end - 1,
            len,
        });
    }
    Ok(())
}

/// In-memory frame sequence backed by a `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameList<F> {
    frames: Vec<F>,
}

impl<F> FrameList<F> {
    /// Wrap a vector of frames.
    pub fn new(frames: Vec<F>) -> Self {
        Self { frames }
    }

    /// Borrow the frames in order.
    pub fn as_slice(&self) -> &[F] {
        &self.frames
    }

    /// Iterate over the frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.frames.iter()
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<F> {
        self.frames
    }

    /// Transform every frame, passing its position along.
    pub fn map_frames<G>(self, mut f: impl FnMut(usize, F) -> G) -> FrameList<G> {
        FrameList {
            frames: self
                .frames
                .into_iter()
                .enumerate()
                .map(|(n, frame)| f(n, frame))
                .collect(),
        }
    }
}

impl<F> From<Vec<F>> for FrameList<F> {
    fn from(frames: Vec<F>) -> Self {
        Self::new(frames)
    }
}

impl<F> FromIterator<F> for FrameList<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<F: Clone> FrameSequence for FrameList<F> {
    type Frame = F;

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> Result<F> {
        self.frames
            .get(index)
            .cloned()
            .ok_or(ClipToolsError::OutOfBounds {
                index,
                len: self.frames.len(),
            })
    }

    fn slice(&self, range: Range<usize>) -> Result<Self> {
        check_slice(&range, self.frames.len())?;
        Ok(Self::new(self.frames[range].to_vec()))
    }

    fn concat(mut self, other: Self) -> Self {
        self.frames.extend(other.frames);
        self
    }
}

impl<F: Clone> FrameSequence for Vec<F> {
    type Frame = F;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn frame(&self, index: usize) -> Result<F> {
        self.get(index).cloned().ok_or(ClipToolsError::OutOfBounds {
            index,
            len: Vec::len(self),
        })
    }

    fn slice(&self, range: Range<usize>) -> Result<Self> {
        check_slice(&range, Vec::len(self))?;
        Ok(self[range].to_vec())
    }

    fn concat(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}
