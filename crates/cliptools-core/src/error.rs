//! Error types for ClipTools.

use thiserror::Error;

/// Main error type for ClipTools operations.
///
/// Contract violations (empty bookmark lists, inverted or out-of-range frame
/// spans, mismatched clip lengths) and malformed input both end up here.
/// Nothing in the workspace retries or recovers from these.
#[derive(Error, Debug)]
pub enum ClipToolsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: token {index} ({token:?}) is not a frame number")]
    Parse { index: usize, token: String },

    #[error("Bookmark list is empty")]
    EmptyBookmarks,

    #[error("Bookmarks must be strictly increasing: {previous} followed by {next}")]
    UnsortedBookmarks { previous: u64, next: u64 },

    #[error("Frame {frame} precedes the first bookmark {first}")]
    FrameBeforeFirstBookmark { frame: u64, first: u64 },

    #[error("Invalid frame range: start {start} is after end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Frame {index} is out of bounds for a clip of {len} frames")]
    OutOfBounds { index: usize, len: usize },

    #[error("Clip length mismatch: base has {base} frames, patch has {patch}")]
    LengthMismatch { base: usize, patch: usize },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for ClipTools operations.
pub type Result<T> = std::result::Result<T, ClipToolsError>;
