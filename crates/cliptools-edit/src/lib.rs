//! ClipTools Edit - frame-position editing helpers
//!
//! Implements the position-only helpers used while filtering a source:
//! - Bookmark files and frames-since-bookmark lookup
//! - Frame-range replacement between two clips
//! - Versioned range files

pub mod bookmarks;
pub mod serialization;
pub mod splice;

pub use bookmarks::{
    annotate_frames_since_bookmark, frames_since_bookmark, load_bookmarks, parse_bookmarks,
    save_bookmarks, Bookmarks,
};
pub use serialization::RangeFile;
pub use splice::{replace_range, replace_ranges, FrameRange};
