//! ClipTools Core - Foundation types for frame-pipeline helpers
//!
//! This crate provides the types shared by the other ClipTools crates:
//! - Error taxonomy and `Result` alias
//! - Position-addressed frame sequences (`FrameSequence`, `FrameList`)
//! - Traits for the filter-engine collaborators (`FrameMetric`, `TextOverlay`)

pub mod engine;
pub mod error;
pub mod sequence;

pub use engine::{Alignment, FrameMetric, TextOverlay};
pub use error::{ClipToolsError, Result};
pub use sequence::{check_slice, FrameList, FrameSequence};
