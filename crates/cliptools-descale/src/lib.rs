//! ClipTools Descale - native resolution detection
//!
//! Decides, frame by frame, whether a source was upscaled from a lower
//! native height and which one:
//! - Kernels and width derivation
//! - Thresholded rescale error
//! - Minimum-error candidate selection and resize planning
//!
//! Descaling, rescaling and plane statistics run in the filter engine; this
//! crate consumes their results through `FrameMetric`.

pub mod config;
pub mod kernel;
pub mod metric;
pub mod select;

pub use config::{DescaleConfig, DEFAULT_THRESHOLD};
pub use kernel::{width_for_height, Kernel, DEFAULT_ASPECT};
pub use metric::{format_scale_error, scale_error, LumaPlane, RescalePairs, DIFF_FLOOR};
pub use select::{
    annotate_candidate_errors, annotate_decisions, candidate_errors, evaluate, plan_resize,
    select_min_error, DescaleChoice, DescaleSummary, FrameDecision, ResizePlan,
};
