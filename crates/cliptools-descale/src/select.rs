//! Per-frame choice between descaled candidates and the source.
//!
//! For every frame the candidate height with the lowest rescale error wins,
//! but only if that error is below the configured threshold. Frames that no
//! candidate explains well are kept at source resolution.

use std::collections::BTreeMap;

use cliptools_core::{Alignment, ClipToolsError, FrameList, FrameMetric, Result, TextOverlay};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DescaleConfig;
use crate::kernel::width_for_height;
use crate::metric::format_scale_error;

/// Outcome of the candidate comparison for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DescaleChoice {
    /// Descale to `height`; its error was under the threshold.
    Descaled { height: u32, error: f64 },
    /// Keep the source frame. `best_height` had the lowest error.
    Source { best_height: u32, error: f64 },
}

impl DescaleChoice {
    /// Height the frame is taken at, or `None` for the source.
    pub fn descaled_height(self) -> Option<u32> {
        match self {
            Self::Descaled { height, .. } => Some(height),
            Self::Source { .. } => None,
        }
    }

    /// Lowest error among the candidates.
    pub fn error(self) -> f64 {
        match self {
            Self::Descaled { error, .. } | Self::Source { error, .. } => error,
        }
    }

    /// Debug labels for this frame.
    ///
    /// A kept source frame is labelled with `output_height`, the height it
    /// leaves the pipeline at.
    pub fn labels(self, output_height: u32) -> Vec<(String, Alignment)> {
        match self {
            Self::Descaled { height, .. } => vec![(height.to_string(), Alignment::TopRight)],
            Self::Source { best_height, error } => vec![
                (output_height.to_string(), Alignment::TopRight),
                (
                    format!("{},{}", best_height, format_scale_error(error)),
                    Alignment::TopLeft,
                ),
            ],
        }
    }
}

/// Pick the first minimum of `errors` and compare it to `threshold`.
///
/// `errors[i]` belongs to `heights[i]`.
pub fn select_min_error(errors: &[f64], heights: &[u32], threshold: f64) -> Result<DescaleChoice> {
    if errors.len() != heights.len() {
        return Err(ClipToolsError::DimensionMismatch {
            expected: format!("{} errors", heights.len()),
            got: format!("{} errors", errors.len()),
        });
    }

    let (index, &error) = errors
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .ok_or_else(|| {
            ClipToolsError::InvalidParameter("no descale candidates".to_string())
        })?;
    let height = heights[index];

    if error < threshold {
        Ok(DescaleChoice::Descaled { height, error })
    } else {
        Ok(DescaleChoice::Source {
            best_height: height,
            error,
        })
    }
}

/// How a chosen frame reaches the output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizePlan {
    /// Double the frame with a 2x upscaler before the final resize.
    pub double_first: bool,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
}

/// Plan the resize of a `frame_height` frame to `target_height`.
pub fn plan_resize(frame_height: u32, target_height: u32, aspect: f64) -> ResizePlan {
    ResizePlan {
        double_first: frame_height < target_height,
        width: width_for_height(target_height, aspect),
        height: target_height,
    }
}

/// Everything decided for one output frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameDecision {
    pub frame: usize,
    pub choice: DescaleChoice,
    /// Height of the frame as it leaves the pipeline.
    pub output_height: u32,
    /// `None` when the source frame passes through untouched.
    pub resize: Option<ResizePlan>,
    /// Merge source detail back over the descale.
    pub mask_detail: bool,
}

/// Run the selection over `frame_count` frames.
///
/// `candidates[i]` yields the per-frame rescale error for
/// `config.heights[i]`.
pub fn evaluate<M>(
    candidates: &[M],
    frame_count: usize,
    source_height: u32,
    config: &DescaleConfig,
) -> Result<Vec<FrameDecision>>
where
    M: FrameMetric,
{
    config.validate()?;
    if candidates.len() != config.heights.len() {
        return Err(ClipToolsError::DimensionMismatch {
            expected: format!("{} candidates", config.heights.len()),
            got: format!("{} candidates", candidates.len()),
        });
    }

    let output_height = config.target_height.unwrap_or(source_height);
    let mut errors = Vec::with_capacity(candidates.len());
    let mut decisions = Vec::with_capacity(frame_count);

    for frame in 0..frame_count {
        errors.clear();
        for candidate in candidates {
            errors.push(candidate.frame_metric(frame)?);
        }

        let choice = select_min_error(&errors, &config.heights, config.threshold)?;
        let resize = match (choice.descaled_height(), config.target_height) {
            (Some(height), _) => Some(plan_resize(height, output_height, config.aspect)),
            (None, Some(target)) => Some(plan_resize(source_height, target, config.aspect)),
            (None, None) => None,
        };
        debug!(frame, choice = ?choice, "Descale selection");

        decisions.push(FrameDecision {
            frame,
            choice,
            output_height,
            resize,
            mask_detail: config.mask_detail && choice.descaled_height().is_some(),
        });
    }

    Ok(decisions)
}

/// Burn the debug labels of `decisions` into `clip`.
pub fn annotate_decisions<F, O>(
    clip: FrameList<F>,
    decisions: &[FrameDecision],
    overlay: &O,
) -> Result<FrameList<F>>
where
    O: TextOverlay<F>,
{
    if clip.as_slice().len() != decisions.len() {
        return Err(ClipToolsError::LengthMismatch {
            base: clip.as_slice().len(),
            patch: decisions.len(),
        });
    }

    Ok(clip.map_frames(|n, frame| {
        let decision = &decisions[n];
        decision
            .choice
            .labels(decision.output_height)
            .iter()
            .fold(frame, |frame, (text, alignment)| {
                overlay.overlay_text(frame, text, *alignment)
            })
    }))
}

/// Scale error of every frame of one candidate, in frame order.
pub fn candidate_errors<M>(metric: &M, frame_count: usize) -> Result<Vec<f64>>
where
    M: FrameMetric + ?Sized,
{
    (0..frame_count).map(|n| metric.frame_metric(n)).collect()
}

/// Burn each frame's scale error into a candidate clip.
pub fn annotate_candidate_errors<F, M, O>(
    clip: FrameList<F>,
    metric: &M,
    overlay: &O,
) -> Result<FrameList<F>>
where
    M: FrameMetric + ?Sized,
    O: TextOverlay<F>,
{
    let errors = candidate_errors(metric, clip.as_slice().len())?;
    Ok(clip.map_frames(|n, frame| {
        overlay.overlay_text(frame, &format_scale_error(errors[n]), Alignment::TopLeft)
    }))
}

/// Frame counts per chosen height across a clip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescaleSummary {
    /// Descaled frames per height.
    pub per_height: BTreeMap<u32, usize>,
    /// Frames kept at source resolution.
    pub source_frames: usize,
}

impl DescaleSummary {
    pub fn from_decisions(decisions: &[FrameDecision]) -> Self {
        let mut summary = Self::default();
        for decision in decisions {
            match decision.choice.descaled_height() {
                Some(height) => *summary.per_height.entry(height).or_default() += 1,
                None => summary.source_frames += 1,
            }
        }
        summary
    }

    /// Height chosen most often; ties go to the lower height.
    pub fn dominant_height(&self) -> Option<u32> {
        self.per_height
            .iter()
            .fold(None, |best: Option<(u32, usize)>, (&height, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((height, count)),
            })
            .map(|(height, _)| height)
    }

    /// Total frames summarized.
    pub fn total_frames(&self) -> usize {
        self.source_frames + self.per_height.values().sum::<usize>()
    }
}
