//! Bridge between the library crates and the command line.
//!
//! Each command returns its report as lines of text; `main` only prints.

use std::path::Path;

use anyhow::{bail, Context, Result};
use cliptools_core::FrameList;
use cliptools_descale::{
    candidate_errors, evaluate, format_scale_error, DescaleChoice, DescaleConfig,
    DescaleSummary,
};
use cliptools_edit::{load_bookmarks, replace_ranges, RangeFile};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which clip a frame of a splice result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Base,
    Patch,
}

/// Per-candidate scale errors measured by the engine for one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorTable {
    /// Height of the source clip.
    pub source_height: u32,
    /// Candidate heights, one per row of `errors`.
    pub heights: Vec<u32>,
    /// `errors[i][n]` is the scale error of frame `n` at `heights[i]`.
    pub errors: Vec<Vec<f64>>,
}

impl ErrorTable {
    fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("reading error table {}", path.display()))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("parsing error table {}", path.display()))
    }

    /// Number of frames covered by every candidate.
    pub fn frame_count(&self) -> Result<usize> {
        let Some(first) = self.errors.first() else {
            bail!("error table has no candidates");
        };
        if let Some(row) = self.errors.iter().position(|r| r.len() != first.len()) {
            bail!(
                "candidate {} has {} frames, expected {}",
                row,
                self.errors[row].len(),
                first.len()
            );
        }
        Ok(first.len())
    }
}

/// `since <bookmarks> <frame>...`
pub fn since(bookmarks_path: &Path, frames: &[u64]) -> Result<Vec<String>> {
    let bookmarks = load_bookmarks(bookmarks_path)
        .with_context(|| format!("loading bookmarks from {}", bookmarks_path.display()))?;
    info!(count = bookmarks.len(), "Bookmarks loaded");

    Ok(frames
        .iter()
        .map(|&n| format!("{n}\t{}", bookmarks.frames_since(n)))
        .collect())
}

/// Splice a clip of `length` frames with the ranges in `ranges_path`, and
/// report which clip each run of output frames comes from.
pub fn splice(length: usize, ranges_path: &Path) -> Result<Vec<String>> {
    let file = RangeFile::load_from_file(ranges_path)
        .with_context(|| format!("loading ranges from {}", ranges_path.display()))?;

    let base: FrameList<Origin> = std::iter::repeat(Origin::Base).take(length).collect();
    let patch: FrameList<Origin> = std::iter::repeat(Origin::Patch).take(length).collect();
    let out = replace_ranges(base, &patch, &file.ranges)?;
    info!(ranges = file.ranges.len(), length, "Ranges applied");

    Ok(origin_runs(out.as_slice()))
}

/// Collapse consecutive frames of the same origin into `start-end\torigin`.
pub fn origin_runs(frames: &[Origin]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    for n in 1..=frames.len() {
        if n == frames.len() || frames[n] != frames[start] {
            let origin = match frames[start] {
                Origin::Base => "base",
                Origin::Patch => "patch",
            };
            if n - 1 == start {
                lines.push(format!("{start}\t{origin}"));
            } else {
                lines.push(format!("{}-{}\t{origin}", start, n - 1));
            }
            start = n;
        }
    }
    lines
}

/// `descale <errors.json> [config.json]`
pub fn descale(table_path: &Path, config_path: Option<&Path>) -> Result<Vec<String>> {
    let table = ErrorTable::load(table_path)?;

    let mut config = match config_path {
        Some(path) => DescaleConfig::load_from_file(path)
            .with_context(|| format!("loading descale config {}", path.display()))?,
        None => DescaleConfig::default(),
    };
    config.heights = table.heights.clone();

    let frame_count = table.frame_count()?;
    let decisions = evaluate(&table.errors, frame_count, table.source_height, &config)?;

    let mut lines: Vec<String> = decisions
        .iter()
        .map(|d| match d.choice {
            DescaleChoice::Descaled { height, error } => {
                format!("{}\t{}\t{}", d.frame, height, format_scale_error(error))
            }
            DescaleChoice::Source { best_height, error } => format!(
                "{}\tsource\t{},{}",
                d.frame,
                best_height,
                format_scale_error(error)
            ),
        })
        .collect();

    let summary = DescaleSummary::from_decisions(&decisions);
    match summary.dominant_height() {
        Some(height) => lines.push(format!(
            "# native height {height} ({} of {} frames)",
            summary.per_height[&height],
            summary.total_frames()
        )),
        None => lines.push("# no frame descaled below threshold".to_string()),
    }
    info!(frames = frame_count, source = summary.source_frames, "Descale evaluation done");

    Ok(lines)
}

/// `errors <errors.json> <height>`: per-frame scale error of one candidate.
pub fn errors(table_path: &Path, height: u32) -> Result<Vec<String>> {
    let table = ErrorTable::load(table_path)?;
    let frame_count = table.frame_count()?;
    let Some(row) = table.heights.iter().position(|&h| h == height) else {
        bail!("height {height} is not a candidate in {}", table_path.display());
    };
    let Some(metric) = table.errors.get(row) else {
        bail!("no errors recorded for height {height}");
    };

    Ok(candidate_errors(metric, frame_count)?
        .iter()
        .enumerate()
        .map(|(frame, &error)| format!("{frame}\t{error}"))
        .collect())
}
