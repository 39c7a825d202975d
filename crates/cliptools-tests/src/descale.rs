//! Integration tests for descale detection.
//!
//! Builds synthetic luma planes, measures rescale error per candidate and
//! feeds the decisions back into range splicing.

use cliptools_core::{Alignment, FrameList, FrameSequence, TextOverlay};
use cliptools_descale::{
    annotate_candidate_errors, annotate_decisions, candidate_errors, evaluate,
    format_scale_error, DescaleConfig, DescaleSummary, LumaPlane, RescalePairs,
    DEFAULT_THRESHOLD,
};
use cliptools_edit::{replace_ranges, FrameRange};

// ── Helpers ────────────────────────────────────────────────────

/// Gradient plane; `noise` adds a checkerboard of that amplitude.
fn plane(noise: f32) -> LumaPlane {
    let (w, h) = (32u32, 18u32);
    let data = (0..h)
        .flat_map(|y| {
            (0..w).map(move |x| {
                let base = (x + y) as f32 / (w + h) as f32;
                if (x + y) % 2 == 0 {
                    base + noise
                } else {
                    base
                }
            })
        })
        .collect();
    LumaPlane::new(w, h, data).unwrap()
}

/// Candidate whose rescale is exact on `matching` frames and off elsewhere.
fn candidate(frame_count: usize, matching: &[usize]) -> RescalePairs {
    let mut pairs = RescalePairs::new();
    for n in 0..frame_count {
        let noise = if matching.contains(&n) { 0.0 } else { 0.2 };
        pairs.push(plane(0.0), plane(noise));
    }
    pairs
}

struct Caption;

impl TextOverlay<String> for Caption {
    fn overlay_text(&self, frame: String, text: &str, _alignment: Alignment) -> String {
        format!("{frame}|{text}")
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[test]
fn picks_matching_height_per_frame() {
    let candidates = vec![candidate(6, &[0, 1, 2]), candidate(6, &[3])];
    let config = DescaleConfig {
        heights: vec![720, 810],
        ..Default::default()
    };

    let decisions = evaluate(&candidates, 6, 1080, &config).unwrap();
    let heights: Vec<Option<u32>> = decisions
        .iter()
        .map(|d| d.choice.descaled_height())
        .collect();
    assert_eq!(
        heights,
        vec![Some(720), Some(720), Some(720), Some(810), None, None]
    );

    let summary = DescaleSummary::from_decisions(&decisions);
    assert_eq!(summary.dominant_height(), Some(720));
    assert_eq!(summary.source_frames, 2);
}

#[test]
fn noisy_frames_exceed_default_threshold() {
    let candidates = vec![candidate(1, &[])];
    let config = DescaleConfig {
        heights: vec![720],
        ..Default::default()
    };
    let decisions = evaluate(&candidates, 1, 1080, &config).unwrap();
    assert!(decisions[0].choice.error() >= DEFAULT_THRESHOLD);
    assert_eq!(decisions[0].choice.descaled_height(), None);
}

#[test]
fn decisions_splice_rescaled_frames_into_source() {
    let candidates = vec![candidate(5, &[1, 2, 4])];
    let config = DescaleConfig {
        heights: vec![720],
        ..Default::default()
    };
    let decisions = evaluate(&candidates, 5, 1080, &config).unwrap();

    let ranges: Vec<FrameRange> = decisions
        .iter()
        .filter(|d| d.choice.descaled_height().is_some())
        .map(|d| FrameRange::Single(d.frame))
        .collect();

    let source: FrameList<&str> = vec!["src"; 5].into();
    let rescaled: FrameList<&str> = vec!["720p"; 5].into();
    let out = replace_ranges(source, &rescaled, &ranges).unwrap();

    assert_eq!(out.len(), 5);
    assert_eq!(out.as_slice(), &["src", "720p", "720p", "src", "720p"]);
}

#[test]
fn config_file_feeds_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("descale.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "heights": [720],
            "target_height": 1440,
            "threshold": 1.0,
        })
        .to_string(),
    )
    .unwrap();

    let config = DescaleConfig::load_from_file(&path).unwrap();
    let decisions = evaluate(&[candidate(1, &[])], 1, 1080, &config).unwrap();

    // Loose threshold accepts the noisy candidate; 720 -> 1440 needs doubling.
    assert_eq!(decisions[0].choice.descaled_height(), Some(720));
    let plan = decisions[0].resize.unwrap();
    assert!(plan.double_first);
    assert_eq!(plan.width, 2560);
}

#[test]
fn debug_labels_follow_output_height() {
    let candidates = vec![candidate(2, &[0])];
    let config = DescaleConfig {
        heights: vec![720],
        target_height: Some(720),
        ..Default::default()
    };
    let decisions = evaluate(&candidates, 2, 1080, &config).unwrap();

    let clip: FrameList<String> = vec![String::new(); 2].into();
    let out = annotate_decisions(clip, &decisions, &Caption).unwrap();
    assert_eq!(out.frame(0).unwrap(), "|720");
    assert!(out.frame(1).unwrap().starts_with("|720|720,"));
}

#[test]
fn candidate_clip_shows_its_own_errors() {
    let pairs = candidate(3, &[1]);
    let errors = candidate_errors(&pairs, 3).unwrap();
    assert_eq!(errors[1], 0.0);
    assert!(errors[0] > 0.0);

    let clip: FrameList<String> = vec![String::new(); 3].into();
    let out = annotate_candidate_errors(clip, &pairs, &Caption).unwrap();
    assert_eq!(out.frame(1).unwrap(), "|0.00e+00");
    assert_eq!(
        out.frame(0).unwrap(),
        format!("|{}", format_scale_error(errors[0]))
    );
}
