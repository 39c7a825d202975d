//! Integration tests for the scene-filtering review workflow.
//!
//! Exercises bookmarks, range files and splicing together the way a
//! filtering script uses them.

use cliptools_core::{Alignment, ClipToolsError, FrameList, FrameSequence, TextOverlay};
use cliptools_edit::{
    annotate_frames_since_bookmark, frames_since_bookmark, load_bookmarks, replace_ranges,
    FrameRange, RangeFile,
};

// ── Helpers ────────────────────────────────────────────────────

fn named(prefix: &str, len: usize) -> FrameList<String> {
    (0..len).map(|n| format!("{prefix}{n}")).collect()
}

struct Burn;

impl TextOverlay<String> for Burn {
    fn overlay_text(&self, frame: String, text: &str, alignment: Alignment) -> String {
        format!("{frame}@{}:{text}", alignment as u8)
    }
}

// ── Bookmarks ──────────────────────────────────────────────────

#[test]
fn bookmark_file_drives_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.txt");
    std::fs::write(&path, "3, 5\n").unwrap();

    let bookmarks = load_bookmarks(&path).unwrap();
    assert_eq!(bookmarks.frames(), &[0, 3, 5]);

    let out = annotate_frames_since_bookmark(named("f", 7), &bookmarks, &Burn);
    let counts: Vec<&str> = out
        .iter()
        .map(|f| f.rsplit(':').next().unwrap())
        .collect();
    assert_eq!(counts, vec!["0", "1", "2", "0", "1", "0", "1"]);
    assert!(out.frame(0).unwrap().starts_with("f0@7"));
}

#[test]
fn resolver_agrees_with_normalized_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.txt");
    std::fs::write(&path, "0, 240, 1000").unwrap();

    let bookmarks = load_bookmarks(&path).unwrap();
    for n in [0, 1, 239, 240, 241, 999, 1000, 5000] {
        assert_eq!(
            frames_since_bookmark(n, bookmarks.frames()).unwrap(),
            bookmarks.frames_since(n)
        );
    }
}

#[test]
fn malformed_bookmark_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.txt");
    std::fs::write(&path, "10,20").unwrap();
    assert!(matches!(
        load_bookmarks(&path),
        Err(ClipToolsError::Parse { index: 0, .. })
    ));
}

// ── Splicing ───────────────────────────────────────────────────

#[test]
fn splice_properties_on_four_frames() {
    let a = named("a", 4);
    let b = named("b", 4);

    assert_eq!(replace_ranges(a.clone(), &b, &[]).unwrap(), a);
    assert_eq!(
        replace_ranges(a.clone(), &b, &[FrameRange::Span(0, 3)]).unwrap(),
        b
    );
    assert_eq!(
        replace_ranges(a.clone(), &b, &[FrameRange::Single(2)])
            .unwrap()
            .into_vec(),
        vec!["a0", "a1", "b2", "a3"]
    );
    assert!(matches!(
        replace_ranges(a, &b, &[FrameRange::Span(0, 4)]),
        Err(ClipToolsError::OutOfBounds { .. })
    ));
}

#[test]
fn descending_ranges_chain_over_previous_step() {
    let a = named("a", 4);
    let b = named("b", 4);
    let out = replace_ranges(a, &b, &[FrameRange::Span(1, 2), FrameRange::Span(0, 1)]).unwrap();
    assert_eq!(out.into_vec(), vec!["b0", "b1", "b2", "a3"]);
}

#[test]
fn range_file_applies_to_clip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranges.json");
    RangeFile::new(vec![FrameRange::Span(10, 12), FrameRange::Single(19)])
        .save_to_file(&path)
        .unwrap();

    let ranges = RangeFile::load_from_file(&path).unwrap().ranges;
    let out = replace_ranges(named("src", 20), &named("fix", 20), &ranges).unwrap();

    assert_eq!(out.len(), 20);
    assert_eq!(out.frame(9).unwrap(), "src9");
    assert_eq!(out.frame(10).unwrap(), "fix10");
    assert_eq!(out.frame(12).unwrap(), "fix12");
    assert_eq!(out.frame(13).unwrap(), "src13");
    assert_eq!(out.frame(19).unwrap(), "fix19");
}

#[test]
fn legacy_range_array_still_loads() {
    let ranges = RangeFile::from_json(b"[0, [2, 3]]").unwrap().ranges;
    let out = replace_ranges(vec![0u8; 5], &vec![1u8; 5], &ranges).unwrap();
    assert_eq!(out, vec![1, 0, 1, 1, 0]);
}
