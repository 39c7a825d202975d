//! Scene-filtering bookmarks.
//!
//! A bookmark file is a single line of frame numbers separated by `", "`,
//! written by a preview tool while skimming through a source. Frame 0 is an
//! implicit bookmark; it is inserted on load when the file does not start
//! with it.

use std::fmt;
use std::path::Path;

use cliptools_core::{Alignment, ClipToolsError, FrameList, Result, TextOverlay};
use tracing::debug;

/// Separator used between frame numbers in a bookmark file.
pub const BOOKMARK_SEPARATOR: &str = ", ";

/// Ascending list of bookmarked frames, always starting at frame 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmarks {
    frames: Vec<u64>,
}

impl Bookmarks {
    /// Build from raw frame numbers, prepending 0 if absent.
    ///
    /// Fails on an empty list or when the frames are not strictly increasing.
    pub fn new(mut frames: Vec<u64>) -> Result<Self> {
        let first = *frames.first().ok_or(ClipToolsError::EmptyBookmarks)?;
        if first != 0 {
            frames.insert(0, 0);
        }

        if let Some(pair) = frames.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ClipToolsError::UnsortedBookmarks {
                previous: pair[0],
                next: pair[1],
            });
        }

        Ok(Self { frames })
    }

    /// Bookmarked frames in ascending order.
    pub fn frames(&self) -> &[u64] {
        &self.frames
    }

    /// Number of bookmarks, including the implicit frame 0.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; a normalized list holds at least frame 0.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames elapsed since the nearest bookmark at or before `n`.
    pub fn frames_since(&self, n: u64) -> u64 {
        // Frame 0 is always present, so every n has a preceding bookmark.
        let idx = self.frames.partition_point(|&b| b <= n);
        n - self.frames[idx - 1]
    }

    /// Render back into the bookmark file format.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Bookmarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str(BOOKMARK_SEPARATOR)?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

/// Frames elapsed since the greatest bookmark not exceeding `n`.
///
/// `bookmarks` must be ascending. Fails when it is empty or when `n` lies
/// before its first element.
pub fn frames_since_bookmark(n: u64, bookmarks: &[u64]) -> Result<u64> {
    let first = *bookmarks.first().ok_or(ClipToolsError::EmptyBookmarks)?;
    let idx = bookmarks.partition_point(|&b| b <= n);
    if idx == 0 {
        return Err(ClipToolsError::FrameBeforeFirstBookmark { frame: n, first });
    }
    Ok(n - bookmarks[idx - 1])
}

/// Parse the contents of a bookmark file.
pub fn parse_bookmarks(text: &str) -> Result<Bookmarks> {
    let frames = text
        .split(BOOKMARK_SEPARATOR)
        .enumerate()
        .map(|(index, token)| {
            token
                .trim()
                .parse::<u64>()
                .map_err(|_| ClipToolsError::Parse {
                    index,
                    token: token.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Bookmarks::new(frames)
}

/// Read and parse a bookmark file.
pub fn load_bookmarks(path: &Path) -> Result<Bookmarks> {
    let text = std::fs::read_to_string(path)?;
    let bookmarks = parse_bookmarks(&text)?;
    debug!(
        path = %path.display(),
        count = bookmarks.len(),
        "Loaded bookmarks"
    );
    Ok(bookmarks)
}

/// Write bookmarks to `path` in the bookmark file format.
pub fn save_bookmarks(bookmarks: &Bookmarks, path: &Path) -> Result<()> {
    std::fs::write(path, bookmarks.to_text())?;
    Ok(())
}

/// Burn the frames-since-bookmark count into every frame of `clip`.
pub fn annotate_frames_since_bookmark<F, O>(
    clip: FrameList<F>,
    bookmarks: &Bookmarks,
    overlay: &O,
) -> FrameList<F>
where
    O: TextOverlay<F>,
{
    clip.map_frames(|n, frame| {
        let since = bookmarks.frames_since(n as u64);
        overlay.overlay_text(frame, &since.to_string(), Alignment::TopLeft)
    })
}
