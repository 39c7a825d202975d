//! Range files on disk.
//!
//! The current layout is `{"version": 1, "ranges": [...]}`. Files written
//! before the version field existed hold a bare array of ranges and are
//! upgraded as they are read.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use cliptools_core::{ClipToolsError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::splice::FrameRange;

/// Version written by [`RangeFile::to_json`] and [`RangeFile::save_to_file`].
pub const CURRENT_VERSION: u32 = 1;

/// Ordered list of ranges to splice, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRanges")]
pub struct RangeFile {
    pub version: u32,
    /// Ranges in application order.
    pub ranges: Vec<FrameRange>,
}

/// Every layout a range file has had.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRanges {
    Versioned {
        version: u32,
        ranges: Vec<FrameRange>,
    },
    Bare(Vec<FrameRange>),
}

impl TryFrom<StoredRanges> for RangeFile {
    type Error = String;

    fn try_from(stored: StoredRanges) -> std::result::Result<Self, Self::Error> {
        match stored {
            StoredRanges::Bare(ranges) => {
                debug!(count = ranges.len(), "Upgrading unversioned range list");
                Ok(Self::new(ranges))
            }
            StoredRanges::Versioned { version, ranges } if version == CURRENT_VERSION => {
                Ok(Self { version, ranges })
            }
            StoredRanges::Versioned { version, .. } if version > CURRENT_VERSION => Err(format!(
                "range file version {version} is newer than supported version {CURRENT_VERSION}"
            )),
            StoredRanges::Versioned { version, .. } => Err(format!(
                "range file version {version} predates the versioned layout"
            )),
        }
    }
}

fn json_error(err: serde_json::Error) -> ClipToolsError {
    ClipToolsError::Serialization(format!("range file: {err}"))
}

impl RangeFile {
    pub fn new(ranges: Vec<FrameRange>) -> Self {
        Self {
            version: CURRENT_VERSION,
            ranges,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(json_error)
    }

    /// Parse either layout; an unversioned array comes back at
    /// [`CURRENT_VERSION`].
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(json_error)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(json_error)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader).map_err(json_error)
    }
}
