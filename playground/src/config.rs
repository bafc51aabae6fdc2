use std::path::PathBuf;

use crate::{DateRange, PlaygroundError, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFilter {
    All,
    PngOnly,
    JpegOnly,
}

impl FormatFilter {
    /// Maps the two mutually exclusive CLI flags onto a single filter,
    /// rejecting the conflicting combination before any network activity.
    pub fn from_flags(only_png: bool, only_jpeg: bool) -> Result<Self, PlaygroundError> {
        match (only_png, only_jpeg) {
            (true, true) => Err(PlaygroundError::ConfigConflict),
            (true, false) => Ok(Self::PngOnly),
            (false, true) => Ok(Self::JpegOnly),
            (false, false) => Ok(Self::All),
        }
    }
}

/// Immutable settings for one archive run.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub user_id: UserId,
    pub output: PathBuf,
    pub format_filter: FormatFilter,
    /// Prefix image filenames with the record's creation time.
    pub name_by_date: bool,
    pub date_range: DateRange,
}

impl ArchiveConfig {
    pub fn png_dir(&self) -> PathBuf {
        self.output.join("png")
    }

    pub fn jpeg_dir(&self) -> PathBuf {
        self.output.join("jpeg")
    }
}
