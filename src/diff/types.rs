//! Diff result types

use crate::classify::Category;
use crate::snapshot::SizePair;
use serde::Serialize;
use std::collections::BTreeMap;

/// Signed difference `new - old`, saturating at the `i64` range
pub(crate) fn signed_delta(old: u64, new: u64) -> i64 {
    let delta = i128::from(new) - i128::from(old);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}

/// File sizes of the two package files being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackageSizes {
    /// Old package file size in bytes
    pub old: u64,
    /// New package file size in bytes
    pub new: u64,
}

impl PackageSizes {
    /// Difference of the package file sizes
    pub fn diff(&self) -> i64 {
        signed_delta(self.old, self.new)
    }
}

/// Size change of one category, from the aggregate view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDelta {
    /// Aggregate category
    pub category: Category,
    /// Compressed size change (what the package actually grew or shrank by)
    pub compressed_diff: i64,
    /// Old compressed total
    pub old_compressed: u64,
    /// New compressed total
    pub new_compressed: u64,
    /// Old uncompressed total
    pub old_uncompressed: u64,
    /// New uncompressed total
    pub new_uncompressed: u64,
}

impl CategoryDelta {
    pub(crate) fn between(category: Category, old: SizePair, new: SizePair) -> Self {
        Self {
            category,
            compressed_diff: signed_delta(old.compressed, new.compressed),
            old_compressed: old.compressed,
            new_compressed: new.compressed,
            old_uncompressed: old.uncompressed,
            new_uncompressed: new.uncompressed,
        }
    }

    /// Uncompressed size change (installed size)
    pub fn uncompressed_diff(&self) -> i64 {
        signed_delta(self.old_uncompressed, self.new_uncompressed)
    }
}

/// How a file changed between the two packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Present only in the new package
    Added,
    /// Present in both (possibly unchanged)
    Modified,
    /// Present only in the old package
    Removed,
}

impl FileStatus {
    /// Derive the status from both sizes; a missing file has size zero
    pub fn from_sizes(old_size: u64, new_size: u64) -> Self {
        if old_size == 0 && new_size > 0 {
            FileStatus::Added
        } else if new_size == 0 && old_size > 0 {
            FileStatus::Removed
        } else {
            FileStatus::Modified
        }
    }

    /// Sort priority in file tables: added first, removed last
    pub fn priority(self) -> u8 {
        match self {
            FileStatus::Added => 1,
            FileStatus::Modified => 2,
            FileStatus::Removed => 3,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            FileStatus::Added => "Added",
            FileStatus::Modified => "Modified",
            FileStatus::Removed => "Removed",
        }
    }
}

/// Size change of one file, from the detail view
///
/// Sizes are uncompressed sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDelta {
    /// Member path inside the archive
    pub path: String,
    /// Old size (0 when absent)
    pub old_size: u64,
    /// New size (0 when absent)
    pub new_size: u64,
    /// `new_size - old_size`
    pub change: i64,
    /// Added, modified or removed
    pub status: FileStatus,
    /// Detail category (new package's when present there)
    pub category: Category,
}

impl FileDelta {
    pub(crate) fn new(path: &str, old_size: u64, new_size: u64, category: Category) -> Self {
        Self {
            path: path.to_string(),
            old_size,
            new_size,
            change: signed_delta(old_size, new_size),
            status: FileStatus::from_sizes(old_size, new_size),
            category,
        }
    }
}

/// The significant files of one category, sorted and capped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileTable {
    /// Files to show, at most the configured cap
    pub files: Vec<FileDelta>,
    /// Every file in the category, significant or not
    pub total_files: usize,
    /// Significant files before the cap was applied
    pub significant_files: usize,
}

impl FileTable {
    /// Number of rows shown
    pub fn shown(&self) -> usize {
        self.files.len()
    }

    /// True when some files of the category are not shown
    pub fn is_truncated(&self) -> bool {
        self.total_files > self.shown()
    }
}

/// Informational notice that the package change is not explained by entry payloads
///
/// Zip headers and the central directory account for a little of every
/// package; a large gap is surfaced but never treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvariantMismatchWarning {
    /// Package change not attributable to any entry
    pub metadata_diff: i64,
    /// Threshold that was exceeded
    pub threshold: u64,
}

/// Output of [`DiffEngine::diff`](super::DiffEngine::diff)
#[derive(Debug, Clone, Serialize)]
pub struct DiffResult {
    /// Package file sizes
    pub package_sizes: PackageSizes,
    /// `new - old` package file size
    pub package_size_diff: i64,
    /// Old sum of entry sizes
    pub old_totals: SizePair,
    /// New sum of entry sizes
    pub new_totals: SizePair,
    /// Change of the summed uncompressed entry sizes
    pub total_uncompressed_diff: i64,
    /// Change of the summed compressed entry sizes
    pub total_compressed_diff: i64,
    /// Sum of all category compressed diffs
    pub category_diff_sum: i64,
    /// Container overhead change: `package_size_diff - category_diff_sum`
    pub metadata_diff: i64,
    /// Categories that grew, largest growth first
    pub increased: Vec<CategoryDelta>,
    /// Categories that shrank, largest reduction first
    pub decreased: Vec<CategoryDelta>,
    /// File tables for every reported category
    pub files_by_category: BTreeMap<Category, FileTable>,
}

impl DiffResult {
    /// All reported category deltas, increased first
    pub fn category_deltas(&self) -> impl Iterator<Item = &CategoryDelta> {
        self.increased.iter().chain(self.decreased.iter())
    }

    /// Warning when the metadata diff exceeds `threshold` bytes in magnitude
    pub fn metadata_warning(&self, threshold: u64) -> Option<InvariantMismatchWarning> {
        (self.metadata_diff.unsigned_abs() > threshold).then_some(InvariantMismatchWarning {
            metadata_diff: self.metadata_diff,
            threshold,
        })
    }
}
