//! Category-level and file-level diff of two packages
//!
//! Category deltas come from the aggregate snapshots and are what the
//! package size change is reconciled against; file deltas come from the
//! detail snapshots and populate each category's file table.

pub mod types;

pub use types::{
    CategoryDelta, DiffResult, FileDelta, FileStatus, FileTable, InvariantMismatchWarning,
    PackageSizes,
};

use crate::classify::Category;
use crate::snapshot::{PackageSnapshots, Snapshot};
use std::collections::{BTreeMap, BTreeSet};
use types::signed_delta;

/// Tunables for the file tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Minimum absolute change (bytes) for a modified file to be listed
    pub significance_threshold: u64,
    /// Maximum rows per category table
    pub max_files_per_category: usize,
}

impl DiffOptions {
    /// Default significance threshold in bytes
    pub const DEFAULT_SIGNIFICANCE_THRESHOLD: u64 = 1024;
    /// Default table cap
    pub const DEFAULT_MAX_FILES_PER_CATEGORY: usize = 20;
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            significance_threshold: Self::DEFAULT_SIGNIFICANCE_THRESHOLD,
            max_files_per_category: Self::DEFAULT_MAX_FILES_PER_CATEGORY,
        }
    }
}

/// Computes [`DiffResult`]s from package snapshots
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create an engine with the given options
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diff two packages, each with both views built from one listing
    pub fn diff_packages(&self, old: &PackageSnapshots, new: &PackageSnapshots) -> DiffResult {
        self.diff(
            &old.aggregate,
            &new.aggregate,
            &old.detail,
            &new.detail,
            PackageSizes {
                old: old.file_size,
                new: new.file_size,
            },
        )
    }

    /// Diff two packages
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::archive::RawEntry;
    /// use ipa_diff::diff::{DiffEngine, FileStatus};
    /// use ipa_diff::snapshot::PackageSnapshots;
    ///
    /// let old = PackageSnapshots::from_entries(
    ///     &[RawEntry::new("Frameworks/Foo.framework/Foo", 250_000, 100_000)],
    ///     100_000,
    /// )?;
    /// let new = PackageSnapshots::from_entries(
    ///     &[
    ///         RawEntry::new("Frameworks/Foo.framework/Foo", 300_000, 120_000),
    ///         RawEntry::new("Payload/App/icon.png", 5_000, 2_000),
    ///     ],
    ///     122_500,
    /// )?;
    ///
    /// let result = DiffEngine::default().diff_packages(&old, &new);
    /// assert_eq!(result.increased[0].category.to_string(), "Framework - Foo.framework");
    /// assert_eq!(result.increased[0].compressed_diff, 20_000);
    /// assert_eq!(result.increased[1].compressed_diff, 2_000);
    /// assert_eq!(result.metadata_diff, 500);
    ///
    /// let images = &result.files_by_category[&result.increased[1].category];
    /// assert_eq!(images.files[0].status, FileStatus::Added);
    /// # Ok::<(), ipa_diff::error::IpaDiffError>(())
    /// ```
    pub fn diff(
        &self,
        old_aggregate: &Snapshot,
        new_aggregate: &Snapshot,
        old_detail: &Snapshot,
        new_detail: &Snapshot,
        package_sizes: PackageSizes,
    ) -> DiffResult {
        let category_deltas = category_deltas(old_aggregate, new_aggregate);

        let package_size_diff = package_sizes.diff();
        let category_diff_sum: i64 = category_deltas.iter().map(|d| d.compressed_diff).sum();
        // Exact for snapshots within MAX_TRACKED_BYTES; hand-built sizes saturate
        let metadata_diff = package_size_diff.saturating_sub(category_diff_sum);

        let (mut increased, mut decreased): (Vec<_>, Vec<_>) = category_deltas
            .into_iter()
            .partition(|delta| delta.compressed_diff > 0);
        increased.sort_by(|a, b| {
            b.compressed_diff
                .cmp(&a.compressed_diff)
                .then_with(|| a.category.cmp(&b.category))
        });
        decreased.sort_by(|a, b| {
            b.compressed_diff
                .unsigned_abs()
                .cmp(&a.compressed_diff.unsigned_abs())
                .then_with(|| a.category.cmp(&b.category))
        });

        let mut files_by_aggregate = group_by_aggregate(file_deltas(old_detail, new_detail));
        let files_by_category = increased
            .iter()
            .chain(decreased.iter())
            .map(|delta| {
                let files = files_by_aggregate
                    .remove(&delta.category)
                    .unwrap_or_default();
                (delta.category.clone(), self.file_table(files))
            })
            .collect();

        let old_totals = old_aggregate.totals();
        let new_totals = new_aggregate.totals();

        log::debug!(
            "diff: {} increased, {} decreased categories, package {:+} bytes, metadata {:+} bytes",
            increased.len(),
            decreased.len(),
            package_size_diff,
            metadata_diff
        );

        DiffResult {
            package_sizes,
            package_size_diff,
            old_totals,
            new_totals,
            total_uncompressed_diff: signed_delta(old_totals.uncompressed, new_totals.uncompressed),
            total_compressed_diff: signed_delta(old_totals.compressed, new_totals.compressed),
            category_diff_sum,
            metadata_diff,
            increased,
            decreased,
            files_by_category,
        }
    }

    /// Filter, sort and cap the files of one category
    ///
    /// A file is significant when its absolute change reaches the threshold
    /// or it was added or removed.
    pub fn file_table(&self, files: Vec<FileDelta>) -> FileTable {
        let total_files = files.len();
        let threshold = self.options.significance_threshold;

        let mut significant: Vec<FileDelta> = files
            .into_iter()
            .filter(|file| {
                file.change.unsigned_abs() >= threshold || file.status != FileStatus::Modified
            })
            .collect();
        significant.sort_by(|a, b| {
            a.status
                .priority()
                .cmp(&b.status.priority())
                .then_with(|| b.change.unsigned_abs().cmp(&a.change.unsigned_abs()))
                .then_with(|| a.path.cmp(&b.path))
        });

        let significant_files = significant.len();
        significant.truncate(self.options.max_files_per_category);

        FileTable {
            files: significant,
            total_files,
            significant_files,
        }
    }
}

/// Per-category deltas over the union of categories, zero diffs dropped
fn category_deltas(old: &Snapshot, new: &Snapshot) -> Vec<CategoryDelta> {
    let old_totals = old.category_totals();
    let new_totals = new.category_totals();

    let categories: BTreeSet<&Category> = old_totals.keys().chain(new_totals.keys()).collect();

    categories
        .into_iter()
        .map(|category| {
            CategoryDelta::between(
                category.clone(),
                old_totals.get(category).copied().unwrap_or_default(),
                new_totals.get(category).copied().unwrap_or_default(),
            )
        })
        .filter(|delta| delta.compressed_diff != 0)
        .collect()
}

/// One delta per path in the union of both detail snapshots
fn file_deltas(old: &Snapshot, new: &Snapshot) -> Vec<FileDelta> {
    let paths: BTreeSet<&str> = old.paths().chain(new.paths()).collect();

    paths
        .into_iter()
        .filter_map(|path| {
            let old_entry = old.get(path);
            let new_entry = new.get(path);
            let category = new_entry.or(old_entry)?.category.clone();

            Some(FileDelta::new(
                path,
                old_entry.map_or(0, |e| e.uncompressed_size),
                new_entry.map_or(0, |e| e.uncompressed_size),
                category,
            ))
        })
        .collect()
}

fn group_by_aggregate(files: Vec<FileDelta>) -> BTreeMap<Category, Vec<FileDelta>> {
    let mut grouped: BTreeMap<Category, Vec<FileDelta>> = BTreeMap::new();
    for file in files {
        grouped.entry(file.category.aggregate()).or_default().push(file);
    }
    grouped
}
