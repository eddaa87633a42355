//! Presentation-ready view of a diff

use crate::diff::{CategoryDelta, DiffResult, FileTable, InvariantMismatchWarning};
use crate::classify::Category;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One side of the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Version label (the package's folder name)
    pub label: String,
    /// Package file size in bytes
    pub file_size: u64,
}

impl PackageInfo {
    /// Label a package by the name of the folder it lives in
    ///
    /// Falls back to the file name when there is no named parent.
    pub fn label_for(path: &Path) -> String {
        path.parent()
            .and_then(|parent| parent.file_name())
            .or_else(|| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Everything the renderers show, already ordered and capped
#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    /// Old package
    pub old_package: PackageInfo,
    /// New package
    pub new_package: PackageInfo,
    /// Change of the package file size
    pub package_size_diff: i64,
    /// Change of the installed (uncompressed) size
    pub total_uncompressed_diff: i64,
    /// Sum of category compressed diffs
    pub category_diff_sum: i64,
    /// Container overhead change
    pub metadata_diff: i64,
    /// Present when the metadata diff is unusually large
    pub metadata_warning: Option<InvariantMismatchWarning>,
    /// Categories that grew, largest first
    pub increased_categories: Vec<CategoryDelta>,
    /// Categories that shrank, largest reduction first
    pub decreased_categories: Vec<CategoryDelta>,
    /// File table of every listed category
    pub files_by_category: BTreeMap<Category, FileTable>,
}

impl ReportModel {
    /// Assemble the report from a diff result
    pub fn from_diff(
        result: DiffResult,
        old_label: impl Into<String>,
        new_label: impl Into<String>,
        metadata_warning_threshold: u64,
    ) -> Self {
        let metadata_warning = result.metadata_warning(metadata_warning_threshold);

        Self {
            old_package: PackageInfo {
                label: old_label.into(),
                file_size: result.package_sizes.old,
            },
            new_package: PackageInfo {
                label: new_label.into(),
                file_size: result.package_sizes.new,
            },
            package_size_diff: result.package_size_diff,
            total_uncompressed_diff: result.total_uncompressed_diff,
            category_diff_sum: result.category_diff_sum,
            metadata_diff: result.metadata_diff,
            metadata_warning,
            increased_categories: result.increased,
            decreased_categories: result.decreased,
            files_by_category: result.files_by_category,
        }
    }

    /// File table of a category; empty for categories that are not listed
    pub fn files(&self, category: &Category) -> Option<&FileTable> {
        self.files_by_category.get(category)
    }

    /// True when neither package's entries changed
    pub fn is_unchanged(&self) -> bool {
        self.increased_categories.is_empty() && self.decreased_categories.is_empty()
    }
}
