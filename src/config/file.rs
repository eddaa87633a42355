//! Configuration file data structures

use crate::diff::DiffOptions;
use crate::error::IpaDiffError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".ipa-diff.toml";

/// ipa-diff configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Report thresholds
    #[serde(default)]
    pub report: ReportSettings,

    /// Where packages are looked up and reports are written
    #[serde(default)]
    pub paths: PathSettings,
}

/// `[report]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReportSettings {
    /// Minimum absolute change (bytes) for a modified file to be listed
    pub significance_threshold_bytes: u64,

    /// Maximum files listed per category
    pub max_files_per_category: usize,

    /// Metadata diff (bytes) above which the mismatch is reported
    pub metadata_warning_bytes: u64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            significance_threshold_bytes: DiffOptions::DEFAULT_SIGNIFICANCE_THRESHOLD,
            max_files_per_category: DiffOptions::DEFAULT_MAX_FILES_PER_CATEGORY,
            metadata_warning_bytes: 1_000,
        }
    }
}

/// `[paths]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathSettings {
    /// Directory holding the old package
    pub old_dir: PathBuf,

    /// Directory holding the new package
    pub new_dir: PathBuf,

    /// Directory reports are written to
    pub output_dir: PathBuf,

    /// Package file extension, without the dot
    pub package_extension: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            old_dir: PathBuf::from("old"),
            new_dir: PathBuf::from("new"),
            output_dir: PathBuf::from("."),
            package_extension: "ipa".to_string(),
        }
    }
}

impl ConfigFile {
    /// Check values that deserialize fine but make no sense
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::config::ConfigFile;
    ///
    /// let mut config = ConfigFile::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.paths.package_extension = ".ipa".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), IpaDiffError> {
        if self.report.max_files_per_category == 0 {
            return Err(IpaDiffError::InvalidConfig {
                reason: "max-files-per-category must be at least 1".to_string(),
            });
        }

        let extension = &self.paths.package_extension;
        if extension.is_empty() {
            return Err(IpaDiffError::InvalidConfig {
                reason: "package-extension cannot be empty".to_string(),
            });
        }
        if extension.starts_with('.') {
            return Err(IpaDiffError::InvalidConfig {
                reason: format!(
                    "package-extension should not start with a dot (use \"{}\")",
                    extension.trim_start_matches('.')
                ),
            });
        }

        Ok(())
    }

    /// Diff engine options from the `[report]` section
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            significance_threshold: self.report.significance_threshold_bytes,
            max_files_per_category: self.report.max_files_per_category,
        }
    }
}
