#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! ipa-diff library
//!
//! Compares two builds of a zip-based app package (an iOS `.ipa`) and
//! reports size changes per resource category and per file. It can be
//! used programmatically in addition to the CLI interface.
//!
//! Data flows one way: [`archive`] lists entries, [`snapshot`] classifies
//! them with [`classify`], [`diff`] computes deltas and [`report`] renders
//! them.
//!
//! # Basic Example
//!
//! Diffing two entry lists without touching the filesystem:
//!
//! ```
//! use ipa_diff::archive::RawEntry;
//! use ipa_diff::diff::DiffEngine;
//! use ipa_diff::report::ReportModel;
//! use ipa_diff::snapshot::PackageSnapshots;
//!
//! let old = PackageSnapshots::from_entries(
//!     &[RawEntry::new("Payload/App.app/App", 120_000, 50_000)],
//!     51_000,
//! )?;
//! let new = PackageSnapshots::from_entries(
//!     &[
//!         RawEntry::new("Payload/App.app/App", 130_000, 54_000),
//!         RawEntry::new("Payload/App.app/Assets/logo.png", 8_000, 7_900),
//!     ],
//!     63_100,
//! )?;
//!
//! let result = DiffEngine::default().diff_packages(&old, &new);
//! assert_eq!(result.metadata_diff, 200);
//!
//! let model = ReportModel::from_diff(result, "1.0", "1.1", 1_000);
//! assert_eq!(model.increased_categories.len(), 2);
//! assert!(model.metadata_warning.is_none());
//! # Ok::<(), ipa_diff::error::IpaDiffError>(())
//! ```
//!
//! # Advanced Example: Reading Packages
//!
//! ```no_run
//! use ipa_diff::archive::{PackageReader, ZipPackageReader};
//! use ipa_diff::diff::DiffEngine;
//! use ipa_diff::snapshot::PackageSnapshots;
//! use std::path::Path;
//!
//! let old = ZipPackageReader.read_listing(Path::new("old/App.ipa"))?;
//! let new = ZipPackageReader.read_listing(Path::new("new/App.ipa"))?;
//!
//! let result = DiffEngine::default().diff_packages(
//!     &PackageSnapshots::from_listing(&old)?,
//!     &PackageSnapshots::from_listing(&new)?,
//! );
//! println!("package changed by {} bytes", result.package_size_diff);
//! # Ok::<(), ipa_diff::error::IpaDiffError>(())
//! ```

/// Package archive enumeration and discovery
pub mod archive;
/// Path classification into resource categories
pub mod classify;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file management
pub mod config;
/// Category-level and file-level diffing
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Report model, renderers and report files
pub mod report;
/// Classified package snapshots
pub mod snapshot;
