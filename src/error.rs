//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```no_run
//! use ipa_diff::archive::{PackageReader, ZipPackageReader};
//! use std::path::Path;
//!
//! match ZipPackageReader.read_listing(Path::new("old/App.ipa")) {
//!     Ok(listing) => println!("{} entries", listing.entries.len()),
//!     Err(e) => {
//!         eprintln!("{}", e);
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// ipa-diff errors with contextual suggestions
#[derive(Error, Debug)]
pub enum IpaDiffError {
    /// Package archive could not be opened or its entries enumerated
    #[error("Failed to read package archive: {path}")]
    ArchiveRead {
        /// Path to the package
        path: PathBuf,
        #[source]
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// No package found in a search directory
    #[error("No .{extension} package found in {dir}")]
    PackageNotFound {
        /// Directory that was searched
        dir: PathBuf,
        /// Package file extension searched for
        extension: String,
    },

    /// Explicitly given package path does not exist
    #[error("{role} package not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Which side of the comparison ("Old" or "New")
        role: String,
    },

    /// Sizes listed in a package are too large to total and compare exactly
    #[error("Package sizes out of range at {subject}")]
    SizeOverflow {
        /// Entry path or size that pushed a total past the limit
        subject: String,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration
        reason: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl IpaDiffError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::error::IpaDiffError;
    /// use std::path::PathBuf;
    ///
    /// let error = IpaDiffError::PackageNotFound {
    ///     dir: PathBuf::from("old"),
    ///     extension: "ipa".to_string(),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("old"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ArchiveRead { path, .. } => Some(format!(
                "Check that {} is a complete, valid zip package",
                path.display()
            )),
            Self::PackageNotFound { dir, extension } => Some(format!(
                "Place one .{} file in {} or pass the package paths explicitly: \
                 ipa-diff compare <OLD> <NEW>",
                extension,
                dir.display()
            )),
            Self::FileNotFound { path, .. } => {
                Some(format!("Ensure {} exists and is readable", path.display()))
            }
            Self::SizeOverflow { .. } => Some(
                "The package's central directory lists implausible sizes; \
                 rebuild or re-download the package"
                    .to_string(),
            ),
            Self::InvalidConfig { .. } => Some(
                "Fix .ipa-diff.toml or run 'ipa-diff init --force' to regenerate it".to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and disk space while {}",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::error::IpaDiffError;
    ///
    /// let error = IpaDiffError::InvalidConfig { reason: "bad".to_string() };
    /// assert_eq!(error.exit_code(), 78);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ArchiveRead { .. } => 65,     // EX_DATAERR
            Self::PackageNotFound { .. } => 66, // EX_NOINPUT
            Self::FileNotFound { .. } => 66,    // EX_NOINPUT
            Self::SizeOverflow { .. } => 65,    // EX_DATAERR
            Self::InvalidConfig { .. } => 78,   // EX_CONFIG
            Self::Io { .. } => 74,              // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(diff_error) = Self::find(error) {
            if let Some(suggestion) = diff_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, IpaDiffError::exit_code)
    }

    // Context layers wrap the typed error, so search the whole chain
    fn find(error: &anyhow::Error) -> Option<&IpaDiffError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<IpaDiffError>())
    }
}
