//! Init command implementation
//!
//! Handles the `ipa-diff init` command which writes a configuration file
//! with the default settings.

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config::{self, ConfigFile};
use crate::fmt::{CHECKMARK, INFO, WARNING};
use crate::infra::{FileSystem, RealFileSystem};

/// Create `.ipa-diff.toml` in the current directory
///
/// # Examples
///
/// ```no_run
/// use ipa_diff::cmd::init::cmd_init;
///
/// // Keep an existing file
/// cmd_init(false)?;
///
/// // Overwrite it with the defaults
/// cmd_init(true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(force: bool) -> Result<()> {
    let root = env::current_dir()?;
    init_in(&root, force, &RealFileSystem)?;
    Ok(())
}

/// Write the default config into `root`; returns false when an existing file was kept
pub fn init_in<FS: FileSystem>(root: &Path, force: bool, fs: &FS) -> Result<bool> {
    if !force && config::ConfigLoader::exists_with_fs(root, fs) {
        println!(
            "{} Config file already exists: {}",
            WARNING,
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Use --force to overwrite it with the defaults.");
        return Ok(false);
    }

    let defaults = ConfigFile::default();
    config::ConfigLoader::save_with_fs(&defaults, root, fs)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!("{}  Settings:", INFO);
    println!(
        "   {} old package directory: {}",
        style("•").dim(),
        style(defaults.paths.old_dir.display()).green()
    );
    println!(
        "   {} new package directory: {}",
        style("•").dim(),
        style(defaults.paths.new_dir.display()).green()
    );
    println!(
        "   {} significance threshold: {} bytes",
        style("•").dim(),
        style(defaults.report.significance_threshold_bytes).green()
    );
    println!(
        "   {} files per category: {}",
        style("•").dim(),
        style(defaults.report.max_files_per_category).green()
    );

    Ok(true)
}
