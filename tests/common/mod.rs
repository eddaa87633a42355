//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Package fixture creation (real zip archives)
//! - The compiled binary under test
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! let workspace = fixtures::create_workspace()?;
//! get_bin().arg("compare").current_dir(workspace.path()).assert().success();
//! ```

pub mod fixtures;

use assert_cmd::Command;

/// The ipa-diff binary, with colors off so output is plain text
#[allow(dead_code)]
pub fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ipa-diff"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}
