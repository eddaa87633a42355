//! Configuration for ipa-diff
//!
//! Settings live in `.ipa-diff.toml` in the working directory; a missing
//! file means defaults.

pub mod file;
pub mod loader;

pub use file::{ConfigFile, PathSettings, ReportSettings, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
