//! Test fixture helpers for creating packages
//!
//! Packages are real zip archives written with the `zip` crate, laid out
//! like an `.ipa` (a `Payload/<App>.app/` tree).

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Re-export anyhow for convenience
pub use anyhow;

/// Builds a zip package member by member
#[derive(Default)]
pub struct PackageBuilder {
    members: Vec<(String, Vec<u8>, CompressionMethod)>,
}

impl PackageBuilder {
    /// Empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member stored without compression
    pub fn stored(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.members
            .push((name.to_string(), data.into(), CompressionMethod::Stored));
        self
    }

    /// Add a deflate-compressed member
    pub fn deflated(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.members
            .push((name.to_string(), data.into(), CompressionMethod::Deflated));
        self
    }

    /// Add a directory member (name must end with `/`)
    pub fn dir(mut self, name: &str) -> Self {
        self.members
            .push((name.to_string(), Vec::new(), CompressionMethod::Stored));
        self
    }

    /// Write the archive to `path`, creating parent directories
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = zip::ZipWriter::new(File::create(path)?);
        for (name, data, method) in &self.members {
            let options = SimpleFileOptions::default().compression_method(*method);
            if name.ends_with('/') {
                writer.add_directory(name.as_str(), options)?;
            } else {
                writer.start_file(name.as_str(), options)?;
                writer.write_all(data)?;
            }
        }
        writer.finish()?;
        Ok(())
    }
}

/// Bytes that do not compress well, reproducible across runs
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        })
        .collect()
}

/// Version 1.0 of a small Flutter-style app
pub fn old_package() -> PackageBuilder {
    PackageBuilder::new()
        .dir("Payload/")
        .dir("Payload/Runner.app/")
        .stored("Payload/Runner.app/Runner", noise(40_000, 1))
        .deflated("Payload/Runner.app/Info.plist", "<plist>".repeat(100))
        .stored("Payload/Runner.app/AppIcon60x60@2x.png", noise(6_000, 2))
        .stored(
            "Payload/Runner.app/Frameworks/App.framework/App",
            noise(30_000, 3),
        )
        .stored(
            "Payload/Runner.app/Frameworks/App.framework/flutter_assets/fonts/MaterialIcons-Regular.otf",
            noise(5_000, 4),
        )
        .stored("Payload/Runner.app/intro.mp4", noise(20_000, 5))
}

/// Version 1.1: the framework grows, a bundle and an image are added, the video is gone
pub fn new_package() -> PackageBuilder {
    PackageBuilder::new()
        .dir("Payload/")
        .dir("Payload/Runner.app/")
        .stored("Payload/Runner.app/Runner", noise(40_000, 1))
        .deflated("Payload/Runner.app/Info.plist", "<plist>".repeat(100))
        .stored("Payload/Runner.app/AppIcon60x60@2x.png", noise(6_000, 2))
        .stored(
            "Payload/Runner.app/Frameworks/App.framework/App",
            noise(90_000, 3),
        )
        .stored(
            "Payload/Runner.app/Frameworks/App.framework/flutter_assets/fonts/MaterialIcons-Regular.otf",
            noise(5_000, 4),
        )
        .stored(
            "Payload/Runner.app/Frameworks/App.framework/Resources.bundle/banner.png",
            noise(12_000, 6),
        )
        .stored("Payload/Runner.app/onboarding.png", noise(8_000, 7))
}

/// Temp dir with `old/App.ipa` and `new/App.ipa`
pub fn create_workspace() -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    old_package().write(&temp_dir.path().join("old").join("App.ipa"))?;
    new_package().write(&temp_dir.path().join("new").join("App.ipa"))?;
    Ok(temp_dir)
}

/// Write a file that is not a zip archive
pub fn write_corrupt_package(path: &Path) -> anyhow::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, b"PK\x03\x04 but not really a zip archive")?;
    Ok(path.to_path_buf())
}
