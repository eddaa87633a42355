//! Package archive enumeration
//!
//! Reads the central directory of a zip package and returns one
//! [`RawEntry`] per member. Entry data is never decompressed.

use crate::error::IpaDiffError;
use crate::infra::FileSystem;
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// One archive member as listed in the package's central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Member path inside the archive
    pub path: String,
    /// Size after extraction
    pub uncompressed_size: u64,
    /// Size of the stored (compressed) payload
    pub compressed_size: u64,
}

impl RawEntry {
    /// Create a raw entry
    pub fn new(path: impl Into<String>, uncompressed_size: u64, compressed_size: u64) -> Self {
        Self {
            path: path.into(),
            uncompressed_size,
            compressed_size,
        }
    }

    /// Directory members end with `/` and carry no payload
    pub fn is_dir(&self) -> bool {
        self.path.ends_with('/')
    }
}

/// Everything the diff needs to know about one package file
#[derive(Debug, Clone)]
pub struct PackageListing {
    /// Package file on disk
    pub path: PathBuf,
    /// Size of the package file itself
    pub file_size: u64,
    /// Archive members in central-directory order
    pub entries: Vec<RawEntry>,
}

/// Source of package listings
pub trait PackageReader {
    /// Open a package and enumerate its members
    fn read_listing(&self, path: &Path) -> Result<PackageListing, IpaDiffError>;
}

/// Reads `.ipa` (zip) packages from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipPackageReader;

impl PackageReader for ZipPackageReader {
    fn read_listing(&self, path: &Path) -> Result<PackageListing, IpaDiffError> {
        let archive_error = |source: zip::result::ZipError| IpaDiffError::ArchiveRead {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|e| archive_error(e.into()))?;
        let file_size = file
            .metadata()
            .map_err(|e| archive_error(e.into()))?
            .len();

        let mut archive = ZipArchive::new(file).map_err(archive_error)?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            // Raw access skips decompression and decryption
            let member = archive.by_index_raw(i).map_err(archive_error)?;
            entries.push(RawEntry::new(
                member.name(),
                member.size(),
                member.compressed_size(),
            ));
        }

        log::debug!(
            "read {} entries ({} bytes) from {}",
            entries.len(),
            file_size,
            path.display()
        );

        Ok(PackageListing {
            path: path.to_path_buf(),
            file_size,
            entries,
        })
    }
}

/// Find the package file in `dir`
///
/// Picks the first file (by name) whose extension matches `extension`
/// case-insensitively, so the choice is stable when several are present.
pub fn find_package<FS: FileSystem>(
    fs: &FS,
    dir: &Path,
    extension: &str,
) -> Result<PathBuf, IpaDiffError> {
    let not_found = || IpaDiffError::PackageNotFound {
        dir: dir.to_path_buf(),
        extension: extension.to_string(),
    };

    let read_dir = match fs.read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            return Err(IpaDiffError::Io {
                context: format!("listing {}", dir.display()),
                source: e,
            })
        }
    };

    let mut candidates: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .filter(|path| fs.metadata(path).map(|m| m.is_file()).unwrap_or(false))
        .collect();
    candidates.sort();

    if candidates.len() > 1 {
        log::warn!(
            "{} packages found in {}, using {}",
            candidates.len(),
            dir.display(),
            candidates[0].display()
        );
    }

    candidates.into_iter().next().ok_or_else(not_found)
}
