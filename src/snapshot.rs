//! Classified views of a package
//!
//! A [`Snapshot`] is the set of classified entries of one package under one
//! [`ClassifyMode`]. Both modes are always built from the same entry list
//! (see [`PackageSnapshots::from_listing`]) so their totals agree.

use crate::archive::{PackageListing, RawEntry};
use crate::classify::{classify, Category, ClassifyMode};
use crate::error::IpaDiffError;
use serde::Serialize;
use std::collections::btree_map::Entry as MapEntry;
use std::collections::BTreeMap;

/// Largest package size, entry size or total that is tracked
///
/// Keeping every total at or below half of `i64::MAX` makes all signed
/// deltas, their sums and the metadata diff exact.
pub const MAX_TRACKED_BYTES: u64 = (i64::MAX / 2) as u64;

/// `a + b`, or `None` once the sum passes [`MAX_TRACKED_BYTES`]
fn tracked_add(a: u64, b: u64) -> Option<u64> {
    a.checked_add(b).filter(|sum| *sum <= MAX_TRACKED_BYTES)
}

/// A classified archive member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Member path inside the archive
    pub path: String,
    /// Size after extraction
    pub uncompressed_size: u64,
    /// Size of the stored payload
    pub compressed_size: u64,
    /// Category under the snapshot's mode
    pub category: Category,
}

/// Compressed and uncompressed byte counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizePair {
    /// Bytes as stored in the archive
    pub compressed: u64,
    /// Bytes after extraction
    pub uncompressed: u64,
}

impl SizePair {
    fn checked_add(self, compressed: u64, uncompressed: u64) -> Option<Self> {
        Some(Self {
            compressed: tracked_add(self.compressed, compressed)?,
            uncompressed: tracked_add(self.uncompressed, uncompressed)?,
        })
    }
}

/// Per-category size totals
pub type CategoryTotals = BTreeMap<Category, SizePair>;

/// All entries of one package classified under one mode
#[derive(Debug, Clone)]
pub struct Snapshot {
    mode: ClassifyMode,
    entries: BTreeMap<String, Entry>,
    totals: SizePair,
}

impl Snapshot {
    /// Classify every non-directory entry and accumulate totals
    ///
    /// A path listed more than once is kept as a single entry whose sizes
    /// are the sum of all listings, so the totals always equal the sum over
    /// entries.
    ///
    /// Fails with [`IpaDiffError::SizeOverflow`] when a total would pass
    /// [`MAX_TRACKED_BYTES`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ipa_diff::archive::RawEntry;
    /// use ipa_diff::classify::ClassifyMode;
    /// use ipa_diff::snapshot::Snapshot;
    ///
    /// let raw = vec![
    ///     RawEntry::new("Payload/", 0, 0),
    ///     RawEntry::new("Payload/App.app/App", 1000, 400),
    ///     RawEntry::new("Payload/App.app/icon.png", 200, 180),
    /// ];
    /// let snapshot = Snapshot::build(&raw, ClassifyMode::Aggregate)?;
    ///
    /// assert_eq!(snapshot.len(), 2);
    /// assert_eq!(snapshot.total_compressed(), 580);
    /// assert_eq!(snapshot.total_uncompressed(), 1200);
    /// # Ok::<(), ipa_diff::error::IpaDiffError>(())
    /// ```
    pub fn build(raw_entries: &[RawEntry], mode: ClassifyMode) -> Result<Self, IpaDiffError> {
        let mut entries: BTreeMap<String, Entry> = BTreeMap::new();
        let mut totals = SizePair::default();

        for raw in raw_entries.iter().filter(|raw| !raw.is_dir()) {
            // Entry sizes never exceed the running totals, so checking the
            // totals covers merged duplicates too
            totals = totals
                .checked_add(raw.compressed_size, raw.uncompressed_size)
                .ok_or_else(|| IpaDiffError::SizeOverflow {
                    subject: raw.path.clone(),
                })?;

            match entries.entry(raw.path.clone()) {
                MapEntry::Vacant(slot) => {
                    slot.insert(Entry {
                        path: raw.path.clone(),
                        uncompressed_size: raw.uncompressed_size,
                        compressed_size: raw.compressed_size,
                        category: classify(&raw.path, mode),
                    });
                }
                MapEntry::Occupied(mut slot) => {
                    log::warn!("duplicate archive entry {}, merging sizes", raw.path);
                    let existing = slot.get_mut();
                    existing.uncompressed_size += raw.uncompressed_size;
                    existing.compressed_size += raw.compressed_size;
                }
            }
        }

        Ok(Self {
            mode,
            entries,
            totals,
        })
    }

    /// Classification mode of this snapshot
    pub fn mode(&self) -> ClassifyMode {
        self.mode
    }

    /// Entry for a path, if present
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    /// Entries ordered by path
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Paths ordered lexicographically
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of (non-directory) entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the package holds no files
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of compressed sizes
    pub fn total_compressed(&self) -> u64 {
        self.totals.compressed
    }

    /// Sum of uncompressed sizes
    pub fn total_uncompressed(&self) -> u64 {
        self.totals.uncompressed
    }

    /// Both totals
    pub fn totals(&self) -> SizePair {
        self.totals
    }

    /// Fold entries into per-category totals
    ///
    /// Each category total is bounded by the snapshot totals.
    pub fn category_totals(&self) -> CategoryTotals {
        self.entries
            .values()
            .fold(CategoryTotals::new(), |mut totals, entry| {
                let total = totals.entry(entry.category.clone()).or_default();
                total.compressed += entry.compressed_size;
                total.uncompressed += entry.uncompressed_size;
                totals
            })
    }
}

/// Aggregate and detail views of one package plus its file size
#[derive(Debug, Clone)]
pub struct PackageSnapshots {
    /// Framework contents folded into their framework
    pub aggregate: Snapshot,
    /// Framework contents split by component
    pub detail: Snapshot,
    /// Size of the package file itself
    pub file_size: u64,
}

impl PackageSnapshots {
    /// Build both views from one listing
    pub fn from_listing(listing: &PackageListing) -> Result<Self, IpaDiffError> {
        Self::from_entries(&listing.entries, listing.file_size)
    }

    /// Build both views from raw entries and a known package file size
    pub fn from_entries(entries: &[RawEntry], file_size: u64) -> Result<Self, IpaDiffError> {
        if file_size > MAX_TRACKED_BYTES {
            return Err(IpaDiffError::SizeOverflow {
                subject: format!("package file size {}", file_size),
            });
        }

        Ok(Self {
            aggregate: Snapshot::build(entries, ClassifyMode::Aggregate)?,
            detail: Snapshot::build(entries, ClassifyMode::Detail)?,
            file_size,
        })
    }
}
