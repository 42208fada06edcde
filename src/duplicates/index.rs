//! Digest index: the record of every content digest seen during a run.
//!
//! # Overview
//!
//! [`DigestIndex`] maps each content digest to a [`FileRecord`] naming the
//! canonical file (the oldest one by creation time) and the most recently
//! seen duplicate. Observing a digest for the second time or later yields a
//! [`DuplicateEvent`].
//!
//! Every later member of a group is compared against the *current*
//! canonical, so the canonical is always the oldest file of the whole group,
//! not only of the first pair.
//!
//! # Example
//!
//! ```
//! use dupefinder::duplicates::DigestIndex;
//! use std::path::PathBuf;
//! use std::time::{Duration, SystemTime};
//!
//! let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
//! let t1 = t0 + Duration::from_secs(1);
//! let digest = [0xab; 16];
//!
//! let mut index = DigestIndex::new();
//! assert!(index.observe(PathBuf::from("/a.txt"), digest, t0).is_none());
//!
//! let event = index.observe(PathBuf::from("/b.txt"), digest, t1).unwrap();
//! assert_eq!(event.canonical, PathBuf::from("/a.txt"));
//! assert_eq!(event.duplicate, PathBuf::from("/b.txt"));
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::scanner::Digest;

/// What the index knows about one digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// The oldest file seen with this digest
    pub canonical_path: PathBuf,
    /// The last duplicate seen, if any
    pub duplicate_path: Option<PathBuf>,
    /// Creation time of the canonical file
    pub canonical_created: SystemTime,
    /// Number of files seen with this digest
    pub copies: usize,
}

impl FileRecord {
    fn new(path: PathBuf, created: SystemTime) -> Self {
        Self {
            canonical_path: path,
            duplicate_path: None,
            canonical_created: created,
            copies: 1,
        }
    }

    /// Whether a second file with this digest has been seen.
    #[must_use]
    pub fn has_duplicate(&self) -> bool {
        self.duplicate_path.is_some()
    }
}

/// Emitted whenever a file's digest was already in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEvent {
    /// The shared content digest
    pub digest: Digest,
    /// The file kept as the original
    pub canonical: PathBuf,
    /// The file reported as its duplicate
    pub duplicate: PathBuf,
}

/// Mapping from content digest to [`FileRecord`] for one scan.
#[derive(Debug, Default)]
pub struct DigestIndex {
    records: HashMap<Digest, FileRecord>,
}

impl DigestIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` has content `digest` and was created at `created`.
    ///
    /// Returns `None` the first time a digest is seen. On later sightings the
    /// older of the new file and the current canonical becomes (or stays)
    /// canonical; ties go to the new file. The other one becomes the
    /// record's duplicate and is returned in the event.
    pub fn observe(
        &mut self,
        path: PathBuf,
        digest: Digest,
        created: SystemTime,
    ) -> Option<DuplicateEvent> {
        let record = match self.records.entry(digest) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                slot.insert(FileRecord::new(path, created));
                return None;
            }
        };

        record.copies += 1;

        if created > record.canonical_created {
            record.duplicate_path = Some(path.clone());
            return Some(DuplicateEvent {
                digest,
                canonical: record.canonical_path.clone(),
                duplicate: path,
            });
        }

        let previous = std::mem::replace(&mut record.canonical_path, path);
        record.canonical_created = created;
        record.duplicate_path = Some(previous.clone());

        Some(DuplicateEvent {
            digest,
            canonical: record.canonical_path.clone(),
            duplicate: previous,
        })
    }

    /// Look up the record for a digest.
    #[must_use]
    pub fn get(&self, digest: &Digest) -> Option<&FileRecord> {
        self.records.get(digest)
    }

    /// Number of distinct digests seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been observed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of digests that have at least one duplicate.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.records.values().filter(|r| r.has_duplicate()).count()
    }

    /// Records that have a duplicate, ordered by canonical path.
    #[must_use]
    pub fn duplicates(&self) -> Vec<(&Digest, &FileRecord)> {
        let mut found: Vec<_> = self
            .records
            .iter()
            .filter(|(_, r)| r.has_duplicate())
            .collect();
        found.sort_by(|a, b| a.1.canonical_path.cmp(&b.1.canonical_path));
        found
    }

    /// Whether `path` is the canonical file of any record.
    #[must_use]
    pub fn is_canonical(&self, path: &Path) -> bool {
        self.records.values().any(|r| r.canonical_path == path)
    }
}
