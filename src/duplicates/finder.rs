//! Duplicate finder: the scan pipeline for one run.
//!
//! # Overview
//!
//! [`DuplicateFinder`] walks a directory tree, hashes every regular file and
//! feeds the results into a fresh [`DigestIndex`]. Progress, duplicates and
//! errors are pushed to a [`ScanObserver`] as they happen, so callers can
//! render them however they like. The finder itself never writes to the
//! terminal.
//!
//! Errors are never fatal once the root has been validated: a directory
//! that cannot be read or a file that cannot be hashed is recorded in
//! [`ScanSummary::scan_errors`] and skipped.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::{DuplicateFinder, NullObserver};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (index, summary) = finder
//!     .find_duplicates(Path::new("."), &mut NullObserver)
//!     .unwrap();
//!
//! println!(
//!     "{} files, {} with duplicates",
//!     summary.files_scanned,
//!     index.duplicate_count()
//! );
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::{DigestIndex, DuplicateEvent};
use crate::scanner::{
    FileEntry, Hasher, ScanError, Walker, WalkerConfig, DEFAULT_BUFFER_SIZE,
};

/// Receives scan events as they happen.
///
/// All methods default to doing nothing.
pub trait ScanObserver {
    /// A regular file is about to be hashed.
    fn on_file(&mut self, _entry: &FileEntry) {}

    /// A file's digest was already in the index.
    fn on_duplicate(&mut self, _event: &DuplicateEvent) {}

    /// A directory or file was skipped because of an error.
    fn on_error(&mut self, _error: &ScanError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ScanObserver for NullObserver {}

/// Configuration for the duplicate finder.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Directory walker configuration
    pub walker_config: WalkerConfig,
    /// Read window for hashing, in bytes
    pub buffer_size: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the hashing read window in bytes.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

/// Totals for one scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Regular files discovered
    pub files_scanned: usize,
    /// Files successfully hashed
    pub files_hashed: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Duplicate events emitted
    pub duplicate_events: usize,
    /// Digests with at least one duplicate
    pub duplicate_groups: usize,
    /// Non-fatal errors, in the order they occurred
    pub scan_errors: Vec<ScanError>,
    /// Wall-clock time of the scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Whether any directory or file was skipped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty()
    }

    /// Bytes hashed, human-readable.
    #[must_use]
    pub fn bytes_hashed_display(&self) -> String {
        ByteSize::b(self.bytes_hashed).to_string()
    }
}

/// Errors that stop a scan before it starts.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root path does not exist.
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Runs the walk, hash and index pipeline.
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new().with_buffer_size(config.buffer_size);
        Self { config, hasher }
    }

    /// Create a finder with default settings.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Scan `root` and return the populated index with a summary.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] only when `root` is missing or not a
    /// directory. Everything after that is reported through `observer` and
    /// [`ScanSummary::scan_errors`].
    pub fn find_duplicates(
        &self,
        root: &Path,
        observer: &mut dyn ScanObserver,
    ) -> Result<(DigestIndex, ScanSummary), FinderError> {
        if !root.exists() {
            return Err(FinderError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::info!("Scanning {}", root.display());
        let walker = Walker::new(root, self.config.walker_config.clone());
        Ok(self.run(walker.walk(), observer))
    }

    /// Run the hash and index stages over an explicit list of files.
    ///
    /// # Errors
    ///
    /// Never fails as a whole; per-file errors land in the summary.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<FileEntry>,
        observer: &mut dyn ScanObserver,
    ) -> Result<(DigestIndex, ScanSummary), FinderError> {
        Ok(self.run(files.into_iter().map(Ok), observer))
    }

    fn run(
        &self,
        entries: impl Iterator<Item = Result<FileEntry, ScanError>>,
        observer: &mut dyn ScanObserver,
    ) -> (DigestIndex, ScanSummary) {
        let start = Instant::now();
        let mut index = DigestIndex::new();
        let mut summary = ScanSummary::default();
        let mut buffer = Vec::new();

        for item in entries {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    record_error(e, observer, &mut summary);
                    continue;
                }
            };

            summary.files_scanned += 1;
            observer.on_file(&entry);

            let digest = match self.hasher.full_hash_with(&entry.path, &mut buffer) {
                Ok(digest) => digest,
                Err(e) => {
                    log::debug!("Skipping unhashable file: {}", e);
                    record_error(e.into(), observer, &mut summary);
                    continue;
                }
            };

            summary.files_hashed += 1;
            summary.bytes_hashed += entry.size;

            if let Some(event) = index.observe(entry.path, digest, entry.created) {
                log::debug!(
                    "Duplicate: {} of {}",
                    event.duplicate.display(),
                    event.canonical.display()
                );
                summary.duplicate_events += 1;
                observer.on_duplicate(&event);
            }
        }

        summary.duplicate_groups = index.duplicate_count();
        summary.scan_duration = start.elapsed();

        log::info!(
            "Scanned {} files ({} hashed, {}) in {:.2?}: {} with duplicates, {} errors",
            summary.files_scanned,
            summary.files_hashed,
            summary.bytes_hashed_display(),
            summary.scan_duration,
            summary.duplicate_groups,
            summary.scan_errors.len()
        );

        (index, summary)
    }
}

fn record_error(error: ScanError, observer: &mut dyn ScanObserver, summary: &mut ScanSummary) {
    observer.on_error(&error);
    summary.scan_errors.push(error);
}
