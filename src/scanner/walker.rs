//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting the regular files it contains. Traversal is
//! depth-first on a single thread. [`walkdir`] keeps its own stack of open
//! directories, so nesting depth is not limited by the call stack.
//!
//! # Ordering
//!
//! Inside each directory, files are yielded before subdirectories are
//! entered, and entries of the same kind are ordered by name.
//!
//! # Errors
//!
//! A directory that cannot be read is yielded as an `Err` item and the walk
//! carries on with its siblings. Symlinks are skipped unless
//! [`WalkerConfig::follow_symlinks`] is set, in which case directory cycles
//! are reported as [`ScanError::SymlinkLoop`].
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::cmp::Ordering;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// A relative `path` is resolved against the current directory, so every
    /// yielded [`FileEntry::path`] is absolute. Symlinks in the root are
    /// left as typed.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        let root = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self { root, config }
    }

    /// The root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Returns a lazy iterator over [`FileEntry`] results. Errors are yielded
    /// as [`ScanError`] values rather than stopping iteration. The root
    /// itself is never yielded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupefinder::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by(files_first);

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Turn a directory entry into a [`FileEntry`] if it is a regular file.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<FileEntry, ScanError>> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            log::trace!("Entering directory: {}", entry.path().display());
            return None;
        }

        // With follow_links on, file_type() already describes the target.
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        if !file_type.is_file() {
            log::trace!("Skipping special file: {}", entry.path().display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        Some(Ok(FileEntry {
            path: entry.path().to_path_buf(),
            size: metadata.len(),
            created: creation_time(&metadata),
        }))
    }

    /// Convert a walkdir error to a [`ScanError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        use std::io::ErrorKind;

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            log::debug!(
                "Symlink loop: {} points to {}",
                path.display(),
                ancestor.display()
            );
            return ScanError::SymlinkLoop {
                ancestor: ancestor.to_path_buf(),
                path,
            };
        }

        match error.into_io_error() {
            Some(io) if io.kind() == ErrorKind::PermissionDenied => {
                log::debug!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            Some(io) if io.kind() == ErrorKind::NotFound => {
                log::debug!("Path vanished during scan: {}", path.display());
                ScanError::NotFound(path)
            }
            Some(io) => {
                log::debug!("I/O error for {}: {}", path.display(), io);
                ScanError::Io { path, source: io }
            }
            None => {
                log::debug!("Walker error for {}", path.display());
                ScanError::Io {
                    path,
                    source: std::io::Error::other("directory walk failed"),
                }
            }
        }
    }
}

/// Sort files ahead of directories, then by name.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Birth time where the platform records it, else modification time.
fn creation_time(metadata: &Metadata) -> SystemTime {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
