//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - The per-run digest index and its canonical-file rule ([`index`])
//! - The walk, hash and index pipeline ([`finder`])

pub mod finder;
pub mod index;

// Re-export main types
pub use finder::{
    DuplicateFinder, FinderConfig, FinderError, NullObserver, ScanObserver, ScanSummary,
};
pub use index::{DigestIndex, DuplicateEvent, FileRecord};
