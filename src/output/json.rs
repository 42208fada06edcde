//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/home/user/Downloads",
//!   "duplicates": [
//!     {
//!       "digest": "5d41402abc4b2a76b9719d911017c592",
//!       "original": "/home/user/Downloads/a.txt",
//!       "duplicate": "/home/user/Downloads/b.txt",
//!       "copies": 2,
//!       "original_created": "2024-01-01T10:00:00Z"
//!     }
//!   ],
//!   "summary": {
//!     "files_scanned": 2,
//!     "files_hashed": 2,
//!     "bytes_hashed": 10,
//!     "duplicate_count": 1,
//!     "scan_duration_ms": 3,
//!     "exit_code": 0,
//!     "exit_code_name": "DF000"
//!   },
//!   "errors": []
//! }
//! ```

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duplicates::{DigestIndex, FileRecord, ScanSummary};
use crate::error::ExitCode;
use crate::scanner::{hash_to_hex, Digest};

/// One digest with a duplicate, in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    /// MD5 digest as 32 lowercase hex characters
    pub digest: String,
    /// The oldest file with this content
    pub original: String,
    /// The last duplicate seen
    pub duplicate: String,
    /// Number of files sharing this content
    pub copies: usize,
    /// Creation time of the original
    pub original_created: DateTime<Utc>,
}

impl JsonDuplicate {
    /// Build from an index record that has a duplicate.
    #[must_use]
    pub fn from_record(digest: &Digest, record: &FileRecord) -> Self {
        Self {
            digest: hash_to_hex(digest),
            original: record.canonical_path.to_string_lossy().into_owned(),
            duplicate: record
                .duplicate_path
                .as_deref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            copies: record.copies,
            original_created: DateTime::<Utc>::from(record.canonical_created),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files discovered
    pub files_scanned: usize,
    /// Files successfully hashed
    pub files_hashed: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Digests with at least one duplicate
    pub duplicate_count: usize,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DF000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            files_scanned: summary.files_scanned,
            files_hashed: summary.files_hashed,
            bytes_hashed: summary.bytes_hashed,
            duplicate_count: summary.duplicate_groups,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// The scanned directory
    pub root: String,
    /// Every digest that has a duplicate, ordered by original path
    pub duplicates: Vec<JsonDuplicate>,
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Messages of the directories and files that were skipped
    pub errors: Vec<String>,
}

impl JsonOutput {
    /// Create a new JSON output from the finished index and summary.
    #[must_use]
    pub fn new(
        root: &Path,
        index: &DigestIndex,
        summary: &ScanSummary,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            root: root.to_string_lossy().into_owned(),
            duplicates: index
                .duplicates()
                .into_iter()
                .map(|(digest, record)| JsonDuplicate::from_record(digest, record))
                .collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
            errors: summary.scan_errors.iter().map(ToString::to_string).collect(),
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty JSON and a trailing newline to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        let json = self.to_json_pretty()?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
