//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the dupefinder application.
///
/// - 0: Success (scan completed, duplicates found)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates found (scan completed, nothing to report)
/// - 3: Partial success (scan completed with some skipped directories or files)
/// - 64: Usage error (no path given, or the path is not an existing directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: Scan completed but encountered some non-fatal errors.
    PartialSuccess = 3,
    /// Usage error: The scan never started.
    Usage = 64,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DF000",
            Self::GeneralError => "DF001",
            Self::NoDuplicates => "DF002",
            Self::PartialSuccess => "DF003",
            Self::Usage => "DF064",
        }
    }

    /// Pick the exit code for a completed scan.
    ///
    /// Skipped directories or files take precedence over the duplicate count.
    #[must_use]
    pub fn for_scan(duplicate_groups: usize, had_errors: bool) -> Self {
        if had_errors {
            Self::PartialSuccess
        } else if duplicate_groups > 0 {
            Self::Success
        } else {
            Self::NoDuplicates
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DF001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
