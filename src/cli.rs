//! Command-line interface definitions for dupefinder.
//!
//! This module defines the CLI arguments using the clap derive API. The
//! root path is optional at the parser level so that a missing path can be
//! answered with the tool's own message instead of a clap usage error.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory
//! dupefinder ~/Downloads
//!
//! # JSON report for scripting
//! dupefinder ~/Downloads --output json
//!
//! # Smaller read window, debug logging
//! dupefinder -v --buffer-size 1MiB ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scanner::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};

/// Find files with identical content in a directory tree.
///
/// Every regular file under PATH is hashed (MD5). For each set of identical
/// files the oldest one is reported as the original and the others as
/// duplicates.
#[derive(Debug, Parser)]
#[command(name = "dupefinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging except errors and hide the progress spinner
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Follow symbolic links during the scan
    ///
    /// Symlinks that loop back to an ancestor directory are reported and skipped.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Read window used while hashing (e.g., 64KiB, 5MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB.
    /// Must be between 1 byte and 256MiB.
    #[arg(long, value_name = "SIZE", value_parser = parse_buffer_size, default_value_t = DEFAULT_BUFFER_SIZE as u64)]
    pub buffer_size: u64,

    /// Output format (text lines or a JSON report)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Wait for a keypress before exiting (interactive terminals only)
    #[arg(long)]
    pub pause: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per duplicate plus a closing summary
    #[default]
    Text,
    /// A single JSON document after the scan
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupefinder::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("5MiB").unwrap(), 5 * 1_048_576);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Parse a `--buffer-size` value: a [`parse_size`] string between 1 byte
/// and [`MAX_BUFFER_SIZE`].
///
/// # Errors
///
/// Returns an error for anything [`parse_size`] rejects, for zero, and for
/// sizes above the maximum.
pub fn parse_buffer_size(s: &str) -> Result<u64, String> {
    let size = parse_size(s)?;
    if size == 0 {
        return Err("Buffer size must be at least 1 byte".to_string());
    }
    if size > MAX_BUFFER_SIZE as u64 {
        return Err(format!(
            "Buffer size {s} is larger than the maximum of {}",
            bytesize::ByteSize(MAX_BUFFER_SIZE as u64)
        ));
    }
    Ok(size)
}
