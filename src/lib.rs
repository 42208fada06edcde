//! dupefinder - find files with identical content
//!
//! Walks a directory tree, hashes every regular file with MD5 and reports,
//! for each set of identical files, the oldest one as the original and the
//! others as duplicates.
//!
//! The library is split into a domain layer ([`scanner`], [`duplicates`])
//! that never touches the terminal, and a presentation layer ([`report`],
//! [`progress`], [`output`]) used by the binary through [`run_app`].

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod scanner;

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::report::ConsoleReporter;
use crate::scanner::WalkerConfig;

/// Printed when no path argument is given.
pub const NO_PATH_MESSAGE: &str = "No path is specified!";

/// Message printed when the root is not an existing directory.
#[must_use]
pub fn not_exists_message(path: &Path) -> String {
    format!("Path '{}' not exists!", path.display())
}

/// Run the application for parsed command-line arguments.
///
/// Report lines go to stdout, colored when stdout is a terminal and
/// `--no-color` is off. See [`run_app_with`].
///
/// # Errors
///
/// Returns an error only for unexpected failures, such as stdout being
/// closed while the report is written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let color = !cli.no_color && io::stdout().is_terminal();
    run_app_with(cli, io::stdout(), color)
}

/// Run the application, writing every user-facing line to `out`.
///
/// Usage problems are answered with a message and [`ExitCode::Usage`]
/// before any traversal starts.
///
/// # Errors
///
/// Returns an error if `out` cannot be written, or the buffer size does
/// not fit in memory addressing on this platform.
pub fn run_app_with<W: Write>(cli: Cli, mut out: W, color: bool) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let Some(root) = cli.path.as_deref() else {
        writeln!(out, "{NO_PATH_MESSAGE}").context("Failed to write report")?;
        return Ok(ExitCode::Usage);
    };

    if !root.is_dir() {
        writeln!(out, "{}", not_exists_message(root)).context("Failed to write report")?;
        return Ok(ExitCode::Usage);
    }

    let buffer_size = usize::try_from(cli.buffer_size)
        .with_context(|| format!("Buffer size {} is too large", cli.buffer_size))?;
    let config = FinderConfig::default()
        .with_buffer_size(buffer_size)
        .with_walker_config(WalkerConfig::new(cli.follow_symlinks));
    log::debug!("Finder configuration: {:?}", config);

    let finder = DuplicateFinder::new(config);
    let mut reporter = ConsoleReporter::new(out, Progress::new(cli.quiet), cli.output, color);

    let (index, summary) = finder
        .find_duplicates(root, &mut reporter)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let exit_code = ExitCode::for_scan(index.duplicate_count(), summary.has_errors());
    reporter.finish(root, &index, &summary, exit_code)?;

    if cli.pause {
        prompt::wait_for_keypress().context("Failed to wait for a keypress")?;
    }

    Ok(exit_code)
}
