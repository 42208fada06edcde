//! Console presentation of scan events.
//!
//! [`ConsoleReporter`] is the [`ScanObserver`] used by the binary. It turns
//! duplicate events and skipped paths into report lines on a writer
//! (stdout in the binary), keeps the progress spinner up to date, and writes
//! the closing summary or JSON document once the scan is over.
//!
//! Line formats:
//!
//! ```text
//! Original: /data/a.txt	Duplicate: /data/b.txt
//! 1 duplicate files where found!
//! No duplicate file was found.
//! ```

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use yansi::Paint;

use crate::cli::OutputFormat;
use crate::duplicates::{DigestIndex, DuplicateEvent, ScanObserver, ScanSummary};
use crate::error::ExitCode;
use crate::output::JsonOutput;
use crate::progress::Progress;
use crate::scanner::{FileEntry, ScanError};

/// Report line for one duplicate event.
#[must_use]
pub fn duplicate_line(event: &DuplicateEvent) -> String {
    format!(
        "Original: {}\tDuplicate: {}",
        event.canonical.display(),
        event.duplicate.display()
    )
}

/// Closing line; `count` is the number of digests with a duplicate.
#[must_use]
pub fn summary_line(count: usize) -> String {
    if count > 0 {
        format!("{count} duplicate files where found!")
    } else {
        "No duplicate file was found.".to_string()
    }
}

/// Writes scan events to `W` as they arrive.
pub struct ConsoleReporter<W: Write> {
    out: W,
    progress: Progress,
    format: OutputFormat,
    color: bool,
    files_seen: usize,
    write_error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    /// Create a reporter writing to `out`.
    ///
    /// In [`OutputFormat::Json`] mode nothing is written until
    /// [`ConsoleReporter::finish`].
    #[must_use]
    pub fn new(out: W, progress: Progress, format: OutputFormat, color: bool) -> Self {
        Self {
            out,
            progress,
            format,
            color,
            files_seen: 0,
            write_error: None,
        }
    }

    fn emit(&mut self, line: &str) {
        if self.write_error.is_some() {
            return;
        }
        let out = &mut self.out;
        if let Err(e) = self.progress.suspend(|| writeln!(out, "{line}")) {
            self.write_error = Some(e);
        }
    }

    fn warning(&self, line: &str) -> String {
        if self.color {
            line.yellow().to_string()
        } else {
            line.to_string()
        }
    }

    fn failure(&self, line: &str) -> String {
        if self.color {
            line.red().to_string()
        } else {
            line.to_string()
        }
    }

    /// Clear the spinner and write the closing summary (or JSON document).
    ///
    /// # Errors
    ///
    /// Returns the first write failure seen during the scan, or any failure
    /// writing the summary itself.
    pub fn finish(
        &mut self,
        root: &Path,
        index: &DigestIndex,
        summary: &ScanSummary,
        exit_code: ExitCode,
    ) -> anyhow::Result<()> {
        self.progress.finish();

        match self.format {
            OutputFormat::Text => {
                let count = index.duplicate_count();
                let line = summary_line(count);
                let line = if count > 0 { self.warning(&line) } else { line };
                self.emit(&line);
            }
            OutputFormat::Json => {
                JsonOutput::new(root, index, summary, exit_code)
                    .write_to(&mut self.out)
                    .context("Failed to write JSON report")?;
            }
        }

        if let Some(e) = self.write_error.take() {
            return Err(e).context("Failed to write report");
        }
        self.out.flush().context("Failed to flush report")?;
        Ok(())
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScanObserver for ConsoleReporter<W> {
    fn on_file(&mut self, entry: &FileEntry) {
        self.files_seen += 1;
        self.progress.set_current(self.files_seen, &entry.path);
    }

    fn on_duplicate(&mut self, event: &DuplicateEvent) {
        if self.format == OutputFormat::Text {
            let line = self.warning(&duplicate_line(event));
            self.emit(&line);
        }
    }

    fn on_error(&mut self, error: &ScanError) {
        if self.format == OutputFormat::Text {
            let line = self.failure(&error.to_string());
            self.emit(&line);
        }
    }
}
