//! Live scan progress using indicatif.
//!
//! A single spinner on stderr shows the file currently being hashed and a
//! running count. It replaces itself in place, so the terminal keeps one
//! progress line no matter how many files are visited. The spinner is
//! hidden when quiet mode is on or stderr is not a terminal.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// The "currently scanning" line.
#[derive(Clone)]
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a new progress spinner.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupefinder::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// assert!(progress.is_hidden());
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        if quiet {
            return Self::hidden();
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// A progress reporter that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Whether the spinner is invisible.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    /// Show `path` as the file being scanned; `count` is 1-based.
    pub fn set_current(&self, count: usize, path: &Path) {
        self.bar.set_position(count as u64);
        self.bar.set_message(truncate_path(&path.to_string_lossy(), 60));
    }

    /// Run `f` with the spinner cleared, so its output is not overdrawn.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Remove the spinner line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

/// Shorten a path for the progress line, keeping its file name.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let keep = max_len.saturating_sub(3);
        let tail: String = file_name.chars().skip(name_len.saturating_sub(keep)).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
