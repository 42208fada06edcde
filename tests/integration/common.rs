//! Helpers shared by the integration tests.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime};

/// The timestamp the scanner orders files by.
pub fn created(path: &Path) -> SystemTime {
    let metadata = fs::metadata(path).unwrap();
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap()
}

/// Write `path` so that its creation time is strictly later than `than`'s.
///
/// Filesystems with coarse timestamps can give two quick writes the same
/// time, so the file is recreated until the clock has moved on.
pub fn write_newer(path: &Path, content: &[u8], than: &Path) {
    for _ in 0..300 {
        fs::write(path, content).unwrap();
        if created(path) > created(than) {
            return;
        }
        fs::remove_file(path).unwrap();
        thread::sleep(Duration::from_millis(10));
    }
    panic!("creation time of {} never passed {}", path.display(), than.display());
}
