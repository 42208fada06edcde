//! A path that cannot be read is reported and skipped; the scan goes on.

use dupefinder::duplicates::{DuplicateFinder, NullObserver, ScanObserver};
use dupefinder::scanner::{FileEntry, HashError, ScanError};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tempfile::tempdir;

#[derive(Default)]
struct ErrorLog {
    messages: Vec<String>,
}

impl ScanObserver for ErrorLog {
    fn on_error(&mut self, error: &ScanError) {
        self.messages.push(error.to_string());
    }
}

#[test]
fn test_missing_files_are_skipped() {
    let dir = tempdir().unwrap();
    let real_a = dir.path().join("a.txt");
    let real_b = dir.path().join("b.txt");
    fs::write(&real_a, b"data").unwrap();
    fs::write(&real_b, b"data").unwrap();

    let now = SystemTime::now();
    let files = vec![
        FileEntry::new(real_a, 4, now),
        FileEntry::new(dir.path().join("vanished.txt"), 4, now),
        FileEntry::new(real_b, 4, now),
    ];

    let mut log = ErrorLog::default();
    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_from_files(files, &mut log)
        .unwrap();

    assert_eq!(summary.files_hashed, 2);
    assert_eq!(summary.scan_errors.len(), 1);
    assert!(matches!(
        summary.scan_errors[0],
        ScanError::HashError(HashError::NotFound(_))
    ));
    assert_eq!(log.messages.len(), 1);
    assert!(log.messages[0].contains("vanished.txt"));
    assert_eq!(index.duplicate_count(), 1);
}

#[test]
fn test_empty_path_is_invalid_argument() {
    let files = vec![FileEntry::new(PathBuf::new(), 0, SystemTime::now())];

    let (index, summary) =
        DuplicateFinder::with_defaults()
            .find_duplicates_from_files(files, &mut NullObserver)
            .unwrap();

    assert!(index.is_empty());
    assert!(matches!(
        summary.scan_errors[0],
        ScanError::HashError(HashError::InvalidArgument)
    ));
    assert_eq!(summary.scan_errors[0].to_string(), "File name is empty");
}

#[test]
fn test_root_must_exist() {
    let dir = tempdir().unwrap();
    let result = DuplicateFinder::with_defaults()
        .find_duplicates(&dir.path().join("nope"), &mut NullObserver);
    assert!(result.is_err());
}

#[test]
fn test_root_must_be_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let result = DuplicateFinder::with_defaults().find_duplicates(&file, &mut NullObserver);
    assert!(result.is_err());
}

#[cfg(unix)]
fn running_as_root(probe: &std::path::Path) -> bool {
    // Root ignores permission bits, so the locked path stays readable.
    fs::read_dir(probe).is_ok() || fs::read(probe).is_ok()
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_stop_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"same").unwrap();
    fs::write(dir.path().join("z.txt"), b"same").unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), b"same").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if running_as_root(&locked) {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut log = ErrorLog::default();
    let result = DuplicateFinder::with_defaults().find_duplicates(dir.path(), &mut log);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let (index, summary) = result.unwrap();
    assert_eq!(index.duplicate_count(), 1);
    assert_eq!(summary.files_hashed, 2);
    assert!(summary.has_errors());
    assert!(log.messages.iter().any(|m| m.contains("locked")));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_does_not_stop_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let secret = dir.path().join("b_secret.txt");
    fs::write(dir.path().join("a.txt"), b"same").unwrap();
    fs::write(&secret, b"same").unwrap();
    fs::write(dir.path().join("c.txt"), b"same").unwrap();
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    if running_as_root(&secret) {
        return;
    }

    let mut log = ErrorLog::default();
    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut log)
        .unwrap();
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(summary.files_scanned, 3);
    assert_eq!(summary.files_hashed, 2);
    assert_eq!(summary.scan_errors.len(), 1);
    assert!(matches!(
        summary.scan_errors[0],
        ScanError::HashError(HashError::PermissionDenied(_))
    ));
    assert_eq!(index.duplicate_count(), 1);
}
