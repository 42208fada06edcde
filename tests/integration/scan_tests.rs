use super::common::write_newer;
use dupefinder::duplicates::{
    DuplicateEvent, DuplicateFinder, FinderConfig, NullObserver, ScanObserver,
};
use dupefinder::scanner::{FileEntry, ScanError};
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

#[derive(Default)]
struct Recorder {
    files: Vec<PathBuf>,
    events: Vec<DuplicateEvent>,
    errors: usize,
}

impl ScanObserver for Recorder {
    fn on_file(&mut self, entry: &FileEntry) {
        self.files.push(entry.path.clone());
    }

    fn on_duplicate(&mut self, event: &DuplicateEvent) {
        self.events.push(event.clone());
    }

    fn on_error(&mut self, _error: &ScanError) {
        self.errors += 1;
    }
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut NullObserver)
        .unwrap();

    assert!(index.is_empty());
    assert_eq!(summary.files_scanned, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_identical_pair_oldest_is_original() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"hello").unwrap();
    write_newer(&b, b"hello", &a);

    let mut recorder = Recorder::default();
    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    assert_eq!(recorder.events.len(), 1);
    assert_eq!(recorder.events[0].canonical, a);
    assert_eq!(recorder.events[0].duplicate, b);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(index.duplicate_count(), 1);
}

#[test]
fn test_older_file_visited_later_becomes_original() {
    let dir = tempdir().unwrap();
    let older = dir.path().join("z_older.txt");
    let newer = dir.path().join("a_newer.txt");
    fs::write(&older, b"same bytes").unwrap();
    write_newer(&newer, b"same bytes", &older);

    let mut recorder = Recorder::default();
    DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    // a_newer.txt is visited first, then z_older.txt takes over.
    assert_eq!(recorder.files, vec![newer.clone(), older.clone()]);
    assert_eq!(recorder.events.len(), 1);
    assert_eq!(recorder.events[0].canonical, older);
    assert_eq!(recorder.events[0].duplicate, newer);
}

#[test]
fn test_distinct_content_never_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"world").unwrap();
    fs::write(dir.path().join("c.txt"), b"hello!").unwrap();

    let mut recorder = Recorder::default();
    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    assert!(recorder.events.is_empty());
    assert_eq!(index.len(), 3);
    assert_eq!(summary.files_hashed, 3);
}

#[test]
fn test_group_of_three_keeps_globally_oldest() {
    let dir = tempdir().unwrap();
    let oldest = dir.path().join("c_oldest.txt");
    let middle = dir.path().join("a_middle.txt");
    let newest = dir.path().join("b_newest.txt");
    fs::write(&oldest, b"triplet").unwrap();
    write_newer(&middle, b"triplet", &oldest);
    write_newer(&newest, b"triplet", &middle);

    let mut recorder = Recorder::default();
    let (index, _summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    assert_eq!(recorder.events.len(), 2);
    assert_eq!(recorder.events[0].canonical, middle);
    assert_eq!(recorder.events[0].duplicate, newest);
    assert_eq!(recorder.events[1].canonical, oldest);
    assert_eq!(recorder.events[1].duplicate, middle);

    let (_, record) = index.duplicates()[0];
    assert_eq!(record.canonical_path, oldest);
    assert_eq!(record.copies, 3);
    assert_eq!(index.duplicate_count(), 1);
}

#[test]
fn test_duplicates_across_nested_directories() {
    let dir = tempdir().unwrap();
    let mut current = dir.path().to_path_buf();
    for i in 0..15 {
        current = current.join(format!("level_{}", i));
        fs::create_dir(&current).unwrap();
    }
    fs::write(current.join("deep.txt"), b"deep content").unwrap();
    fs::write(dir.path().join("shallow.txt"), b"deep content").unwrap();

    let mut recorder = Recorder::default();
    let (_index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(recorder.events.len(), 1);
    // Top-level files are visited before any subdirectory.
    assert_eq!(recorder.files[0], dir.path().join("shallow.txt"));
}

#[test]
fn test_every_file_visited_exactly_once() {
    let dir = tempdir().unwrap();
    let mut expected = Vec::new();
    for d in 0..4 {
        let sub = dir.path().join(format!("dir_{d}")).join("inner");
        fs::create_dir_all(&sub).unwrap();
        for f in 0..5 {
            let path = sub.join(format!("file_{f}.bin"));
            fs::write(&path, format!("{d}-{f}")).unwrap();
            expected.push(path);
        }
    }

    let mut recorder = Recorder::default();
    DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    let mut visited = recorder.files.clone();
    visited.sort();
    expected.sort();
    assert_eq!(visited, expected);
}

#[test]
fn test_empty_subdirectory_and_single_file() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("empty_dir")).unwrap();
    fs::write(dir.path().join("only.txt"), b"alone").unwrap();

    let mut recorder = Recorder::default();
    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    assert_eq!(summary.files_scanned, 1);
    assert_eq!(index.duplicate_count(), 0);
    assert!(recorder.events.is_empty());
    assert_eq!(recorder.errors, 0);
    assert!(!summary.has_errors());
}

#[test]
fn test_zero_byte_files_match() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1.txt")).unwrap();
    File::create(dir.path().join("empty2.txt")).unwrap();

    let (index, _summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut NullObserver)
        .unwrap();

    assert_eq!(index.duplicate_count(), 1);
    let (digest, _) = index.duplicates()[0];
    assert_eq!(
        dupefinder::scanner::hash_to_hex(digest),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}

#[test]
fn test_special_characters_in_filenames() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("file with spaces.txt"), b"content").unwrap();
    fs::write(dir.path().join("café_🦀.txt"), b"content").unwrap();
    fs::write(dir.path().join("special_!@#$%^&()_+.txt"), b"content").unwrap();

    let mut recorder = Recorder::default();
    let (index, _summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path(), &mut recorder)
        .unwrap();

    assert_eq!(recorder.events.len(), 2);
    assert_eq!(index.duplicate_count(), 1);
}

#[test]
fn test_small_buffer_finds_same_duplicates() {
    let dir = tempdir().unwrap();
    let big: Vec<u8> = (0..200_000u32).map(|i| (i % 253) as u8).collect();
    fs::write(dir.path().join("one.bin"), &big).unwrap();
    fs::write(dir.path().join("two.bin"), &big).unwrap();
    let mut changed = big.clone();
    changed[199_999] ^= 0xff;
    fs::write(dir.path().join("three.bin"), &changed).unwrap();

    let finder = DuplicateFinder::new(FinderConfig::default().with_buffer_size(1024));
    let (index, summary) = finder
        .find_duplicates(dir.path(), &mut NullObserver)
        .unwrap();

    assert_eq!(summary.bytes_hashed, 600_000);
    assert_eq!(index.duplicate_count(), 1);
    assert_eq!(index.len(), 2);
}
