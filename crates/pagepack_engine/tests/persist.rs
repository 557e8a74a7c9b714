use std::fs;

use pagepack_engine::{ensure_output_dir, ArchiveStore};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn persist_writes_archive_and_reports_length() {
    let temp = TempDir::new().unwrap();
    let store = ArchiveStore::new(temp.path().join("downloads"));

    let written = store.persist("My_Title", b"archive-bytes").unwrap();
    assert_eq!(written, "archive-bytes".len() as u64);

    let target = store.archive_path("My_Title");
    assert_eq!(target.file_name().unwrap(), "My_Title.zip");
    assert_eq!(fs::read(&target).unwrap(), b"archive-bytes");
    assert_eq!(fs::metadata(&target).unwrap().len(), written);
}

#[test]
fn persist_twice_overwrites_in_place() {
    let temp = TempDir::new().unwrap();
    let store = ArchiveStore::new(temp.path().to_path_buf());

    store.persist("page", b"first").unwrap();
    let written = store.persist("page", b"second!").unwrap();

    assert_eq!(written, "second!".len() as u64);
    assert_eq!(fs::read(store.archive_path("page")).unwrap(), b"second!");
    // Only the one archive, no duplicates next to it.
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn no_partial_file_when_root_is_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let store = ArchiveStore::new(file_path.clone());
    assert!(store.persist("page", b"data").is_err());
    assert!(!file_path.with_file_name("page.zip").exists());
}
