use std::fs;

use treedown_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir_with_parents() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("chapter1");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("md"));

    let first = writer.write("doc.md", "hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "doc.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("doc.md", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");

    // Only the target remains; no stray temp files.
    let names: Vec<_> = fs::read_dir(temp.path().join("md"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("doc.md")]);
}

#[test]
fn file_in_place_of_directory_is_reported() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let err = writer.write("doc.md", "data").unwrap_err();
    assert!(matches!(err, PersistError::NotADirectory(ref p) if *p == file_path));
    assert!(!file_path.with_file_name("doc.md").exists());
}
