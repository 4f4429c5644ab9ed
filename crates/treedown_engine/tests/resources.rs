use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use treedown_engine::{copy_resources, ResourceError};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

#[test]
fn only_recognized_extensions_are_copied() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("doc_files");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.png"), b"png").unwrap();
    fs::write(src.join("b.txt"), b"text").unwrap();
    fs::write(src.join("c.svg"), b"<svg/>").unwrap();

    let dest = temp.path().join("out/src_files/doc_files");
    let report = copy_resources(&src, &dest).unwrap();

    assert_eq!(report.copied, vec![PathBuf::from("a.png"), PathBuf::from("c.svg")]);
    assert_eq!(report.skipped, 1);
    assert!(report.is_clean());
    assert_eq!(fs::read(dest.join("a.png")).unwrap(), b"png");
    assert!(dest.join("c.svg").is_file());
    assert!(!dest.join("b.txt").exists());
}

#[test]
fn nested_folders_are_recreated() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("page_files");
    fs::create_dir_all(src.join("img/icons")).unwrap();
    fs::write(src.join("img/icons/star.ico"), b"ico").unwrap();
    fs::write(src.join("script.js"), b"js").unwrap();

    let dest = temp.path().join("dest");
    let report = copy_resources(&src, &dest).unwrap();

    assert_eq!(report.copied, vec![PathBuf::from("img/icons/star.ico")]);
    assert!(dest.join("img/icons/star.ico").is_file());
    assert!(!dest.join("script.js").exists());
}

#[test]
fn existing_files_are_overwritten() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("a_files");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("pic.jpg"), b"new").unwrap();
    let dest = temp.path().join("dest");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("pic.jpg"), b"old").unwrap();

    copy_resources(&src, &dest).unwrap();
    assert_eq!(fs::read(dest.join("pic.jpg")).unwrap(), b"new");
}

#[test]
fn missing_source_is_not_a_directory() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope_files");
    let err = copy_resources(&missing, &temp.path().join("dest")).unwrap_err();
    assert!(matches!(err, ResourceError::NotADirectory(ref p) if *p == missing));

    let file = temp.path().join("file_files");
    fs::write(&file, b"x").unwrap();
    assert!(copy_resources(&file, &temp.path().join("dest")).is_err());
}

#[test]
fn one_failing_file_does_not_stop_the_rest() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("doc_files");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.png"), b"a").unwrap();
    fs::write(src.join("b.png"), b"b").unwrap();

    // A directory squatting on the target path makes the copy of a.png fail.
    let dest = temp.path().join("dest");
    fs::create_dir_all(dest.join("a.png")).unwrap();

    let report = copy_resources(&src, &dest).unwrap();
    assert_eq!(report.copied, vec![PathBuf::from("b.png")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, src.join("a.png"));
    assert!(!report.is_clean());
    assert!(dest.join("b.png").is_file());
}
