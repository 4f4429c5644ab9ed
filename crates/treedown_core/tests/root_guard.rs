use std::path::{Path, PathBuf};

use treedown_core::{check_roots, split_last_segment, UsageError};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

#[test]
fn identical_roots_are_rejected() {
    init_logging();
    let err = check_roots(Path::new("/a/docs"), Path::new("/a/docs")).unwrap_err();
    assert_eq!(err, UsageError::OutputIsInput(PathBuf::from("/a/docs")));
}

#[test]
fn roots_equal_after_normalization_are_rejected() {
    init_logging();
    let err = check_roots(Path::new("/a/docs/"), Path::new("/a/x/../docs/.")).unwrap_err();
    assert!(matches!(err, UsageError::OutputIsInput(_)));
}

#[test]
fn output_nested_in_input_is_rejected() {
    init_logging();
    let err = check_roots(Path::new("/a/docs"), Path::new("/a/docs/md")).unwrap_err();
    assert_eq!(
        err,
        UsageError::OutputInsideInput {
            input: PathBuf::from("/a/docs"),
            output: PathBuf::from("/a/docs/md"),
        }
    );
}

#[test]
fn sibling_and_parent_outputs_are_accepted() {
    init_logging();
    assert!(check_roots(Path::new("/a/docs"), Path::new("/a/docs-md")).is_ok());
    assert!(check_roots(Path::new("/a/docs"), Path::new("/a")).is_ok());
    assert!(check_roots(Path::new("/a/docs"), Path::new("/b/docs")).is_ok());
}

#[test]
fn split_last_segment_separates_parent_and_name() {
    assert_eq!(
        split_last_segment(Path::new("/a/docs")),
        (PathBuf::from("/a"), Some("docs".to_string()))
    );
    assert_eq!(
        split_last_segment(Path::new("/a/docs/")),
        (PathBuf::from("/a"), Some("docs".to_string()))
    );
    assert_eq!(split_last_segment(Path::new("/")), (PathBuf::from("/"), None));
}

#[test]
fn errors_explain_the_fix() {
    let msg = UsageError::OutputIsInput(PathBuf::from("/x")).to_string();
    assert!(msg.contains("separate directory"));
    let msg = UsageError::InvalidNaming("zip".into()).to_string();
    assert!(msg.contains("`zip`"));
}
