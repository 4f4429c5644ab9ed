use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use treedown_core::{markdown_file_name, plan_output, NamingPolicy, OutputPlan, UsageError};

#[test]
fn html_policy_names_after_the_file() {
    let plan = plan_output(NamingPolicy::Html, Path::new("chapter1"), "page", "docs");
    assert_eq!(
        plan,
        OutputPlan {
            dest_dir: PathBuf::from("chapter1"),
            doc_name: "page".to_string(),
        }
    );
    assert_eq!(plan.relative_path(), PathBuf::from("chapter1/page.md"));
}

#[test]
fn dir_policy_names_after_the_parent_and_moves_up() {
    let plan = plan_output(NamingPolicy::Dir, Path::new("report"), "index", "docs");
    assert_eq!(plan.dest_dir, PathBuf::new());
    assert_eq!(plan.doc_name, "report");
    assert_eq!(plan.relative_path(), PathBuf::from("report.md"));

    let nested = plan_output(NamingPolicy::Dir, Path::new("guide/setup"), "index", "docs");
    assert_eq!(nested.relative_path(), PathBuf::from("guide/setup.md"));
}

#[test]
fn dir_policy_at_the_root_uses_the_root_name() {
    let plan = plan_output(NamingPolicy::Dir, Path::new(""), "index", "docs");
    assert_eq!(plan.relative_path(), PathBuf::from("docs.md"));
}

#[test]
fn md_suffix_is_not_doubled() {
    assert_eq!(markdown_file_name("notes"), "notes.md");
    assert_eq!(markdown_file_name("notes.md"), "notes.md");
}

#[test]
fn naming_policy_parses_known_values_only() {
    assert_eq!("html".parse::<NamingPolicy>(), Ok(NamingPolicy::Html));
    assert_eq!("dir".parse::<NamingPolicy>(), Ok(NamingPolicy::Dir));
    assert_eq!(
        "folder".parse::<NamingPolicy>(),
        Err(UsageError::InvalidNaming("folder".to_string()))
    );
    assert_eq!(NamingPolicy::default(), NamingPolicy::Html);
    assert_eq!(NamingPolicy::Dir.to_string(), "dir");
}
