//! Input/output root checks run before anything is written.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("invalid --nameby value `{0}` (expected `html` or `dir`)")]
    InvalidNaming(String),
    #[error("input root {0} is not a directory")]
    InputNotADirectory(PathBuf),
    #[error(
        "output root {0} is the input root; give the Markdown files a separate directory"
    )]
    OutputIsInput(PathBuf),
    #[error(
        "output root {output} lies inside input root {input}; give the Markdown files a separate directory"
    )]
    OutputInsideInput { input: PathBuf, output: PathBuf },
}

/// Reject output roots that would land the Markdown tree on top of its source.
///
/// Both paths are compared after [`normalize_lexically`], so callers should
/// pass absolute paths.
pub fn check_roots(input: &Path, output: &Path) -> Result<(), UsageError> {
    let input = normalize_lexically(input);
    let output = normalize_lexically(output);

    if input == output {
        return Err(UsageError::OutputIsInput(output));
    }
    if output.starts_with(&input) {
        return Err(UsageError::OutputInsideInput { input, output });
    }
    Ok(())
}

/// Resolve `.` and `..` without touching the filesystem.
///
/// `..` above the root of an absolute path is dropped; on a relative path it
/// is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    out.push("..");
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Split `path` into its parent and final segment.
///
/// `/a/docs` gives `(/a, Some("docs"))`; a bare root has no final segment.
pub fn split_last_segment(path: &Path) -> (PathBuf, Option<String>) {
    let normalized = normalize_lexically(path);
    let last = normalized
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let parent = match last {
        Some(_) => normalized
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        None => normalized,
    };
    (parent, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_dots() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c/")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_lexically(Path::new("../x")), PathBuf::from("../x"));
    }
}
