use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::UsageError;

const MARKDOWN_EXTENSION: &str = ".md";

/// How the Markdown file for a document is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// After the HTML file itself; suits directories holding several pages.
    #[default]
    Html,
    /// After the directory holding the HTML file; suits one `index.html` per folder.
    Dir,
}

impl FromStr for NamingPolicy {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(NamingPolicy::Html),
            "dir" => Ok(NamingPolicy::Dir),
            other => Err(UsageError::InvalidNaming(other.to_string())),
        }
    }
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingPolicy::Html => write!(f, "html"),
            NamingPolicy::Dir => write!(f, "dir"),
        }
    }
}

/// Where a document lands, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub dest_dir: PathBuf,
    pub doc_name: String,
}

impl OutputPlan {
    pub fn file_name(&self) -> String {
        markdown_file_name(&self.doc_name)
    }

    pub fn relative_path(&self) -> PathBuf {
        self.dest_dir.join(self.file_name())
    }
}

/// Decide the output directory and name for an HTML file.
///
/// `rel_dir` is the directory holding the file, relative to the input root.
/// `stem` is the file name without its last extension and `root_name` the
/// input root's own directory name, used by [`NamingPolicy::Dir`] for pages
/// that sit directly in the root.
pub fn plan_output(policy: NamingPolicy, rel_dir: &Path, stem: &str, root_name: &str) -> OutputPlan {
    match policy {
        NamingPolicy::Html => OutputPlan {
            dest_dir: rel_dir.to_path_buf(),
            doc_name: stem.to_string(),
        },
        NamingPolicy::Dir => match rel_dir.file_name().and_then(|n| n.to_str()) {
            Some(parent_name) => OutputPlan {
                dest_dir: rel_dir.parent().map(Path::to_path_buf).unwrap_or_default(),
                doc_name: parent_name.to_string(),
            },
            None => OutputPlan {
                dest_dir: PathBuf::new(),
                doc_name: root_name.to_string(),
            },
        },
    }
}

/// `name` with `.md` appended unless it already ends in `.md`.
pub fn markdown_file_name(name: &str) -> String {
    if name.ends_with(MARKDOWN_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{MARKDOWN_EXTENSION}")
    }
}
