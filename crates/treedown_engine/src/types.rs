use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::resources::CopyReport;

/// Steps of the per-document pipeline, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Reading,
    Converting,
    Rewriting,
    Writing,
    CopyingResources,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Reading => "reading",
            Stage::Converting => "converting",
            Stage::Rewriting => "rewriting links",
            Stage::Writing => "writing",
            Stage::CopyingResources => "copying resources",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// A directory below the input root could not be listed; its subtree was skipped.
    DirectoryList,
    ReadFailed,
    ConversionFailed,
    WriteFailed,
    /// Another document of this run already produced the same Markdown file.
    OutputCollision { first_source: PathBuf },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::DirectoryList => write!(f, "directory listing failed"),
            FailureKind::ReadFailed => write!(f, "read failed"),
            FailureKind::ConversionFailed => write!(f, "conversion failed"),
            FailureKind::WriteFailed => write!(f, "write failed"),
            FailureKind::OutputCollision { first_source } => {
                write!(f, "output already written for {}", first_source.display())
            }
        }
    }
}

/// A document or subtree that did not make it into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFailure {
    pub kind: FailureKind,
    pub path: PathBuf,
    pub message: String,
}

impl RunFailure {
    pub(crate) fn new(kind: FailureKind, path: &Path, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path.display(), self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedDocument {
    pub source: PathBuf,
    pub output: PathBuf,
    pub images_rewritten: usize,
    /// Present when the document had a resource folder.
    pub resources: Option<CopyReport>,
    /// Set when the resource folder was found but could not be copied at all.
    pub resource_error: Option<String>,
}

impl ConvertedDocument {
    /// Resource files (or whole folders) that failed to copy.
    pub fn resource_failure_count(&self) -> usize {
        let per_file = self.resources.as_ref().map_or(0, |r| r.failures.len());
        per_file + usize::from(self.resource_error.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Converted(ConvertedDocument),
    /// Dispatched to the pipeline but not an HTML file.
    Skipped(PathBuf),
}

/// Everything one walk produced, gathered for reporting at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    pub converted: Vec<ConvertedDocument>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<RunFailure>,
}

impl RunReport {
    pub fn resources_copied(&self) -> usize {
        self.converted
            .iter()
            .filter_map(|doc| doc.resources.as_ref())
            .map(|r| r.copied.len())
            .sum()
    }

    pub fn resource_failures(&self) -> usize {
        self.converted
            .iter()
            .map(ConvertedDocument::resource_failure_count)
            .sum()
    }

    /// True when no document, subtree or resource failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.resource_failures() == 0
    }
}
