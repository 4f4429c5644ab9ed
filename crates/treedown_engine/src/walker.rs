//! Recursive walk of the input root, mirroring its layout under the output root.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info, engine_warn};
use thiserror::Error;
use treedown_core::{
    check_roots, is_html, is_resource_folder, normalize_lexically, plan_output,
    split_last_segment, NamingPolicy, UsageError,
};

use crate::convert::Converter;
use crate::pipeline::DocumentPipeline;
use crate::types::{DocumentOutcome, FailureKind, RunFailure, RunReport};

/// Name used by [`NamingPolicy::Dir`] when the input root has no final segment.
const FALLBACK_ROOT_NAME: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub naming: NamingPolicy,
}

#[derive(Debug, Error)]
pub enum WalkError {
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("cannot resolve {path}: {source}")]
    Resolve { path: PathBuf, source: io::Error },
    #[error("cannot list input root {path}: {source}")]
    RootUnreadable { path: PathBuf, source: io::Error },
}

struct ListedEntry {
    name: OsString,
    is_dir: bool,
}

pub struct TreeWalker<'a> {
    config: WalkConfig,
    pipeline: DocumentPipeline<'a>,
    root_name: String,
    /// Markdown files written during this run, mapped to the document that produced them.
    emitted: HashMap<PathBuf, PathBuf>,
    /// Canonical paths of the directories currently being visited, root first.
    ancestors: Vec<PathBuf>,
    report: RunReport,
}

impl<'a> TreeWalker<'a> {
    /// Resolve both roots and check that the output cannot land on the input.
    pub fn new(config: WalkConfig, converter: &'a dyn Converter) -> Result<Self, WalkError> {
        if !config.input_root.is_dir() {
            return Err(UsageError::InputNotADirectory(config.input_root).into());
        }
        let input_root = resolve_existing(&config.input_root)?;
        let output_root = resolve_maybe_missing(&config.output_root)?;
        check_roots(&input_root, &output_root)?;

        let root_name = split_last_segment(&input_root)
            .1
            .unwrap_or_else(|| FALLBACK_ROOT_NAME.to_string());

        Ok(Self {
            config: WalkConfig {
                input_root,
                output_root,
                naming: config.naming,
            },
            pipeline: DocumentPipeline::new(converter),
            root_name,
            emitted: HashMap::new(),
            ancestors: Vec::new(),
            report: RunReport::default(),
        })
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walk the whole tree. Only an unreadable input root fails the run;
    /// everything below it is collected into the report.
    pub fn run(mut self) -> Result<RunReport, WalkError> {
        let root = self.config.input_root.clone();
        engine_info!(
            "Converting {:?} -> {:?} (naming by {})",
            root,
            self.config.output_root,
            self.config.naming
        );
        let entries = list_dir(&root).map_err(|source| WalkError::RootUnreadable {
            path: root.clone(),
            source,
        })?;
        self.ancestors.push(root);
        self.visit_entries(Path::new(""), entries);
        engine_info!(
            "Walk finished: {} converted, {} failed",
            self.report.converted.len(),
            self.report.failures.len()
        );
        Ok(self.report)
    }

    fn visit_dir(&mut self, rel_dir: &Path) {
        let dir = self.config.input_root.join(rel_dir);
        engine_info!("[{}]", dir.display());

        // Symlinked directories are followed, so a link back to an ancestor would recurse forever.
        let canonical = match dunce::canonicalize(&dir) {
            Ok(path) => path,
            Err(err) => return self.skip_subtree(&dir, err.to_string()),
        };
        if let Some(target) = self.ancestors.iter().find(|a| **a == canonical) {
            let message = format!("symlink loop back to {}", target.display());
            return self.skip_subtree(&dir, message);
        }

        match list_dir(&dir) {
            Ok(entries) => {
                self.ancestors.push(canonical);
                self.visit_entries(rel_dir, entries);
                self.ancestors.pop();
            }
            Err(err) => self.skip_subtree(&dir, err.to_string()),
        }
    }

    fn skip_subtree(&mut self, dir: &Path, message: String) {
        engine_warn!("Cannot list {:?}, skipping subtree: {}", dir, message);
        self.report
            .failures
            .push(RunFailure::new(FailureKind::DirectoryList, dir, message));
    }

    fn visit_entries(&mut self, rel_dir: &Path, entries: Vec<ListedEntry>) {
        for entry in entries {
            let name = entry.name.to_string_lossy();
            if entry.is_dir {
                if is_resource_folder(&name) {
                    engine_debug!("Resource folder {:?} handled with its document", name);
                    continue;
                }
                self.visit_dir(&rel_dir.join(&entry.name));
            } else if is_html(&name) {
                self.convert_document(rel_dir, &entry.name);
            }
        }
    }

    fn convert_document(&mut self, rel_dir: &Path, file_name: &OsString) {
        let source = self.config.input_root.join(rel_dir).join(file_name);
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let plan = plan_output(self.config.naming, rel_dir, &stem, &self.root_name);
        let output = self.config.output_root.join(plan.relative_path());

        if let Some(first) = self.emitted.get(&output) {
            engine_warn!(
                "{:?} would overwrite {:?} written for {:?}",
                source,
                output,
                first
            );
            let failure = RunFailure::new(
                FailureKind::OutputCollision {
                    first_source: first.clone(),
                },
                &source,
                format!("{} is already produced by another document", output.display()),
            );
            self.report.failures.push(failure);
            return;
        }

        let dest_dir = self.config.output_root.join(&plan.dest_dir);
        match self.pipeline.run(&source, &dest_dir, &plan.doc_name) {
            Ok(DocumentOutcome::Converted(doc)) => {
                self.emitted.insert(output, source);
                self.report.converted.push(doc);
            }
            Ok(DocumentOutcome::Skipped(path)) => self.report.skipped.push(path),
            Err(failure) => {
                engine_warn!("{}", failure);
                self.report.failures.push(failure);
            }
        }
    }
}

/// Directory entries sorted by name so runs are reproducible.
fn list_dir(dir: &Path) -> io::Result<Vec<ListedEntry>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| {
            entry.map(|e| ListedEntry {
                is_dir: e.path().is_dir(),
                name: e.file_name(),
            })
        })
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn resolve_existing(path: &Path) -> Result<PathBuf, WalkError> {
    dunce::canonicalize(path).map_err(|source| WalkError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the rest.
fn resolve_maybe_missing(path: &Path) -> Result<PathBuf, WalkError> {
    let absolute = std::path::absolute(path)
        .map(|p| normalize_lexically(&p))
        .map_err(|source| WalkError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
    let mut resolved = resolve_existing(existing)?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}
