//! Copying a document's resource folder into the unified resource folder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_warn};
use serde::Serialize;
use thiserror::Error;
use treedown_core::is_resource_path;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource folder {0} is missing or not a directory")]
    NotADirectory(PathBuf),
}

/// One resource file that could not be copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a best-effort resource copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CopyReport {
    /// Copied files, relative to the source folder.
    pub copied: Vec<PathBuf>,
    /// Files left behind because they are not images or documents.
    pub skipped: usize,
    pub failures: Vec<CopyFailure>,
}

impl CopyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Copy every resource file under `src` to the same relative path under `dest`.
///
/// Missing directories are created and existing files overwritten. A failure
/// on one file is recorded and the copy moves on to the next.
pub fn copy_resources(src: &Path, dest: &Path) -> Result<CopyReport, ResourceError> {
    if !src.is_dir() {
        return Err(ResourceError::NotADirectory(src.to_path_buf()));
    }

    let mut report = CopyReport::default();
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(src).to_path_buf();
                engine_warn!("Cannot read {:?} while copying resources: {}", path, err);
                report.failures.push(CopyFailure {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !is_resource_path(entry.path()) {
            engine_debug!("Skipping non-resource file {:?}", entry.path());
            report.skipped += 1;
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };

        let target = dest.join(relative);
        match copy_file(entry.path(), &target) {
            Ok(bytes) => {
                engine_debug!("Copied {:?} -> {:?} ({} bytes)", entry.path(), target, bytes);
                report.copied.push(relative.to_path_buf());
            }
            Err(err) => {
                engine_warn!("Failed to copy {:?} -> {:?}: {}", entry.path(), target, err);
                report.failures.push(CopyFailure {
                    path: entry.path().to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }
    Ok(report)
}

fn copy_file(src: &Path, target: &Path) -> io::Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, target)
}
