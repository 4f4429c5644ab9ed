use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::types::{ConvertedDocument, RunFailure, RunReport};
use crate::walker::WalkConfig;

pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    input_root: &'a Path,
    output_root: &'a Path,
    naming: String,
    converted_count: usize,
    failure_count: usize,
    resources_copied: usize,
    resource_failures: usize,
    documents: &'a [ConvertedDocument],
    skipped: &'a [PathBuf],
    failures: &'a [RunFailure],
}

/// Write a JSON summary of the run to `{output_root}/manifest.json`.
pub fn write_manifest(config: &WalkConfig, report: &RunReport) -> Result<PathBuf, ManifestError> {
    let manifest = Manifest {
        input_root: &config.input_root,
        output_root: &config.output_root,
        naming: config.naming.to_string(),
        converted_count: report.converted.len(),
        failure_count: report.failures.len(),
        resources_copied: report.resources_copied(),
        resource_failures: report.resource_failures(),
        documents: &report.converted,
        skipped: &report.skipped,
        failures: &report.failures,
    };
    let content = serde_json::to_string_pretty(&manifest)?;
    let writer = AtomicFileWriter::new(config.output_root.clone());
    Ok(writer.write(MANIFEST_FILENAME, &content)?)
}
