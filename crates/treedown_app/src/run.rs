//! One conversion run: resolve flags, walk the tree, report, pick the exit code.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use engine_logging::{engine_info, engine_warn};
use thiserror::Error;
use treedown_core::UsageError;
use treedown_engine::{
    encoding_for_label, write_manifest, DecodeError, Html2MdConverter, RunReport, TreeWalker,
    WalkConfig, WalkError,
};

use crate::cli::Cli;

/// Process exit codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every document converted and every resource copied.
    Clean = 0,
    /// The input root could not be listed or the manifest could not be written.
    Fatal = 1,
    /// Bad flags or colliding roots; nothing was written.
    Usage = 2,
    /// The walk finished but some documents, subtrees or resources failed.
    Incomplete = 3,
}

impl ExitStatus {
    pub fn for_report(report: &RunReport) -> Self {
        if report.is_clean() {
            ExitStatus::Clean
        } else {
            ExitStatus::Incomplete
        }
    }

    pub fn for_error(err: &anyhow::Error) -> Self {
        if is_usage_error(err) {
            ExitStatus::Usage
        } else {
            ExitStatus::Fatal
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("give --input or --output (both default to the current directory)")]
    RootsNotGiven,
}

pub struct RunSummary {
    pub report: RunReport,
    pub manifest: Option<PathBuf>,
}

pub fn execute(cli: &Cli) -> Result<RunSummary> {
    let config = resolve_config(cli)?;

    let mut converter = Html2MdConverter::new();
    if let Some(label) = &cli.encoding {
        let encoding = encoding_for_label(label).context("invalid --encoding")?;
        engine_info!("Forcing source encoding {}", encoding.name());
        converter = converter.with_encoding(encoding);
    }

    let walker = TreeWalker::new(config, &converter).context("cannot start conversion")?;
    let config = walker.config().clone();
    let report = walker.run().context("conversion aborted")?;

    let manifest = if cli.manifest {
        let path = write_manifest(&config, &report).context("cannot write manifest")?;
        engine_info!("Manifest written to {:?}", path);
        Some(path)
    } else {
        None
    };

    Ok(RunSummary { report, manifest })
}

fn resolve_config(cli: &Cli) -> Result<WalkConfig> {
    if cli.input.is_none() && cli.output.is_none() {
        return Err(CliError::RootsNotGiven.into());
    }
    let cwd = env::current_dir().context("cannot read current directory")?;
    Ok(WalkConfig {
        input_root: cli.input.clone().unwrap_or_else(|| cwd.clone()),
        output_root: cli.output.clone().unwrap_or(cwd),
        naming: cli.nameby.into(),
    })
}

fn is_usage_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<UsageError>()
            || cause.is::<CliError>()
            || matches!(cause.downcast_ref::<WalkError>(), Some(WalkError::Usage(_)))
            || matches!(
                cause.downcast_ref::<DecodeError>(),
                Some(DecodeError::UnknownLabel(_))
            )
    })
}

/// Print the end-of-run summary; failures go to stderr.
pub fn print_summary(summary: &RunSummary) {
    let report = &summary.report;
    println!(
        "Converted {} document(s), copied {} resource file(s).",
        report.converted.len(),
        report.resources_copied()
    );
    if let Some(path) = &summary.manifest {
        println!("Manifest: {}", path.display());
    }

    if !report.failures.is_empty() {
        eprintln!("{} document(s) or folder(s) failed:", report.failures.len());
        for failure in &report.failures {
            eprintln!("  {failure}");
        }
    }

    for doc in &report.converted {
        if let Some(err) = &doc.resource_error {
            eprintln!("  {}: resources not copied ({err})", doc.source.display());
        }
        for failure in doc.resources.iter().flat_map(|r| &r.failures) {
            eprintln!(
                "  {}: resource not copied ({})",
                failure.path.display(),
                failure.message
            );
        }
    }

    if !report.is_clean() {
        engine_warn!(
            "Run finished with {} failure(s) and {} resource failure(s)",
            report.failures.len(),
            report.resource_failures()
        );
    }
}
