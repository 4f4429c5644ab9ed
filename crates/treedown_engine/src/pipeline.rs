//! Per-document conversion: read, convert, rewrite, write, copy resources.

use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info, engine_warn};
use treedown_core::{
    is_html_path, markdown_file_name, normalize_markdown, resource_folder_name,
    rewrite_image_links, UNIFIED_RESOURCE_DIR,
};

use crate::convert::Converter;
use crate::persist::AtomicFileWriter;
use crate::resources::copy_resources;
use crate::types::{ConvertedDocument, DocumentOutcome, FailureKind, RunFailure, Stage};

pub struct DocumentPipeline<'a> {
    converter: &'a dyn Converter,
}

impl<'a> DocumentPipeline<'a> {
    pub fn new(converter: &'a dyn Converter) -> Self {
        Self { converter }
    }

    /// Convert `source` into `{dest_dir}/{doc_name}.md` and bring its resource folder along.
    ///
    /// Read, conversion and write failures abort the document. Resource copy
    /// problems are recorded on the returned [`ConvertedDocument`] instead.
    pub fn run(
        &self,
        source: &Path,
        dest_dir: &Path,
        doc_name: &str,
    ) -> Result<DocumentOutcome, RunFailure> {
        let label = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        let _scope = engine_logging::enter_document(label);

        if !is_html_path(source) {
            engine_debug!("{:?} is not html, ignored", source);
            return Ok(DocumentOutcome::Skipped(source.to_path_buf()));
        }

        log_stage(Stage::Reading, source);
        let bytes = fs::read(source)
            .map_err(|e| RunFailure::new(FailureKind::ReadFailed, source, e.to_string()))?;

        log_stage(Stage::Converting, source);
        let markdown = self.converter.to_markdown(&bytes).map_err(|e| {
            RunFailure::new(FailureKind::ConversionFailed, source, e.to_string())
        })?;

        log_stage(Stage::Rewriting, source);
        let rewrite = rewrite_image_links(&normalize_markdown(&markdown));
        engine_debug!(
            "Rewrote {} image reference(s), kept {}",
            rewrite.rewritten,
            rewrite.untouched
        );

        log_stage(Stage::Writing, dest_dir);
        let writer = AtomicFileWriter::new(dest_dir.to_path_buf());
        let output = writer
            .write(&markdown_file_name(doc_name), &rewrite.markdown)
            .map_err(|e| RunFailure::new(FailureKind::WriteFailed, source, e.to_string()))?;
        engine_info!("Converted {:?} -> {:?}", source, output);

        let mut document = ConvertedDocument {
            source: source.to_path_buf(),
            output,
            images_rewritten: rewrite.rewritten,
            resources: None,
            resource_error: None,
        };

        if let Some((folder, folder_name)) = resource_folder_of(source) {
            log_stage(Stage::CopyingResources, &folder);
            let target = dest_dir.join(UNIFIED_RESOURCE_DIR).join(&folder_name);
            match copy_resources(&folder, &target) {
                Ok(report) => {
                    engine_info!(
                        "Resource folder {:?} copied ({} file(s), {} failed)",
                        folder,
                        report.copied.len(),
                        report.failures.len()
                    );
                    document.resources = Some(report);
                }
                Err(err) => {
                    engine_warn!("Resource folder {:?} not copied: {}", folder, err);
                    document.resource_error = Some(err.to_string());
                }
            }
        }

        log_stage(Stage::Done, source);
        Ok(DocumentOutcome::Converted(document))
    }
}

/// The `<stem>_files` directory next to `source`, if there is one.
fn resource_folder_of(source: &Path) -> Option<(PathBuf, String)> {
    let stem = source.file_stem()?.to_string_lossy();
    let folder_name = resource_folder_name(&stem);
    let folder = source.parent()?.join(&folder_name);
    folder.is_dir().then_some((folder, folder_name))
}

fn log_stage(stage: Stage, path: &Path) {
    engine_debug!("{}: {:?}", stage, path);
}
