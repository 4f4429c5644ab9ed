//! Treedown engine: filesystem walk, conversion pipeline and resource copying.
mod convert;
mod decode;
mod manifest;
mod persist;
mod pipeline;
mod resources;
mod types;
mod walker;

pub use convert::{ConvertError, Converter, Html2MdConverter, ReplacementRule};
pub use decode::{decode_html, encoding_for_label, DecodeError, DecodedHtml};
pub use manifest::{write_manifest, ManifestError, MANIFEST_FILENAME};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::DocumentPipeline;
pub use resources::{copy_resources, CopyFailure, CopyReport, ResourceError};
pub use types::{
    ConvertedDocument, DocumentOutcome, FailureKind, RunFailure, RunReport, Stage,
};
pub use walker::{TreeWalker, WalkConfig, WalkError};
