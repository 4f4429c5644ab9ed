//! Filename predicates deciding what the walker converts, copies or skips.

use std::path::Path;

const HTML_EXTENSIONS: &[&str] = &[".html", ".htm", ".xhtml", ".xhtm", ".shtml"];

/// Image and document formats carried over from resource folders.
const RESOURCE_EXTENSIONS: &[&str] = &[
    ".avif", ".png", ".jpg", ".jpeg", ".jfif", ".pjpeg", ".pjp", ".gif", ".svg", ".svgz", ".bmp",
    ".pdf", ".eps", ".tiff", ".tif", ".ico", ".webp", ".xbm",
];

/// Suffix browsers give the asset folder saved next to a page.
pub const RESOURCE_FOLDER_SUFFIX: &str = "_files";

pub fn is_html(name: &str) -> bool {
    ends_with_any(name, HTML_EXTENSIONS)
}

pub fn is_resource_file(name: &str) -> bool {
    ends_with_any(name, RESOURCE_EXTENSIONS)
}

pub fn is_resource_folder(name: &str) -> bool {
    name.to_lowercase().ends_with(RESOURCE_FOLDER_SUFFIX)
}

/// Name of the resource folder that belongs to a document with base name `stem`.
pub fn resource_folder_name(stem: &str) -> String {
    format!("{stem}{RESOURCE_FOLDER_SUFFIX}")
}

/// [`is_html`] applied to the final component of `path`.
pub fn is_html_path(path: &Path) -> bool {
    file_name(path).is_some_and(is_html)
}

/// [`is_resource_file`] applied to the final component of `path`.
pub fn is_resource_path(path: &Path) -> bool {
    file_name(path).is_some_and(is_resource_file)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn ends_with_any(name: &str, suffixes: &[&str]) -> bool {
    let lower = name.to_lowercase();
    suffixes.iter().any(|suffix| lower.ends_with(suffix))
}
