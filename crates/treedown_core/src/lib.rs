//! Treedown core: pure path classification, naming and link rewriting.
mod classify;
mod guard;
mod links;
mod naming;

pub use classify::{
    is_html, is_html_path, is_resource_file, is_resource_folder, is_resource_path,
    resource_folder_name, RESOURCE_FOLDER_SUFFIX,
};
pub use guard::{check_roots, normalize_lexically, split_last_segment, UsageError};
pub use links::{normalize_markdown, rewrite_image_links, LinkRewrite, UNIFIED_RESOURCE_DIR};
pub use naming::{markdown_file_name, plan_output, NamingPolicy, OutputPlan};
