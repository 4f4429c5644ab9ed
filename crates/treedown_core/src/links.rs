//! Text-level rewriting of the Markdown produced by the converter.

use std::sync::LazyLock;

use regex::Regex;

/// Directory, relative to each output directory, that holds every copied resource folder.
pub const UNIFIED_RESOURCE_DIR: &str = "src_files";

const RESOURCE_PREFIX: &str = "src_files/";
const DATA_URI_SCHEME: &str = "data:";

/// Opening of an image reference up to and including `(`.
///
/// Accepts `![caption](` and `![[caption]](`. Captions are limited to word
/// characters (Unicode, so CJK ideographs match), `-_.`, space and the CJK
/// punctuation that shows up in saved Chinese pages.
static IMAGE_REF_OPENING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[{1,2}[-_. \w！“”。，：；]*\]{1,2}\(").expect("image reference pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub markdown: String,
    /// References that received the `src_files/` prefix.
    pub rewritten: usize,
    /// References left alone (`data:` URIs or already prefixed).
    pub untouched: usize,
}

/// Point every image reference at the unified resource folder.
///
/// `![x](a.png)` becomes `![x](src_files/a.png)`. Embedded `data:` images and
/// targets already under `src_files/` are left as they are, so applying the
/// rewrite twice changes nothing.
pub fn rewrite_image_links(markdown: &str) -> LinkRewrite {
    let mut out = String::with_capacity(markdown.len());
    let mut rewritten = 0;
    let mut untouched = 0;
    let mut last = 0;

    for opening in IMAGE_REF_OPENING.find_iter(markdown) {
        out.push_str(&markdown[last..opening.end()]);
        let target = &markdown[opening.end()..];
        if target.starts_with(DATA_URI_SCHEME) || target.starts_with(RESOURCE_PREFIX) {
            untouched += 1;
        } else {
            out.push_str(RESOURCE_PREFIX);
            rewritten += 1;
        }
        last = opening.end();
    }
    out.push_str(&markdown[last..]);

    LinkRewrite {
        markdown: out,
        rewritten,
        untouched,
    }
}

/// Drop the backslash escapes the converter sprinkles over plain text.
pub fn normalize_markdown(markdown: &str) -> String {
    markdown.replace('\\', "")
}
