use std::collections::{BTreeMap, HashMap};

use encoding_rs::Encoding;
use engine_logging::engine_debug;
use html2md::{Handle, NodeData, StructuredPrinter, TagHandler, TagHandlerFactory};

use crate::decode::{decode_html, DecodeError};

/// Turns raw HTML bytes into Markdown text.
pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &[u8]) -> Result<String, ConvertError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// What the converter does with a matching element instead of its default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementRule {
    /// Emit the element's text content verbatim, without Markdown interpretation.
    PreserveText,
    /// Drop the element and everything inside it.
    Skip,
    /// Render `<input type="checkbox">` as a task-list marker, `[x] ` or `[ ] `.
    TaskCheckbox,
}

/// `html2md`-backed converter with a fixed table of per-tag rules.
///
/// Built once before the walk starts and shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct Html2MdConverter {
    rules: BTreeMap<String, ReplacementRule>,
    forced_encoding: Option<&'static Encoding>,
}

impl Html2MdConverter {
    pub fn new() -> Self {
        let rules = [
            ("textarea", ReplacementRule::PreserveText),
            ("head", ReplacementRule::Skip),
            ("script", ReplacementRule::Skip),
            ("style", ReplacementRule::Skip),
            ("noscript", ReplacementRule::Skip),
            ("input", ReplacementRule::TaskCheckbox),
        ]
        .into_iter()
        .map(|(tag, rule)| (tag.to_string(), rule))
        .collect();
        Self {
            rules,
            forced_encoding: None,
        }
    }

    /// Install (or replace) the rule for `tag`.
    pub fn with_rule(mut self, tag: &str, rule: ReplacementRule) -> Self {
        self.rules.insert(tag.to_ascii_lowercase(), rule);
        self
    }

    /// Decode every document with `encoding` unless it carries a BOM.
    ///
    /// Bytes that are malformed in `encoding` fail the document instead of
    /// being replaced.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.forced_encoding = Some(encoding);
        self
    }

    pub fn rule_for(&self, tag: &str) -> Option<ReplacementRule> {
        self.rules.get(tag).copied()
    }

    fn handler_table(&self) -> HashMap<String, Box<dyn TagHandlerFactory>> {
        self.rules
            .iter()
            .map(|(tag, rule)| {
                let factory: Box<dyn TagHandlerFactory> = Box::new(RuleFactory(*rule));
                (tag.clone(), factory)
            })
            .collect()
    }
}

impl Default for Html2MdConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &[u8]) -> Result<String, ConvertError> {
        let decoded = decode_html(html, self.forced_encoding)?;
        engine_debug!(
            "Decoded {} bytes as {}",
            html.len(),
            decoded.encoding_label
        );
        Ok(html2md::parse_html_custom(&decoded.html, &self.handler_table()))
    }
}

struct RuleFactory(ReplacementRule);

impl TagHandlerFactory for RuleFactory {
    fn instantiate(&self) -> Box<dyn TagHandler> {
        match self.0 {
            ReplacementRule::PreserveText => Box::new(PreserveTextHandler),
            ReplacementRule::Skip => Box::new(SkipHandler),
            ReplacementRule::TaskCheckbox => Box::new(TaskCheckboxHandler),
        }
    }
}

struct PreserveTextHandler;

impl TagHandler for PreserveTextHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        let mut text = String::new();
        collect_text(tag, &mut text);
        printer.append_str(&text);
    }

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}

fn collect_text(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            out.push_str(&contents.borrow());
        }
        collect_text(child, out);
    }
}

struct SkipHandler;

impl TagHandler for SkipHandler {
    fn handle(&mut self, _tag: &Handle, _printer: &mut StructuredPrinter) {}

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}

struct TaskCheckboxHandler;

impl TagHandler for TaskCheckboxHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        let NodeData::Element { attrs, .. } = &tag.data else {
            return;
        };
        let attrs = attrs.borrow();
        let is_checkbox = attrs.iter().any(|a| {
            &*a.name.local == "type" && a.value.eq_ignore_ascii_case("checkbox")
        });
        if !is_checkbox {
            return;
        }
        let checked = attrs.iter().any(|a| &*a.name.local == "checked");
        printer.append_str(if checked { "[x] " } else { "[ ] " });
    }

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}
