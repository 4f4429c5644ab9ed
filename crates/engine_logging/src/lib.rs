#![deny(missing_docs)]
//! Shared logging utilities for the treedown workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a per-thread document scope that prefixes log lines with the document being
//! converted, and a minimal test initializer for the global logger.

use std::cell::RefCell;

thread_local! {
    /// Label of the document currently being converted on this thread.
    static CURRENT_DOCUMENT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Guard returned by [`enter_document`]. Restores the previous label on drop.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct DocumentScope {
    previous: Option<String>,
}

impl Drop for DocumentScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_DOCUMENT.with(|cell| *cell.borrow_mut() = previous);
    }
}

/// Marks `label` as the current document until the returned guard is dropped.
pub fn enter_document(label: impl Into<String>) -> DocumentScope {
    let previous = CURRENT_DOCUMENT.with(|cell| cell.borrow_mut().replace(label.into()));
    DocumentScope { previous }
}

/// Retrieves the label of the current document for this thread, if any.
pub fn current_document() -> Option<String> {
    CURRENT_DOCUMENT.with(|cell| cell.borrow().clone())
}

/// Prefix prepended by the logging macros. Empty outside a document scope.
#[doc(hidden)]
pub fn __scope_prefix() -> String {
    match current_document() {
        Some(label) => format!("[{label}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::__scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::__scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::__scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::__scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::__scope_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
