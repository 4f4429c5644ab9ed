//! Command line definition for `treedown`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use treedown_core::NamingPolicy;

use crate::logging::LogOptions;

#[derive(Parser, Debug)]
#[command(name = "treedown")]
#[command(about = "Convert a directory tree of saved HTML pages into Markdown")]
#[command(version)]
pub struct Cli {
    /// Directory holding the saved pages [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory receiving the Markdown tree [default: current directory]
    ///
    /// Must not be the input directory or lie inside it, so with the input
    /// defaulted to the current directory the output has to be elsewhere.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Name each Markdown file after the html file or its parent directory
    #[arg(long, value_enum, default_value_t = NameBy::Html)]
    pub nameby: NameBy,

    /// Force the source encoding (WHATWG label such as gbk or shift_jis)
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Write manifest.json describing the run into the output root
    #[arg(long)]
    pub manifest: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log every pipeline stage
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NameBy {
    /// `<stem>.md` next to where the html file sat
    Html,
    /// `<directory>.md` one level up, named after the containing directory
    Dir,
}

impl From<NameBy> for NamingPolicy {
    fn from(value: NameBy) -> Self {
        match value {
            NameBy::Html => NamingPolicy::Html,
            NameBy::Dir => NamingPolicy::Dir,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            level: self.log_level(),
            file: self.log_file.clone(),
        }
    }
}
