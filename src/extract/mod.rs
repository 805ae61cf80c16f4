//! Searchable text extraction.
//!
//! Each discovered script yields one piece of text that keywords are
//! matched against, in addition to its file name:
//!
//! - [`DocstringExtractor`] (fast) reads the leading docstring statically
//! - [`HelpTextExtractor`] (slow) runs the script with a help flag and
//!   captures what it prints

pub mod docstring;

use std::fmt;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::discovery::ScriptFile;
use crate::error::{Result, SearchError};
use crate::shell::{execute_output, CommandOptions};

/// Default help-request flag for slow mode.
pub const DEFAULT_HELP_FLAG: &str = "--help";

/// Default per-script timeout for slow mode, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which text a script is searched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Leading docstring, parsed without running the script.
    #[default]
    Docstring,
    /// Output of running the script with a help flag.
    HelpText,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docstring => write!(f, "docstring"),
            Self::HelpText => write!(f, "help_text"),
        }
    }
}

/// Produces the searchable text for a script.
pub trait TextExtractor {
    /// Extract text for `script`. An empty string means "nothing to show".
    fn extract(&self, script: &ScriptFile) -> Result<String>;
}

/// Fast mode: static docstring extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocstringExtractor;

impl TextExtractor for DocstringExtractor {
    fn extract(&self, script: &ScriptFile) -> Result<String> {
        docstring::read_docstring(&script.path)?.map_err(|e| SearchError::MalformedSource {
            path: script.path.clone(),
            line: e.line,
            message: e.message,
        })
    }
}

/// Slow mode: run the script with a help flag and capture stdout.
#[derive(Debug, Clone)]
pub struct HelpTextExtractor {
    help_flag: String,
    timeout: Option<Duration>,
}

impl Default for HelpTextExtractor {
    fn default() -> Self {
        Self::new(
            DEFAULT_HELP_FLAG,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        )
    }
}

impl HelpTextExtractor {
    /// Create an extractor passing `help_flag`, bounded by `timeout`.
    pub fn new(help_flag: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            help_flag: help_flag.into(),
            timeout,
        }
    }

    /// The flag passed to each script.
    pub fn help_flag(&self) -> &str {
        &self.help_flag
    }
}

impl TextExtractor for HelpTextExtractor {
    fn extract(&self, script: &ScriptFile) -> Result<String> {
        // Absolute so the path still resolves once cwd is the script dir.
        let program = fs::canonicalize(&script.path)?;
        let options = CommandOptions {
            cwd: program.parent().map(|p| p.to_path_buf()),
            timeout: self.timeout,
        };
        execute_output(&program, &[self.help_flag.as_str()], &options)
    }
}

/// Build the extractor for a mode.
pub fn extractor_for(
    mode: ExtractionMode,
    help_flag: &str,
    timeout: Option<Duration>,
) -> Box<dyn TextExtractor> {
    match mode {
        ExtractionMode::Docstring => Box::new(DocstringExtractor),
        ExtractionMode::HelpText => Box::new(HelpTextExtractor::new(help_flag, timeout)),
    }
}
