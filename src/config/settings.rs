//! Effective settings for a run.
//!
//! Precedence, highest first: command-line flag, environment variable
//! (handled by clap), config file, built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::loader::load_config;
use crate::config::schema::FileConfig;
use crate::discovery::{GlobPattern, DEFAULT_PATTERN};
use crate::error::Result;
use crate::extract::{ExtractionMode, DEFAULT_HELP_FLAG, DEFAULT_TIMEOUT_SECS};
use crate::ui::ColorChoice;

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Highlighted, delimited blocks.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub script_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub pattern: Option<String>,
    pub help_flag: Option<String>,
    pub timeout_secs: Option<u64>,
    pub search_help: bool,
    pub strict: bool,
    pub color: Option<ColorChoice>,
    pub json: bool,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Directory scanned for scripts.
    pub script_dir: PathBuf,
    /// File name filter.
    pub pattern: GlobPattern,
    /// Which text scripts are searched by.
    pub mode: ExtractionMode,
    /// Flag passed to scripts in help-text mode.
    pub help_flag: String,
    /// Per-script timeout in help-text mode.
    pub timeout: Option<Duration>,
    /// Abort instead of skipping scripts that fail extraction.
    pub strict: bool,
    /// Highlight color decision.
    pub color: ColorChoice,
    /// Report format.
    pub format: OutputFormat,
}

impl SearchSettings {
    /// Resolve settings, reading the config file if one applies.
    ///
    /// `cwd` is the fallback script directory.
    pub fn resolve(overrides: &Overrides, cwd: &Path) -> Result<Self> {
        let script_dir = overrides
            .script_dir
            .clone()
            .unwrap_or_else(|| cwd.to_path_buf());
        let file = load_config(overrides.config.as_deref(), &script_dir)?;
        Self::merge(overrides, file, script_dir)
    }

    /// Combine overrides with an already loaded config file.
    pub fn merge(overrides: &Overrides, file: FileConfig, script_dir: PathBuf) -> Result<Self> {
        let pattern = overrides
            .pattern
            .clone()
            .or(file.pattern)
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

        let help_flag = overrides
            .help_flag
            .clone()
            .or(file.help_flag)
            .unwrap_or_else(|| DEFAULT_HELP_FLAG.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            script_dir,
            pattern: GlobPattern::new(&pattern)?,
            mode: if overrides.search_help {
                ExtractionMode::HelpText
            } else {
                ExtractionMode::Docstring
            },
            help_flag,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            strict: overrides.strict || file.strict.unwrap_or(false),
            color: overrides.color.or(file.color).unwrap_or_default(),
            format: if overrides.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        })
    }
}
