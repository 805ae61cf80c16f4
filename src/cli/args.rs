//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::ui::ColorChoice;

/// Search a directory of scripts by keyword.
///
/// The output is the intersection of all provided keywords, found either
/// in the script name or in its docstring.
#[derive(Debug, Parser)]
#[command(name = "script-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keywords to search for (all must match, case-insensitive)
    #[arg(required = true, num_args = 1.., value_parser = non_empty_keyword)]
    pub keywords: Vec<String>,

    /// Search each script's full help output instead of its docstring (much slower)
    #[arg(long, alias = "search_parser")]
    pub search_parser: bool,

    /// Directory containing the scripts (defaults to the current directory)
    #[arg(short, long, env = "SCRIPT_SEARCH_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// File name glob for candidate scripts [default: *.py]
    #[arg(long, env = "SCRIPT_SEARCH_PATTERN", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Flag passed to scripts with --search-parser [default: --help]
    #[arg(long, value_name = "FLAG", allow_hyphen_values = true)]
    pub help_flag: Option<String>,

    /// Seconds to wait for each script with --search-parser; 0 waits forever [default: 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Abort on the first script that cannot be parsed or run
    #[arg(long)]
    pub strict: bool,

    /// Output matches as JSON
    #[arg(long)]
    pub json: bool,

    /// When to highlight matches
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Path to config file (overrides <DIR>/.script-search.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Settings overrides given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            script_dir: self.dir.clone(),
            config: self.config.clone(),
            pattern: self.pattern.clone(),
            help_flag: self.help_flag.clone(),
            timeout_secs: self.timeout,
            search_help: self.search_parser,
            strict: self.strict,
            color: if self.no_color {
                Some(ColorChoice::Never)
            } else {
                self.color
            },
            json: self.json,
        }
    }
}

fn non_empty_keyword(value: &str) -> Result<String, String> {
    if value.is_empty() {
        Err("keywords cannot be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}
