//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for turning parsed arguments into a command

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::SearchSettings;
use crate::error::Result;
use crate::matcher::KeywordSet;
use crate::ui::ColorChoice;

use super::search::SearchCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the report (stdout in the binary)
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,

    /// Number of scripts reported.
    pub matches: usize,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success(matches: usize) -> Self {
        Self {
            success: true,
            exit_code: 0,
            matches,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
            matches: 0,
        }
    }
}

/// Builds and runs the search for parsed arguments.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher; `working_dir` is the default script directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve settings and execute the search.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let settings = SearchSettings::resolve(&cli.overrides(), &self.working_dir)?;
        let keywords = KeywordSet::new(cli.keywords.clone())?;
        tracing::debug!("Resolved settings: {:?}", settings);

        let cmd = SearchCommand::new(settings, keywords);
        cmd.execute(out)
    }

    /// Color choice for diagnostics.
    ///
    /// Uses the fully resolved setting (CLI, environment, config file), or
    /// the CLI flag alone when the settings themselves fail to resolve.
    pub fn color_choice(&self, cli: &Cli) -> ColorChoice {
        let overrides = cli.overrides();
        SearchSettings::resolve(&overrides, &self.working_dir)
            .map(|settings| settings.color)
            .unwrap_or_else(|_| overrides.color.unwrap_or_default())
    }
}
