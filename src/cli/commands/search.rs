//! Search command implementation.
//!
//! Scans the script directory in file name order, extracts each script's
//! text, and reports the scripts matching every keyword.

use std::io::Write;

use crate::config::{OutputFormat, SearchSettings};
use crate::discovery::discover_scripts;
use crate::error::Result;
use crate::extract::extractor_for;
use crate::matcher::KeywordSet;
use crate::report::{JsonReport, ReportStyle, ReportWriter, ScriptRecord, TextReport};

use super::dispatcher::{Command, CommandResult};

/// The search command implementation.
pub struct SearchCommand {
    settings: SearchSettings,
    keywords: KeywordSet,
}

impl SearchCommand {
    /// Create a new search command.
    pub fn new(settings: SearchSettings, keywords: KeywordSet) -> Self {
        Self { settings, keywords }
    }

    /// Get the resolved settings.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Get the keywords.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Run the scan, feeding matches to `report`.
    ///
    /// Scripts whose extraction fails are skipped with a warning unless
    /// `strict` is set, in which case the first failure is returned.
    pub fn scan(&self, report: &mut (dyn ReportWriter + '_)) -> Result<()> {
        let scripts = discover_scripts(&self.settings.script_dir, &self.settings.pattern)?;
        let extractor = extractor_for(
            self.settings.mode,
            &self.settings.help_flag,
            self.settings.timeout,
        );

        for script in scripts {
            let text = match extractor.extract(&script) {
                Ok(text) => text,
                Err(e) if !self.settings.strict && e.is_extraction_failure() => {
                    tracing::warn!("Skipping {}: {}", script.name, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !self
                .keywords
                .matches_all(&[script.name.as_str(), text.as_str()])
            {
                tracing::debug!("No match: {}", script.name);
                continue;
            }

            report.record(&ScriptRecord {
                filename: script.name,
                path: script.path,
                text,
            })?;
        }

        report.finish()
    }
}

impl Command for SearchCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let mut report: Box<dyn ReportWriter + '_> = match self.settings.format {
            OutputFormat::Text => Box::new(TextReport::new(
                out,
                &self.keywords,
                ReportStyle::for_color(self.settings.color.enabled()),
            )),
            OutputFormat::Json => {
                Box::new(JsonReport::new(out, &self.keywords, self.settings.mode))
            }
        };

        self.scan(report.as_mut())?;
        Ok(CommandResult::success(report.count()))
    }
}
