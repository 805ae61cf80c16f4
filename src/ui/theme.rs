//! Visual theme and color selection.

use clap::ValueEnum;
use console::{Style, Term};
use serde::{Deserialize, Serialize};

/// When to emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when the output is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Resolve to a yes/no decision for the report on stdout.
    pub fn enabled(self) -> bool {
        self.enabled_for(&Term::stdout())
    }

    /// Resolve to a yes/no decision for output written to `term`.
    pub fn enabled_for(self, term: &Term) -> bool {
        match self {
            Self::Auto => should_use_colors(term),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Styles for diagnostics printed on stderr.
#[derive(Debug, Clone)]
pub struct SearchTheme {
    /// Style for error messages (red bold).
    pub error: Style,
}

impl Default for SearchTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTheme {
    /// Create the colored theme.
    ///
    /// Styling is forced; [`SearchTheme::for_choice`] has already decided
    /// whether stderr gets color.
    pub fn new() -> Self {
        Self {
            error: Style::new().red().bold().force_styling(true),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            error: Style::new(),
        }
    }

    /// Pick the colored or plain theme for stderr.
    pub fn for_choice(choice: ColorChoice) -> Self {
        if choice.enabled_for(&Term::stderr()) {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled for output written to `term`.
pub fn should_use_colors(term: &Term) -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    term.is_term()
}
