//! Configuration file schema.
//!
//! Maps the optional `.script-search.yml` file. Every field is optional;
//! an absent field falls through to the built-in default.

use serde::{Deserialize, Serialize};

use crate::ui::ColorChoice;

/// Root structure of `.script-search.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// File name glob for candidate scripts (default `*.py`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Flag passed to scripts when searching help text (default `--help`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_flag: Option<String>,

    /// Per-script timeout when searching help text; 0 disables it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Abort on the first script that cannot be read or run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Highlight colors: auto, always, never
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorChoice>,
}
