//! script-search - Find scripts in a directory by keyword.
//!
//! Each script is matched by its file name plus either its leading
//! docstring (read statically) or the help text it prints when run. A
//! script is reported only when every keyword appears, case-insensitively,
//! in one of the two.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Config file loading and settings resolution
//! - [`discovery`] - Script enumeration and file name globs
//! - [`error`] - Error types and result aliases
//! - [`extract`] - Docstring and help-text extraction
//! - [`matcher`] - Keyword matching and match spans
//! - [`report`] - Highlighting and report output
//! - [`shell`] - External process execution with timeouts
//! - [`ui`] - Terminal styling and color detection
//!
//! # Example
//!
//! ```
//! use script_search::matcher::KeywordSet;
//! use script_search::report::{highlight, ReportStyle};
//!
//! let keywords = KeywordSet::new(vec!["denoise".to_string()]).unwrap();
//! assert!(keywords.matches_all(&["scil_denoise_image.py", ""]));
//!
//! let style = ReportStyle::with_markers("*", "*");
//! assert_eq!(
//!     highlight("scil_denoise_image.py", &keywords, &style),
//!     "scil_*denoise*_image.py"
//! );
//! ```
//!
//! For end-to-end runs against a script directory, see the integration tests.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod report;
pub mod shell;
pub mod ui;

pub use error::{Result, SearchError};
