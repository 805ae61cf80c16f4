//! Terminal styling for diagnostics.
//!
//! The report itself is styled through [`crate::report::ReportStyle`];
//! this module covers color detection and the styles used for messages
//! printed to stderr.

pub mod theme;

pub use theme::{should_use_colors, ColorChoice, SearchTheme};
