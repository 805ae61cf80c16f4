//! Configuration loading and settings resolution.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Precedence and defaults in [`settings`]
//!
//! # Example
//!
//! ```
//! use script_search::config::{Overrides, SearchSettings, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "pattern: 'scil_*.py'").unwrap();
//!
//! let settings = SearchSettings::resolve(&Overrides::default(), temp.path()).unwrap();
//! assert_eq!(settings.pattern.as_str(), "scil_*.py");
//! ```
//!
//! # Configuration File Location
//!
//! `--config <FILE>` if given, otherwise `.script-search.yml` inside the
//! script directory. The file is optional.

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::FileConfig;
pub use settings::{OutputFormat, Overrides, SearchSettings};
