//! Configuration file discovery and loading.

use crate::config::schema::FileConfig;
use crate::error::{Result, SearchError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up inside the script directory.
pub const CONFIG_FILE_NAME: &str = ".script-search.yml";

/// Find the config file for a script directory, if one exists.
pub fn find_config(script_dir: &Path) -> Option<PathBuf> {
    let path = script_dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SearchError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SearchError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`FileConfig`].
///
/// An empty document yields the default config.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<FileConfig> {
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SearchError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the explicit config if given, else the one in `script_dir`.
///
/// Returns the default config when no file applies.
pub fn load_config(explicit: Option<&Path>, script_dir: &Path) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config(script_dir) {
            Some(path) => path,
            None => return Ok(FileConfig::default()),
        },
    };

    tracing::debug!("Loading config from {}", path.display());
    load_config_file(&path)
}
