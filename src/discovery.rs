//! Script discovery.
//!
//! Lists the candidate scripts directly inside a directory, filtered by a
//! file name glob and sorted by file name.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};

use crate::error::{Result, SearchError};

/// Default file name glob for candidate scripts.
pub const DEFAULT_PATTERN: &str = "*.py";

/// A discovered script file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    /// File name without directory.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

impl ScriptFile {
    /// Create a script file entry from a path.
    ///
    /// Returns `None` if the path has no UTF-8 file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            name,
            path: path.to_path_buf(),
        })
    }
}

/// A compiled file name glob.
///
/// Supports `*` (any run of characters), `?` (one character),
/// `[...]` / `[!...]` character classes and `{a,b}` alternation. Matching
/// is against the whole file name.
///
/// # Example
///
/// ```
/// use script_search::discovery::GlobPattern;
///
/// let glob = GlobPattern::new("scil_*.py").unwrap();
/// assert!(glob.matches("scil_denoise_image.py"));
/// assert!(!glob.matches("README.md"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: GlobMatcher,
}

impl GlobPattern {
    /// Compile a glob.
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "pattern is empty".to_string(),
            });
        }

        let glob = Glob::new(pattern).map_err(|e| SearchError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Original glob text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether a file name matches.
    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// Discover scripts directly inside `dir` whose names match `pattern`.
///
/// Results are sorted by file name so output order never depends on
/// filesystem enumeration order.
///
/// # Errors
///
/// Returns `ScriptDirNotFound` if `dir` is missing or not a directory.
pub fn discover_scripts(dir: &Path, pattern: &GlobPattern) -> Result<Vec<ScriptFile>> {
    if !dir.is_dir() {
        return Err(SearchError::ScriptDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        // Follows symlinks, so linked scripts are included.
        let is_file = match fs::metadata(&path) {
            Ok(meta) => meta.is_file(),
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if !is_file {
            continue;
        }

        let Some(script) = ScriptFile::from_path(&path) else {
            tracing::debug!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };

        if pattern.matches(&script.name) {
            scripts.push(script);
        }
    }

    scripts.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(
        "Discovered {} scripts matching '{}' in {}",
        scripts.len(),
        pattern.as_str(),
        dir.display()
    );

    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn glob_star_matches_extension() {
        let glob = GlobPattern::new("*.py").unwrap();
        assert!(glob.matches("scil_a.py"));
        assert!(glob.matches(".py"));
        assert!(!glob.matches("scil_a.pyc"));
        assert!(!glob.matches("scil_a.sh"));
    }

    #[test]
    fn glob_dot_is_literal() {
        let glob = GlobPattern::new("*.py").unwrap();
        assert!(!glob.matches("scil_apy"));
    }

    #[test]
    fn glob_question_mark_matches_one_char() {
        let glob = GlobPattern::new("scil_?.py").unwrap();
        assert!(glob.matches("scil_a.py"));
        assert!(!glob.matches("scil_ab.py"));
    }

    #[test]
    fn glob_character_class() {
        let glob = GlobPattern::new("scil_[ab].py").unwrap();
        assert!(glob.matches("scil_a.py"));
        assert!(glob.matches("scil_b.py"));
        assert!(!glob.matches("scil_c.py"));

        let negated = GlobPattern::new("scil_[!ab].py").unwrap();
        assert!(negated.matches("scil_c.py"));
        assert!(!negated.matches("scil_a.py"));
    }

    #[test]
    fn glob_alternation() {
        let glob = GlobPattern::new("*.{py,sh}").unwrap();
        assert!(glob.matches("scil_a.py"));
        assert!(glob.matches("scil_a.sh"));
        assert!(!glob.matches("scil_a.txt"));
    }

    #[test]
    fn glob_wildcards_match_newlines() {
        let glob = GlobPattern::new("*.py").unwrap();
        assert!(glob.matches("scil\nodd.py"));

        let single = GlobPattern::new("scil?odd.py").unwrap();
        assert!(single.matches("scil\nodd.py"));
    }

    #[test]
    fn glob_rejects_empty_and_unclosed() {
        assert!(matches!(
            GlobPattern::new(""),
            Err(SearchError::InvalidPattern { .. })
        ));
        assert!(matches!(
            GlobPattern::new("scil_[ab.py"),
            Err(SearchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn discover_sorts_by_name() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "scil_c.py");
        touch(temp.path(), "scil_a.py");
        touch(temp.path(), "scil_b.py");

        let glob = GlobPattern::new(DEFAULT_PATTERN).unwrap();
        let names: Vec<_> = discover_scripts(temp.path(), &glob)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["scil_a.py", "scil_b.py", "scil_c.py"]);
    }

    #[test]
    fn discover_filters_by_pattern_and_skips_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "scil_a.py");
        touch(temp.path(), "notes.txt");
        fs::create_dir(temp.path().join("nested.py")).unwrap();

        let glob = GlobPattern::new(DEFAULT_PATTERN).unwrap();
        let scripts = discover_scripts(temp.path(), &glob).unwrap();

        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].name, "scil_a.py");
        assert_eq!(scripts[0].path, temp.path().join("scil_a.py"));
    }

    #[test]
    fn discover_does_not_recurse() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        touch(&temp.path().join("sub"), "scil_hidden.py");

        let glob = GlobPattern::new(DEFAULT_PATTERN).unwrap();
        assert!(discover_scripts(temp.path(), &glob).unwrap().is_empty());
    }

    #[test]
    fn discover_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        let glob = GlobPattern::new(DEFAULT_PATTERN).unwrap();
        let result = discover_scripts(&temp.path().join("missing"), &glob);
        assert!(matches!(
            result,
            Err(SearchError::ScriptDirNotFound { .. })
        ));
    }
}
