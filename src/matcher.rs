//! Keyword matching.
//!
//! A script matches when every keyword appears, case-insensitively, in its
//! file name or in its extracted text.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::error::{Result, SearchError};

/// A single compiled keyword.
#[derive(Debug, Clone)]
struct Keyword {
    text: String,
    pattern: Regex,
}

/// The ordered, immutable set of keywords for one run.
///
/// # Example
///
/// ```
/// use script_search::matcher::KeywordSet;
///
/// let keywords = KeywordSet::new(vec!["DTI".into(), "metrics".into()]).unwrap();
/// assert!(keywords.matches_all(&["scil_compute_dti_metrics.py", ""]));
/// assert!(keywords.matches_all(&["scil_compute.py", "Compute dti metrics"]));
/// assert!(!keywords.matches_all(&["scil_denoise.py", "Apply NLMeans"]));
/// ```
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Compile a keyword set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyword` for an empty list or an empty keyword.
    pub fn new(keywords: Vec<String>) -> Result<Self> {
        if keywords.is_empty() {
            return Err(SearchError::InvalidKeyword {
                message: "at least one keyword is required".to_string(),
            });
        }

        let keywords = keywords
            .into_iter()
            .map(|text| {
                if text.is_empty() {
                    return Err(SearchError::InvalidKeyword {
                        message: "keywords cannot be empty".to_string(),
                    });
                }
                let pattern = RegexBuilder::new(&regex::escape(&text))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| SearchError::InvalidKeyword {
                        message: format!("'{}': {}", text, e),
                    })?;
                Ok(Keyword { text, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { keywords })
    }

    /// Keywords in the order given.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.text.as_str())
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// True iff every keyword is contained in at least one of `texts`.
    ///
    /// Uses the same case folding as [`KeywordSet::match_spans`], so a
    /// reported script always has something to highlight.
    pub fn matches_all(&self, texts: &[&str]) -> bool {
        self.keywords
            .iter()
            .all(|k| texts.iter().any(|t| k.pattern.is_match(t)))
    }

    /// Byte ranges of every keyword occurrence in `text`.
    ///
    /// Ranges are sorted; overlapping occurrences (from different
    /// keywords) are merged into one.
    pub fn match_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans: Vec<Range<usize>> = self
            .keywords
            .iter()
            .flat_map(|k| k.pattern.find_iter(text).map(|m| m.range()))
            .filter(|r| !r.is_empty())
            .collect();
        spans.sort_by_key(|r| (r.start, r.end));

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.start < last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        merged
    }
}
