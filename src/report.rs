//! Match report rendering.
//!
//! Two formats are supported:
//!
//! - [`TextReport`]: the delimited, highlighted block per match
//! - [`JsonReport`]: one JSON document with un-highlighted matches
//!
//! Highlight markers are carried by an explicit [`ReportStyle`] value so
//! callers decide between ANSI and plain output.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::extract::ExtractionMode;
use crate::matcher::KeywordSet;

/// Delimiter surrounding report headers.
pub const SPACING: &str = "==================";

/// Shown in place of empty extracted text.
pub const NO_DOCSTRING: &str = "No docstring available!";

/// Printed when nothing matched.
pub const NO_RESULTS: &str = "No results found!";

const ANSI_RED: &str = "\x1b[31m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// Markers wrapped around each highlighted match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    open: String,
    close: String,
}

impl ReportStyle {
    /// Red bold ANSI markers.
    pub fn ansi() -> Self {
        Self {
            open: format!("{}{}", ANSI_RED, ANSI_BOLD),
            close: ANSI_RESET.to_string(),
        }
    }

    /// No markers; highlighted text is returned unchanged.
    pub fn plain() -> Self {
        Self {
            open: String::new(),
            close: String::new(),
        }
    }

    /// Custom markers.
    pub fn with_markers(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// ANSI when `color` is set, plain otherwise.
    pub fn for_color(color: bool) -> Self {
        if color {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Whether this style changes text at all.
    pub fn is_plain(&self) -> bool {
        self.open.is_empty() && self.close.is_empty()
    }
}

/// Wrap every keyword occurrence in `text` with the style's markers.
///
/// Original casing is preserved and text outside matches is untouched.
///
/// # Example
///
/// ```
/// use script_search::matcher::KeywordSet;
/// use script_search::report::{highlight, ReportStyle};
///
/// let keywords = KeywordSet::new(vec!["dti".into()]).unwrap();
/// let style = ReportStyle::with_markers("<", ">");
/// assert_eq!(highlight("DTI and dti", &keywords, &style), "<DTI> and <dti>");
/// ```
pub fn highlight(text: &str, keywords: &KeywordSet, style: &ReportStyle) -> String {
    if style.is_plain() {
        return text.to_string();
    }

    let spans = keywords.match_spans(text);
    let marker_len = style.open.len() + style.close.len();
    let mut out = String::with_capacity(text.len() + spans.len() * marker_len);
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&style.open);
        out.push_str(&text[span.clone()]);
        out.push_str(&style.close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// A script that passed the keyword test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRecord {
    /// File name.
    pub filename: String,
    /// Full path.
    pub path: PathBuf,
    /// Extracted text (may be empty).
    pub text: String,
}

/// Sink for matching scripts.
pub trait ReportWriter {
    /// Report one match. Calls arrive in sorted file name order.
    fn record(&mut self, record: &ScriptRecord) -> Result<()>;

    /// Called once after the scan.
    fn finish(&mut self) -> Result<()>;

    /// Matches reported so far.
    fn count(&self) -> usize;
}

/// Highlighted, delimited text report.
pub struct TextReport<'a, W: Write + ?Sized> {
    out: &'a mut W,
    keywords: &'a KeywordSet,
    style: ReportStyle,
    count: usize,
}

impl<'a, W: Write + ?Sized> TextReport<'a, W> {
    /// Create a text report writing to `out`.
    pub fn new(out: &'a mut W, keywords: &'a KeywordSet, style: ReportStyle) -> Self {
        Self {
            out,
            keywords,
            style,
            count: 0,
        }
    }
}

impl<W: Write + ?Sized> ReportWriter for TextReport<'_, W> {
    fn record(&mut self, record: &ScriptRecord) -> Result<()> {
        let filename = highlight(&record.filename, self.keywords, &self.style);
        let text = if record.text.is_empty() {
            NO_DOCSTRING
        } else {
            record.text.as_str()
        };
        let text = highlight(text, self.keywords, &self.style);

        writeln!(self.out, "{} {} {}", SPACING, filename, SPACING)?;
        writeln!(self.out, "{}", text)?;
        writeln!(self.out, "{} End of {} {}", SPACING, filename, SPACING)?;
        self.count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.count == 0 {
            writeln!(self.out, "{}", NO_RESULTS)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn count(&self) -> usize {
        self.count
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    keywords: Vec<&'a str>,
    mode: ExtractionMode,
    matches: &'a [ScriptRecord],
}

/// Machine-readable report, written as one document on finish.
pub struct JsonReport<'a, W: Write + ?Sized> {
    out: &'a mut W,
    keywords: &'a KeywordSet,
    mode: ExtractionMode,
    matches: Vec<ScriptRecord>,
}

impl<'a, W: Write + ?Sized> JsonReport<'a, W> {
    /// Create a JSON report writing to `out`.
    pub fn new(out: &'a mut W, keywords: &'a KeywordSet, mode: ExtractionMode) -> Self {
        Self {
            out,
            keywords,
            mode,
            matches: Vec::new(),
        }
    }
}

impl<W: Write + ?Sized> ReportWriter for JsonReport<'_, W> {
    fn record(&mut self, record: &ScriptRecord) -> Result<()> {
        self.matches.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let doc = JsonDocument {
            keywords: self.keywords.keywords().collect(),
            mode: self.mode,
            matches: &self.matches,
        };
        let json = serde_json::to_string_pretty(&doc).map_err(anyhow::Error::from)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()?;
        Ok(())
    }

    fn count(&self) -> usize {
        self.matches.len()
    }
}
