//! Static extraction of a script's leading docstring.
//!
//! The parser never executes or imports the script. It skips leading blank
//! and comment lines, then reads the first statement if it is a plain
//! string literal standing on its own.

use std::path::Path;

/// Failure to parse a docstring literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocstringError {
    /// 1-based line of the opening quote.
    pub line: usize,
    /// Human-readable reason.
    pub message: String,
}

/// Extract and clean the leading docstring of `source`.
///
/// Returns an empty string when the first statement is not a string
/// literal.
///
/// # Example
///
/// ```
/// use script_search::extract::docstring::parse_docstring;
///
/// let source = "#!/usr/bin/env python\n\"\"\"\n    Apply NLMeans denoising.\n\"\"\"\nimport os\n";
/// assert_eq!(parse_docstring(source).unwrap(), "Apply NLMeans denoising.");
/// assert_eq!(parse_docstring("import os\n").unwrap(), "");
/// ```
pub fn parse_docstring(source: &str) -> Result<String, DocstringError> {
    let normalized = source.replace("\r\n", "\n");
    let text = normalized.strip_prefix('\u{feff}').unwrap_or(&normalized);

    let Some((start, line)) = first_statement(text) else {
        return Ok(String::new());
    };

    let rest = &text[start..];
    let Some(literal) = read_literal(rest, line)? else {
        return Ok(String::new());
    };

    if !stands_alone(&rest[literal.consumed..]) {
        return Ok(String::new());
    }

    let body = if literal.raw {
        literal.body.to_string()
    } else {
        unescape(literal.body)
    };

    Ok(clean_docstring(&body))
}

/// Read `path` and extract its docstring.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_docstring(path: &Path) -> std::io::Result<Result<String, DocstringError>> {
    let bytes = std::fs::read(path)?;
    Ok(parse_docstring(&String::from_utf8_lossy(&bytes)))
}

/// Byte offset and 1-based line number of the first code token.
fn first_statement(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let trimmed = line.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            return Some((offset + (line.len() - trimmed.len()), idx + 1));
        }
        offset += line.len();
    }
    None
}

struct Literal<'a> {
    body: &'a str,
    raw: bool,
    consumed: usize,
}

fn read_literal(input: &str, line: usize) -> Result<Option<Literal<'_>>, DocstringError> {
    let prefix_len = input
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    let prefix = &input[..prefix_len];
    let raw = match prefix {
        "" | "u" | "U" => false,
        "r" | "R" => true,
        // Bytes, f-strings and identifiers are not docstrings.
        _ => return Ok(None),
    };

    let after_prefix = &input[prefix_len..];
    let quote = match after_prefix.as_bytes().first() {
        Some(b'"') => '"',
        Some(b'\'') => '\'',
        _ => return Ok(None),
    };

    let triple: String = std::iter::repeat_n(quote, 3).collect();
    let (open_len, delimiter) = if after_prefix.starts_with(&triple) {
        (3, triple.as_str())
    } else {
        (1, &triple[..1])
    };

    let body_start = prefix_len + open_len;
    let body_and_rest = &input[body_start..];
    let multiline = open_len == 3;

    let mut chars = body_and_rest.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            // The escaped character never terminates the literal, raw or not.
            chars.next();
            continue;
        }
        if c == '\n' && !multiline {
            return Err(DocstringError {
                line,
                message: "unterminated string literal".to_string(),
            });
        }
        if body_and_rest[i..].starts_with(delimiter) {
            return Ok(Some(Literal {
                body: &body_and_rest[..i],
                raw,
                consumed: body_start + i + delimiter.len(),
            }));
        }
    }

    Err(DocstringError {
        line,
        message: if multiline {
            "unterminated triple-quoted string literal".to_string()
        } else {
            "unterminated string literal".to_string()
        },
    })
}

/// Whether nothing but a comment or statement separator follows the literal.
fn stands_alone(after: &str) -> bool {
    let line_rest = after.split('\n').next().unwrap_or("").trim_start();
    line_rest.is_empty() || line_rest.starts_with('#') || line_rest.starts_with(';')
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                let decoded = (digits.len() == width)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// Expand tabs to 8-column stops.
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = 8 - (column % 8);
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Normalize docstring indentation.
///
/// The first line is left-stripped and the common indentation of the
/// remaining non-blank lines is removed from every line after it. Lines
/// left empty at either end are then dropped; lines that still hold
/// whitespace are kept.
pub fn clean_docstring(doc: &str) -> String {
    let mut lines: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim_start().is_empty())
        .map(|l| indent_width(l))
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    let start = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);

    lines[start..end].join("\n")
}

/// Leading whitespace, in characters.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
