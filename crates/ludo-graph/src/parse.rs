//! Parser for stringified name lists such as `['Uwe Rosenberg', "Jamey O'Neil"]`.
//!
//! Cells exported from dataframes often carry list literals as text. The
//! grammar (`name_list.pest`) accepts exactly that shape: brackets, quoted
//! strings separated by commas, optional trailing comma, arbitrary
//! whitespace. Nothing is evaluated.

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

// ── Pest parser derive ─────────────────────────────────────

#[derive(Parser)]
#[grammar = "src/name_list.pest"]
struct NameListParser;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListSyntaxError {
    #[error("name list parse error: {0}")]
    Parse(String),
}

// ── Public entry point ────────────────────────────────────

/// Parse a bracketed list of single- or double-quoted strings.
///
/// Backslash escapes the next character inside a string.
pub fn parse_name_list(input: &str) -> Result<Vec<String>, ListSyntaxError> {
    let list = NameListParser::parse(Rule::list, input)
        .map_err(|e| ListSyntaxError::Parse(e.to_string()))?
        .next()
        .ok_or_else(|| ListSyntaxError::Parse("empty input".into()))?;

    Ok(list
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::item)
        .filter_map(|item| item.into_inner().next())
        .map(|body| unescape(body.as_str()))
        .collect())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}
