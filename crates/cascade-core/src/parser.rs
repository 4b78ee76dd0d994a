//! Flat `key = value` grammar for per-directory configuration files.
//!
//! ```text
//! # comment
//! ; comment
//! root = true
//!
//! [*]
//! style = 4
//! ```
//!
//! Section headers are accepted but carry no meaning: every declaration
//! lands in one flat map and a later declaration of a key replaces an
//! earlier one.

use crate::ConfigFile;
use regex::Regex;
use std::sync::LazyLock;

static SECTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\]$").expect("Invalid section regex"));

static DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]*?)\s*=\s*(.*)$").expect("Invalid declaration regex"));

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected `key = value`, found {0:?}")]
    MissingSeparator(String),

    #[error("declaration has an empty key")]
    EmptyKey,

    #[error("section header is missing its closing `]`")]
    UnterminatedSection,
}

/// A malformed line, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Parse configuration text into a [`ConfigFile`].
///
/// # Example
/// ```
/// use cascade_core::parse;
///
/// let file = parse("root = true\nstyle = 4\n").unwrap();
/// assert!(file.is_root());
/// assert_eq!(file.try_get("style"), Some("4"));
/// ```
pub fn parse(text: &str) -> Result<ConfigFile, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        let error = |kind| ParseError {
            line: index + 1,
            kind,
        };

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let Some(caps) = SECTION_REGEX.captures(line) else {
                return Err(error(ParseErrorKind::UnterminatedSection));
            };
            tracing::trace!(section = &caps[1], "Ignoring section header");
            continue;
        }

        let Some(caps) = DECLARATION_REGEX.captures(line) else {
            return Err(error(ParseErrorKind::MissingSeparator(line.to_string())));
        };
        let key = caps[1].trim();
        if key.is_empty() {
            return Err(error(ParseErrorKind::EmptyKey));
        }
        entries.push((key.to_string(), caps[2].trim().to_string()));
    }

    Ok(ConfigFile::from_entries(entries))
}
