//! Title detection for the title slide and for figure subheadings.

use crate::document::{Cell, SourceDocument};
use once_cell::sync::Lazy;
use regex::Regex;

/// A line starting with a single `#` followed by whitespace.
///
/// `\s+` may cross a newline (`#\nTitle`); the captured title is always the
/// rest of one line.
static RE_TOP_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Title token recognised in the leading comment of a code cell (Colab forms).
const TITLE_ANNOTATION: &str = "@title";

/// Derive the deck title.
///
/// Notebooks: the first markdown cell containing a top-level heading wins.
/// Markdown: the first top-level heading anywhere in the text. Without a
/// heading the title falls back to [`title_from_stem`].
pub fn extract_title(doc: &SourceDocument, stem: &str) -> String {
    let found = match doc {
        SourceDocument::Cells(cells) => cells.iter().find_map(|cell| match cell {
            Cell::Markdown { source } => find_heading(source),
            Cell::Code { .. } | Cell::Raw => None,
        }),
        SourceDocument::Text(text) => find_heading(text),
    };

    found
        .map(|t| single_line(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title_from_stem(stem))
}

fn find_heading(text: &str) -> Option<String> {
    RE_TOP_HEADING
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Collapse any run of whitespace (including newlines) to a single space.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Human-readable title from a file stem: `first-order_systems` → `First Order Systems`.
///
/// Every letter that follows a non-letter starts a new word, so
/// `week1a` becomes `Week1A` and `o'brien` becomes `O'Brien`.
pub fn title_from_stem(stem: &str) -> String {
    let mut title = String::with_capacity(stem.len());
    let mut in_word = false;
    for c in stem.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}

/// Whether trimmed `text` opens with a top-level heading (`# ...`).
pub fn starts_with_top_heading(text: &str) -> bool {
    let mut chars = text.trim_start().chars();
    chars.next() == Some('#') && chars.next().is_some_and(char::is_whitespace)
}

static RE_LEADING_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\s*#\s+[^\n]+\n?").unwrap());

/// Remove the top-level heading line that opens `text`, if any.
pub fn strip_leading_heading(text: &str) -> &str {
    match RE_LEADING_HEADING.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Subheading for a code cell's figures, taken from its leading comment.
///
/// Only the first non-blank line is inspected. `# @title Step response`
/// yields `Step response`; a first line that is not a comment, or a comment
/// with nothing left after stripping, yields `None`.
pub fn code_cell_title(source: &str) -> Option<String> {
    let first = source.lines().map(str::trim).find(|l| !l.is_empty())?;
    if !first.starts_with('#') {
        return None;
    }

    let mut title = first.trim_start_matches('#').trim();
    let has_annotation = title
        .get(..TITLE_ANNOTATION.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(TITLE_ANNOTATION));
    if has_annotation {
        title = title[TITLE_ANNOTATION.len()..].trim();
    }

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
