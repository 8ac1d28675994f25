//! Markdown cleanup: strip authoring artefacts that make no sense on a slide.
//!
//! Lecture notebooks are written for a documentation site and for Colab, so
//! their Markdown carries things a slide deck must not show: hand-written
//! `---` breaks (slide boundaries belong to the segmenter), "open in
//! ChatGPT"/"open in Colab" anchors and badges, and MkDocs admonitions that
//! Marp cannot render.
//!
//! ## Rule Order
//!
//! Each rule operates on the previous rule's output. Separators go first so
//! a `---` inside a removed anchor cannot leave an empty line behind that
//! shifts later matches; the badge rule runs after the anchor rules because a
//! badge wrapped in an anchor is already gone by then; admonitions run last
//! so their bodies are converted after everything else has been stripped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Apply all cleanup rules to one fragment.
///
/// Rules (applied in order):
/// 1. Delete lines consisting only of a `---` slide separator
/// 2. Delete `<a href="https://chat.openai.com/...">...</a>` anchors
/// 3. Delete `<a href="https://colab.research.google.com/...">...</a>` anchors
/// 4. Delete the Markdown "Open in Colab" badge idiom
/// 5. Convert `!!! kind "Label"` admonitions into blockquotes
///
/// Returns `None` when nothing but whitespace survives. Cleaning an already
/// clean fragment returns it unchanged.
pub fn clean_markdown(input: &str) -> Option<String> {
    let s = strip_slide_separators(input);
    let s = remove_chat_links(&s);
    let s = remove_colab_links(&s);
    let s = remove_colab_badges(&s);
    let s = admonitions_to_blockquotes(&s);

    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ── Rule 1: Strip authored slide separators ──────────────────────────────────

static RE_SEPARATOR_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*---[ \t]*$").unwrap());

fn strip_slide_separators(input: &str) -> String {
    RE_SEPARATOR_LINE.replace_all(input, "").to_string()
}

// ── Rule 2: Remove "open in chat assistant" anchors ──────────────────────────

static RE_CHAT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<a href="https://chat\.openai\.com/.*?</a>"#).unwrap());

fn remove_chat_links(input: &str) -> String {
    RE_CHAT_LINK.replace_all(input, "").to_string()
}

// ── Rule 3: Remove "open in Colab" anchors ───────────────────────────────────

static RE_COLAB_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a href="https://colab\.research\.google\.com/.*?</a>"#).unwrap()
});

fn remove_colab_links(input: &str) -> String {
    RE_COLAB_LINK.replace_all(input, "").to_string()
}

// ── Rule 4: Remove Markdown Colab badges ─────────────────────────────────────

static RE_COLAB_BADGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[!\[[^\]]*\]\(https://colab\.research\.google\.com/assets/colab-badge\.svg\)\]\(https://colab\.research\.google\.com/[^)]+\)",
    )
    .unwrap()
});

fn remove_colab_badges(input: &str) -> String {
    RE_COLAB_BADGE.replace_all(input, "").to_string()
}

// ── Rule 5: Admonitions → blockquotes ────────────────────────────────────────
//
// `!!! note "Heads up"` followed by an indented body becomes
//
//     > **Heads up**
//     >
//     > body line 1
//     > body line 2
//
// The body starts at the first indented line and runs until a blank line or
// the end of the fragment. The admonition kind is dropped; Marp has no
// equivalent styling.

static RE_ADMONITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!!![ \t]+\w+[ \t]+"([^"\n]+)"[ \t]*\n[ \t]+(\S[^\n]*(?:\n[ \t]*\S[^\n]*)*)"#)
        .unwrap()
});

fn admonitions_to_blockquotes(input: &str) -> String {
    RE_ADMONITION
        .replace_all(input, |caps: &Captures<'_>| {
            let label = caps[1].trim();
            let body = caps[2]
                .lines()
                .map(|line| format!("> {}", line.trim()))
                .collect::<Vec<_>>()
                .join("\n");
            format!("> **{label}**\n>\n{body}")
        })
        .to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────
