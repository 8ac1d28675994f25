//! Error types for the nb2slides library.
//!
//! Every failure is fatal: a conversion either completes and writes a full
//! deck, or it stops with a [`SlidesError`]. There is no per-cell partial
//! success mode, because a deck with a silently missing figure is worse than
//! no deck at all.
//!
//! Images extracted before the failing cell stay on disk; the deck itself is
//! only written once the whole document has been processed.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the nb2slides library.
#[derive(Debug, Error)]
pub enum SlidesError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input is neither a notebook nor a Markdown document.
    #[error("Unsupported file type '{extension}' for '{path}'\nExpected .ipynb or .md")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The notebook file is not valid JSON.
    #[error("Notebook '{path}' is not valid JSON: {detail}")]
    InvalidNotebook { path: PathBuf, detail: String },

    // ── Document errors ───────────────────────────────────────────────────
    /// A structural field the notebook format requires is absent.
    ///
    /// `cell` is the 0-based cell index, or `None` for document-level fields.
    #[error("Missing field '{field}'{}", cell.map(|c| format!(" in cell {c}")).unwrap_or_default())]
    MissingField {
        field: &'static str,
        cell: Option<usize>,
    },

    /// An image payload could not be decoded.
    #[error("Malformed image payload in cell {cell}, output {output}: {detail}")]
    MalformedPayload {
        cell: usize,
        output: usize,
        detail: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not read the input document.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create the images directory or write an extracted image.
    #[error("Failed to write image '{path}': {source}")]
    ImageWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output deck.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
