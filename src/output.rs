//! Result types returned by a conversion run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The complete result of converting one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The assembled deck (frontmatter, title slide, content slides).
    pub markdown: String,
    /// Title used for the title slide.
    pub title: String,
    /// Where the deck was written, if it was written.
    pub output_path: Option<PathBuf>,
    /// Images extracted during the run, in document order.
    pub images: Vec<ExtractedImage>,
    pub stats: ConversionStats,
}

/// One image decoded from a code-cell output and persisted to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    /// Counter value used in the filename (1-based, strictly increasing).
    pub index: usize,
    /// File name, e.g. `Linear_Systems_03.png`.
    pub filename: String,
    /// Path as embedded in the deck, e.g. `images/Linear_Systems_03.png`.
    pub relative_path: String,
    /// Absolute or caller-relative location on disk.
    pub path: PathBuf,
    /// Decoded payload size in bytes.
    pub bytes: usize,
    /// Pixel width, when the PNG header could be read.
    pub width: Option<u32>,
    /// Pixel height, when the PNG header could be read.
    pub height: Option<u32>,
}

/// Summary counts for a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Content units walked (cells, or 1 for Markdown input).
    pub units: usize,
    /// Slides in the deck, including the title slide.
    pub slides: usize,
    /// Slide separators in the deck body (frontmatter delimiters excluded).
    pub separators: usize,
    /// Images extracted.
    pub images: usize,
    /// Wall-clock time for the whole run.
    pub duration_ms: u64,
}
