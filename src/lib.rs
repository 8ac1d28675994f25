//! # nb2slides
//!
//! Turn lecture notebooks (`.ipynb`) and Markdown notes into
//! [Marp](https://marp.app) slide decks.
//!
//! Figures are not re-plotted: the PNGs already stored in code-cell outputs
//! are decoded into an `images/` directory beside the deck and embedded by
//! relative path. Markdown is cleaned of things that do not belong on a
//! slide (authored `---` breaks, Colab/ChatGPT badges, MkDocs admonitions).
//!
//! ## Pipeline Overview
//!
//! ```text
//! .ipynb / .md
//!  │
//!  ├─ 1. Input    validate path, detect format, parse cells or text
//!  ├─ 2. Title    first `# heading`, else the file name
//!  ├─ 3. Segment  one slide per markdown cell / figure cell
//!  ├─ 4. Clean    5 ordered rewrite rules per fragment
//!  ├─ 5. Images   base64 PNG → images/<stem>_NN.png
//!  └─ 6. Output   frontmatter + title slide + content slides
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nb2slides::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert("lectures/Linear_Systems.ipynb", &config)?;
//!     eprintln!("{} slides, {} images", output.stats.slides, output.stats.images);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `nb2slides` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod deck;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{build_deck, convert};
pub use deck::SLIDE_SEPARATOR;
pub use document::{Cell, Output, SourceDocument, SourceFormat};
pub use error::SlidesError;
pub use output::{ConversionOutput, ConversionStats, ExtractedImage};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
