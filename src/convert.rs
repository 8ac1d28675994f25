//! Conversion entry points.
//!
//! [`convert`] is the file-to-file API used by the CLI: it resolves paths,
//! writes images as it goes, and writes the deck once at the end.
//! [`build_deck`] is the in-memory core for callers that already hold a
//! parsed [`SourceDocument`].

use crate::config::ConversionConfig;
use crate::deck::DeckBuilder;
use crate::document::SourceDocument;
use crate::error::SlidesError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::images::{ensure_images_dir, image_prefix, ImageExtractor};
use crate::pipeline::segment::Segmenter;
use crate::pipeline::{input, title};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert a notebook or Markdown file into a slide deck on disk.
///
/// The deck goes to `config.output`, or `<input dir>/slides/<stem>.md` by
/// default. Images go to `<deck dir>/<config.images_dir_name>/`.
///
/// # Errors
/// Every failure is fatal. Images written before the failure remain on
/// disk; the deck is only written after the whole document was processed,
/// and is written atomically.
pub fn convert(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, SlidesError> {
    let total_start = Instant::now();
    let input_path = input_path.as_ref();
    info!("Starting conversion: {}", input_path.display());

    // ── Step 1: Resolve and read input ───────────────────────────────────
    let resolved = input::resolve_input(input_path, config.format)?;
    let doc = input::read_document(&resolved)?;

    // ── Step 2: Resolve output locations ─────────────────────────────────
    let output_path = config
        .output
        .clone()
        .unwrap_or_else(|| input::default_output_path(&resolved));
    let images_dir = input::deck_dir(&output_path).join(&config.images_dir_name);
    ensure_images_dir(&images_dir)?;
    info!("Output: {}", output_path.display());

    // ── Step 3: Build the deck ───────────────────────────────────────────
    let mut output = build_deck(&doc, &resolved.stem, &images_dir, config)?;

    // ── Step 4: Write ────────────────────────────────────────────────────
    write_atomic(&output_path, &output.markdown)?;
    output.output_path = Some(output_path);
    output.stats.duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {} slides, {} images, {}ms",
        output.stats.slides, output.stats.images, output.stats.duration_ms
    );
    Ok(output)
}

/// Segment an already parsed document into a deck.
///
/// `stem` is the input's file stem (fallback title and image prefix);
/// `images_dir` must exist. The deck is returned, not written.
pub fn build_deck(
    doc: &SourceDocument,
    stem: &str,
    images_dir: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, SlidesError> {
    let start = Instant::now();
    let units = doc.unit_count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(units);
    }

    let deck_title = title::extract_title(doc, stem);
    debug!("Deck title: {:?}", deck_title);

    let builder = DeckBuilder::new(config, &deck_title);
    let extractor = ImageExtractor::new(
        images_dir,
        config.images_dir_name.clone(),
        image_prefix(stem),
    );
    let segmented = Segmenter::new(config, builder, extractor).run(doc)?;
    let deck = segmented.deck.finish();

    let stats = ConversionStats {
        units,
        slides: 1 + segmented.content_slides,
        separators: deck.separators,
        images: segmented.images.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(stats.separators, stats.images);
    }

    Ok(ConversionOutput {
        markdown: deck.markdown,
        title: deck_title,
        output_path: None,
        images: segmented.images,
        stats,
    })
}

/// Write through a temp file in the target directory, then rename over
/// `path`, so readers never observe a half-written deck.
fn write_atomic(path: &Path, contents: &str) -> Result<(), SlidesError> {
    let write_err = |e: std::io::Error| SlidesError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = input::deck_dir(path);
    std::fs::create_dir_all(&dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
