//! Segmentation: walk the document's content units and decide slide
//! boundaries.
//!
//! ## Notebooks
//!
//! Every markdown cell that survives cleanup becomes its own slide, and so
//! does every code cell that produced at least one PNG. Code is never shown;
//! only its figures are, optionally under a `##` subheading taken from the
//! cell's leading comment. The first markdown cell that opens with `# ...`
//! is the title cell: its heading line is dropped (it is already on the
//! title slide) and the rest of the cell is treated like any other.
//!
//! ## Markdown
//!
//! Frontmatter and the leading `# ...` line are stripped, and the remaining
//! text is cleaned as one fragment. There is no automatic splitting: authored
//! `---` lines are removed by cleanup, so a Markdown input always yields a
//! single content slide.

use crate::config::ConversionConfig;
use crate::deck::{DeckBuilder, FRAGMENT_END, SLIDE_SEPARATOR};
use crate::document::{Cell, Output, SourceDocument};
use crate::error::SlidesError;
use crate::output::ExtractedImage;
use crate::pipeline::clean::clean_markdown;
use crate::pipeline::images::ImageExtractor;
use crate::pipeline::title;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// YAML-style frontmatter at the very start of a Markdown file.
static RE_FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n.*?\n---(?:\n|\z)").unwrap());

/// Per-run segmentation state.
pub struct Segmenter<'a> {
    config: &'a ConversionConfig,
    deck: DeckBuilder,
    images: ImageExtractor,
    extracted: Vec<ExtractedImage>,
    /// The title cell has not been consumed yet.
    title_pending: bool,
    /// Nothing has been emitted after the title slide yet.
    first_content: bool,
    content_slides: usize,
}

/// What a segmentation run produced.
pub struct Segmented {
    pub deck: DeckBuilder,
    pub images: Vec<ExtractedImage>,
    /// Content slides after the title slide.
    pub content_slides: usize,
}

impl<'a> Segmenter<'a> {
    pub fn new(config: &'a ConversionConfig, deck: DeckBuilder, images: ImageExtractor) -> Self {
        Self {
            config,
            deck,
            images,
            extracted: Vec::new(),
            title_pending: true,
            first_content: true,
            content_slides: 0,
        }
    }

    /// Segment the whole document.
    pub fn run(mut self, doc: &SourceDocument) -> Result<Segmented, SlidesError> {
        let total = doc.unit_count();
        match doc {
            SourceDocument::Cells(cells) => {
                for (idx, cell) in cells.iter().enumerate() {
                    let emitted = match cell {
                        Cell::Markdown { source } => self.markdown_cell(idx, source),
                        Cell::Code { source, outputs } => self.code_cell(idx, source, outputs)?,
                        Cell::Raw => false,
                    };
                    self.notify_unit(idx + 1, total, emitted);
                }
            }
            SourceDocument::Text(text) => {
                let emitted = self.markdown_text(text);
                self.notify_unit(1, total, emitted);
            }
        }

        Ok(Segmented {
            deck: self.deck,
            images: self.extracted,
            content_slides: self.content_slides,
        })
    }

    /// The title heading is only consumed from a cell that opens with `# `.
    /// A title heading further down a cell stays in that cell's body, and
    /// the first later cell that opens with `# ` loses its heading instead.
    fn markdown_cell(&mut self, idx: usize, source: &str) -> bool {
        let mut text = source;
        if self.title_pending && title::starts_with_top_heading(source) {
            self.title_pending = false;
            text = title::strip_leading_heading(source);
            debug!("Cell {}: title heading consumed", idx);
        }

        match clean_markdown(text) {
            Some(cleaned) => {
                self.begin_slide();
                self.deck.push(cleaned);
                self.deck.push(FRAGMENT_END);
                true
            }
            None => {
                debug!("Cell {}: nothing left after cleanup", idx);
                false
            }
        }
    }

    fn code_cell(
        &mut self,
        idx: usize,
        source: &str,
        outputs: &[Output],
    ) -> Result<bool, SlidesError> {
        let mut found = Vec::new();
        for (out_idx, output) in outputs.iter().enumerate() {
            if let Some(image) = self.images.extract(output, idx, out_idx)? {
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_image_extracted(image.index, &image.relative_path, image.bytes);
                }
                found.push(image);
            }
        }

        if found.is_empty() {
            return Ok(false);
        }

        self.begin_slide();
        if let Some(heading) = title::code_cell_title(source) {
            self.deck.push(format!("## {heading}\n\n"));
        }
        for image in &found {
            self.deck.push(self.config.image_embed(&image.relative_path));
        }
        debug!("Cell {}: {} figure(s)", idx, found.len());
        self.extracted.extend(found);
        Ok(true)
    }

    fn markdown_text(&mut self, text: &str) -> bool {
        let body = RE_FRONTMATTER.replace(text, "");
        let body = body.trim();
        if body.is_empty() {
            return false;
        }

        let body = title::strip_leading_heading(body).trim();
        if body.is_empty() {
            return false;
        }

        match clean_markdown(body) {
            Some(cleaned) => {
                self.begin_slide();
                self.deck.push(cleaned);
                self.deck.push(FRAGMENT_END);
                true
            }
            None => false,
        }
    }

    /// Separate from the previous content slide, if there is one.
    fn begin_slide(&mut self) {
        if !self.first_content {
            self.deck.push(SLIDE_SEPARATOR);
        }
        self.first_content = false;
        self.content_slides += 1;
    }

    fn notify_unit(&self, unit: usize, total: usize, emitted: bool) {
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_unit_complete(unit, total, emitted);
        }
    }
}
