//! Deck assembly: an append-only fragment list with a fixed opening.
//!
//! The frontmatter and the title slide are pushed by the constructor, so
//! they are always the first two fragments no matter what the segmenter does
//! afterwards. Fragments can only be appended, and their order is the order
//! of the final document.

use crate::config::ConversionConfig;

/// Literal token separating two slides.
pub const SLIDE_SEPARATOR: &str = "\n---\n\n";

/// Blank line terminating each content fragment.
pub const FRAGMENT_END: &str = "\n\n";

/// Builder for one deck.
#[derive(Debug)]
pub struct DeckBuilder {
    fragments: Vec<String>,
}

/// A finished deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub markdown: String,
    /// Slide separators after the frontmatter block.
    pub separators: usize,
}

impl DeckBuilder {
    /// Start a deck with the frontmatter and a title slide for `title`.
    pub fn new(config: &ConversionConfig, title: &str) -> Self {
        Self {
            fragments: vec![config.frontmatter(), format!("# {title}\n{SLIDE_SEPARATOR}")],
        }
    }

    /// Append one fragment.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Concatenate all fragments into the final document.
    pub fn finish(self) -> Deck {
        let separators = self.fragments[1..]
            .iter()
            .map(|f| f.matches("\n---\n").count())
            .sum();
        Deck {
            markdown: self.fragments.concat(),
            separators,
        }
    }
}
