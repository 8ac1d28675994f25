//! Progress-callback trait for per-cell conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the segmenter walks the document. The CLI uses it to drive a
//! progress bar and to list extracted figures.
//!
//! # Example
//!
//! ```rust
//! use nb2slides::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct ImageCounter {
//!     seen: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for ImageCounter {
//!     fn on_image_extracted(&self, index: usize, relative_path: &str, bytes: usize) {
//!         self.seen.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("#{index}: {relative_path} ({bytes} bytes)");
//!     }
//! }
//!
//! let counter = Arc::new(ImageCounter { seen: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each content unit.
///
/// A content unit is one notebook cell, or the whole text of a Markdown
/// input. All methods have default no-op implementations so callers only
/// override what they care about. Conversion is single-threaded, but the
/// trait is `Send + Sync` so a configured callback can be shared with other
/// threads (e.g. a UI).
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before the first unit is processed.
    ///
    /// # Arguments
    /// * `total_units` — number of cells (1 for Markdown input)
    fn on_conversion_start(&self, total_units: usize) {
        let _ = total_units;
    }

    /// Called after a unit has been segmented.
    ///
    /// # Arguments
    /// * `unit_num`    — 1-indexed unit number
    /// * `total_units` — total units
    /// * `emitted`     — whether the unit contributed anything to the deck
    fn on_unit_complete(&self, unit_num: usize, total_units: usize, emitted: bool) {
        let _ = (unit_num, total_units, emitted);
    }

    /// Called right after an image has been written to disk.
    ///
    /// # Arguments
    /// * `index`         — 1-based image counter value used in the filename
    /// * `relative_path` — path as embedded in the deck (`images/<file>`)
    /// * `bytes`         — decoded payload size
    fn on_image_extracted(&self, index: usize, relative_path: &str, bytes: usize) {
        let _ = (index, relative_path, bytes);
    }

    /// Called once after the deck has been assembled.
    ///
    /// # Arguments
    /// * `separators` — slide separators in the deck body
    /// * `images`     — images extracted during the run
    fn on_conversion_complete(&self, separators: usize, images: usize) {
        let _ = (separators, images);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
