//! Image extraction: base64 PNG payload → numbered file on disk.
//!
//! Notebook outputs already hold the rendered figures, so nothing is
//! re-plotted; the payload is decoded and written verbatim. Only `image/png`
//! is supported.
//!
//! Filenames are `<prefix>_<NN>.png` with a run-local counter that starts at
//! 1 and only ever increases, so names never collide within one run. Two runs
//! sharing one image directory concurrently are not supported.

use crate::document::Output;
use crate::error::SlidesError;
use crate::output::ExtractedImage;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Decodes PNG payloads and persists them under one image directory.
#[derive(Debug)]
pub struct ImageExtractor {
    images_dir: PathBuf,
    dir_name: String,
    prefix: String,
    next_index: usize,
}

impl ImageExtractor {
    /// `images_dir` must exist. `dir_name` is the directory's name as seen
    /// from the deck, used to build the embed path.
    pub fn new(
        images_dir: impl Into<PathBuf>,
        dir_name: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            images_dir: images_dir.into(),
            dir_name: dir_name.into(),
            prefix: prefix.into(),
            next_index: 1,
        }
    }

    #[cfg(test)]
    fn extracted(&self) -> usize {
        self.next_index - 1
    }

    /// Extract the PNG payload of one output, if it has one.
    ///
    /// `cell` and `output` are indices for error context. A payload that is
    /// not valid base64 aborts the run.
    pub fn extract(
        &mut self,
        out: &Output,
        cell: usize,
        output: usize,
    ) -> Result<Option<ExtractedImage>, SlidesError> {
        let Some(ref payload) = out.image_png else {
            return Ok(None);
        };

        let bytes = decode_payload(payload).map_err(|e| SlidesError::MalformedPayload {
            cell,
            output,
            detail: e.to_string(),
        })?;

        let index = self.next_index;
        let filename = format!("{}_{:02}.png", self.prefix, index);
        let path = self.images_dir.join(&filename);

        std::fs::write(&path, &bytes).map_err(|e| SlidesError::ImageWriteFailed {
            path: path.clone(),
            source: e,
        })?;
        self.next_index += 1;

        let (width, height) = match probe_dimensions(&bytes) {
            Some((w, h)) => (Some(w), Some(h)),
            None => {
                warn!("{}: payload is not a readable PNG; written as-is", filename);
                (None, None)
            }
        };
        info!("Extracted {} ({} bytes)", filename, bytes.len());

        Ok(Some(ExtractedImage {
            index,
            relative_path: format!("{}/{}", self.dir_name, filename),
            filename,
            path,
            bytes: bytes.len(),
            width,
            height,
        }))
    }
}

/// Notebook writers wrap base64 at 76 columns; whitespace is not part of
/// the payload.
fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact)
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::with_format(Cursor::new(bytes), image::ImageFormat::Png);
    match reader.into_dimensions() {
        Ok(dims) => Some(dims),
        Err(e) => {
            debug!("PNG header probe failed: {}", e);
            None
        }
    }
}

/// Filename prefix for a given input stem: `-` and spaces become `_`.
pub fn image_prefix(stem: &str) -> String {
    stem.replace(['-', ' '], "_")
}

/// Create the image directory (and parents) if missing.
pub fn ensure_images_dir(dir: &Path) -> Result<(), SlidesError> {
    std::fs::create_dir_all(dir).map_err(|e| SlidesError::ImageWriteFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}
