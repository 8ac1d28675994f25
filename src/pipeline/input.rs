//! Input resolution: validate the source path, detect its format, read it,
//! and work out where the deck and its images go.
//!
//! We check existence and read permission up front so callers get a
//! meaningful error naming the file rather than a bare `io::Error` from deep
//! inside the run. Format detection happens here too, so an unsupported
//! extension is rejected before any directory is created.

use crate::document::{SourceDocument, SourceFormat};
use crate::error::SlidesError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory created beside the input when no output path is given.
pub const DEFAULT_SLIDES_DIR: &str = "slides";

/// A validated input file.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub format: SourceFormat,
    /// File name without extension; drives the fallback title, the default
    /// output name, and the image filename prefix.
    pub stem: String,
}

/// Validate `path` and detect its format (unless `forced`).
pub fn resolve_input(path: &Path, forced: Option<SourceFormat>) -> Result<ResolvedInput, SlidesError> {
    if !path.exists() {
        return Err(SlidesError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = match forced {
        Some(f) => f,
        None => SourceFormat::from_path(path)?,
    };

    match std::fs::File::open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(SlidesError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(SlidesError::InputReadFailed {
                path: path.to_path_buf(),
                source: e,
            });
        }
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "slides".to_string());

    debug!("Resolved {:?} input: {}", format, path.display());
    Ok(ResolvedInput {
        path: path.to_path_buf(),
        format,
        stem,
    })
}

/// Read and parse the resolved input.
pub fn read_document(input: &ResolvedInput) -> Result<SourceDocument, SlidesError> {
    let raw = std::fs::read_to_string(&input.path).map_err(|e| SlidesError::InputReadFailed {
        path: input.path.clone(),
        source: e,
    })?;
    SourceDocument::parse(&raw, input.format, &input.path)
}

/// `<input dir>/slides/<stem>.md`.
pub fn default_output_path(input: &ResolvedInput) -> PathBuf {
    input
        .path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_SLIDES_DIR)
        .join(format!("{}.md", input.stem))
}

/// Directory that holds the deck; images live in a subdirectory of it.
pub fn deck_dir(output_path: &Path) -> PathBuf {
    match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
