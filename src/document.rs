//! Source document model: notebooks and flat Markdown.
//!
//! Notebook JSON is loosely typed: `source` may be a string or a list of
//! strings, `outputs` may be absent, and each output carries an arbitrary
//! MIME-keyed `data` map. All of that is resolved here, once, so the rest of
//! the pipeline works with [`Cell`] and [`Output`] and never re-checks field
//! presence.

use crate::error::SlidesError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// MIME type of the only image format extracted from code-cell outputs.
pub const PNG_MIME: &str = "image/png";

/// The two recognised input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Jupyter notebook (`.ipynb`).
    Notebook,
    /// Plain Markdown (`.md`, `.markdown`).
    Markdown,
}

impl SourceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, SlidesError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ipynb" => Ok(SourceFormat::Notebook),
            "md" | "markdown" => Ok(SourceFormat::Markdown),
            _ => Err(SlidesError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: if ext.is_empty() {
                    "<none>".to_string()
                } else {
                    format!(".{ext}")
                },
            }),
        }
    }
}

/// A parsed input document. Never mutated by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    /// Notebook cells in document order.
    Cells(Vec<Cell>),
    /// A flat Markdown text blob.
    Text(String),
}

impl SourceDocument {
    /// Parse raw input text according to `format`.
    ///
    /// `path` is only used for error context.
    pub fn parse(raw: &str, format: SourceFormat, path: &Path) -> Result<Self, SlidesError> {
        match format {
            SourceFormat::Notebook => parse_notebook(raw, path).map(SourceDocument::Cells),
            SourceFormat::Markdown => Ok(SourceDocument::Text(normalise_line_endings(raw))),
        }
    }

    /// Number of content units (cells, or 1 for flat text).
    pub fn unit_count(&self) -> usize {
        match self {
            SourceDocument::Cells(cells) => cells.len(),
            SourceDocument::Text(_) => 1,
        }
    }
}

/// One notebook cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Markdown { source: String },
    Code { source: String, outputs: Vec<Output> },
    /// Any other cell kind (`raw`, ...). Kept so cell indices match the
    /// file; never contributes content.
    Raw,
}

/// One code-cell output. Only the PNG payload is retained.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Output {
    /// Base64-encoded PNG data, if the output carried any.
    pub image_png: Option<String>,
}

// ── Raw notebook shape ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawNotebook {
    cells: Option<Vec<RawCell>>,
}

#[derive(Deserialize)]
struct RawCell {
    cell_type: String,
    source: Option<MultilineString>,
    #[serde(default)]
    outputs: Vec<RawOutput>,
}

#[derive(Deserialize)]
struct RawOutput {
    #[serde(default)]
    data: Option<HashMap<String, serde_json::Value>>,
}

/// nbformat stores multi-line text either as one string or as a list of lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineString {
    One(String),
    Many(Vec<String>),
}

impl MultilineString {
    fn join(self) -> String {
        match self {
            MultilineString::One(s) => s,
            MultilineString::Many(parts) => parts.concat(),
        }
    }
}

fn parse_notebook(raw: &str, path: &Path) -> Result<Vec<Cell>, SlidesError> {
    let notebook: RawNotebook =
        serde_json::from_str(raw).map_err(|e| SlidesError::InvalidNotebook {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let raw_cells = notebook.cells.ok_or(SlidesError::MissingField {
        field: "cells",
        cell: None,
    })?;

    let mut cells = Vec::with_capacity(raw_cells.len());
    for (idx, raw_cell) in raw_cells.into_iter().enumerate() {
        let kind = raw_cell.cell_type.as_str();
        if kind != "markdown" && kind != "code" {
            debug!("Ignoring {} cell {}", kind, idx);
            cells.push(Cell::Raw);
            continue;
        }

        let source = raw_cell
            .source
            .ok_or(SlidesError::MissingField {
                field: "source",
                cell: Some(idx),
            })?
            .join();
        let source = normalise_line_endings(&source);

        if kind == "markdown" {
            cells.push(Cell::Markdown { source });
            continue;
        }

        let outputs = raw_cell
            .outputs
            .into_iter()
            .enumerate()
            .map(|(out_idx, raw_out)| parse_output(raw_out, idx, out_idx))
            .collect::<Result<Vec<_>, _>>()?;
        cells.push(Cell::Code { source, outputs });
    }

    Ok(cells)
}

fn parse_output(raw: RawOutput, cell: usize, output: usize) -> Result<Output, SlidesError> {
    let Some(mut data) = raw.data else {
        return Ok(Output::default());
    };

    let image_png = match data.remove(PNG_MIME) {
        None => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Array(parts)) => {
            let mut joined = String::new();
            for part in parts {
                match part {
                    serde_json::Value::String(s) => joined.push_str(&s),
                    other => {
                        return Err(SlidesError::MalformedPayload {
                            cell,
                            output,
                            detail: format!("expected string fragment, found {other}"),
                        })
                    }
                }
            }
            Some(joined)
        }
        Some(other) => {
            return Err(SlidesError::MalformedPayload {
                cell,
                output,
                detail: format!("expected base64 string, found {other}"),
            })
        }
    };

    Ok(Output { image_png })
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}
