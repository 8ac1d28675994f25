//! Pipeline stages for notebook-to-slides conversion.
//!
//! Each submodule implements exactly one step, so each is testable alone.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ title ──▶ segment ──┬──▶ clean   (markdown cells / text)
//! (path)   (deck title)         └──▶ images  (code-cell PNG outputs)
//! ```
//!
//! 1. [`input`]   — validate the path, detect the format, read and parse
//! 2. [`title`]   — deck title, title-heading stripping, figure subheadings
//! 3. [`segment`] — walk cells in order and decide slide boundaries
//! 4. [`clean`]   — ordered regex rules removing authoring artefacts
//! 5. [`images`]  — base64 PNG → numbered file under the image directory

pub mod clean;
pub mod images;
pub mod input;
pub mod segment;
pub mod title;
