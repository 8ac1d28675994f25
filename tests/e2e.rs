//! End-to-end tests for nb2slides.
//!
//! Each test writes a small notebook or Markdown file into a temp directory,
//! runs the file-to-file conversion, and inspects the deck and the image
//! directory on disk.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use base64::{engine::general_purpose::STANDARD, Engine as _};
use nb2slides::{
    convert, ConversionConfig, ConversionProgressCallback, SlidesError, SourceFormat,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// A 1×1 PNG.
const TINY_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write input");
    path
}

fn write_notebook(dir: &TempDir, name: &str, cells: serde_json::Value) -> PathBuf {
    let nb = json!({
        "cells": cells,
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 5
    });
    write_file(dir, name, &nb.to_string())
}

fn png_output() -> serde_json::Value {
    json!({
        "output_type": "display_data",
        "data": { "image/png": TINY_PNG, "text/plain": ["<Figure size 640x480>"] },
        "metadata": {}
    })
}

fn list_images(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Deck text after the frontmatter block.
fn body(md: &str) -> &str {
    md.split_once("<!-- _class: title -->\n\n")
        .map(|(_, rest)| rest)
        .expect("deck must contain the title slide marker")
}

// ── Notebook scenarios ───────────────────────────────────────────────────────

#[test]
fn test_two_cell_notebook() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "my-lecture.ipynb",
        json!([
            { "cell_type": "markdown", "metadata": {}, "source": ["# My Lecture\n", "\n", "Intro text"] },
            { "cell_type": "code", "metadata": {}, "execution_count": 1,
              "source": ["plt.plot(t, y)"], "outputs": [png_output()] }
        ]),
    );

    let output = convert(&input, &ConversionConfig::default()).expect("conversion should succeed");

    let deck_path = dir.path().join("slides/my-lecture.md");
    assert_eq!(output.output_path.as_deref(), Some(deck_path.as_path()));
    let md = std::fs::read_to_string(&deck_path).unwrap();
    assert_eq!(md, output.markdown);

    assert!(md.starts_with("---\nmarp: true\ntheme: custom\nmath: katex\npaginate: true\n---\n"));
    assert_eq!(
        body(&md),
        "# My Lecture\n\n---\n\nIntro text\n\n\n---\n\n![width:500px](images/my_lecture_01.png)\n\n"
    );
    assert_eq!(md.matches("# My Lecture").count(), 1);

    let images = list_images(&dir.path().join("slides/images"));
    assert_eq!(images, vec!["my_lecture_01.png"]);
    assert_eq!(output.images[0].width, Some(1));
    assert_eq!(output.stats.images, 1);
    assert_eq!(output.stats.slides, 3);
    assert_eq!(output.stats.separators, 2);
}

#[test]
fn test_images_numbered_in_order() {
    let dir = TempDir::new().unwrap();
    let mut cells = vec![json!({ "cell_type": "markdown", "source": "# Plots" })];
    for i in 0..11 {
        cells.push(json!({
            "cell_type": "code",
            "source": format!("# @title Figure {i}\nplot({i})"),
            "outputs": [png_output()]
        }));
    }
    let input = write_notebook(&dir, "Plots.ipynb", serde_json::Value::Array(cells));
    let out_path = dir.path().join("deck/plots.md");

    let config = ConversionConfig::builder().output(&out_path).build().unwrap();
    let output = convert(&input, &config).unwrap();

    let expected: Vec<String> = (1..=11).map(|i| format!("Plots_{i:02}.png")).collect();
    assert_eq!(list_images(&dir.path().join("deck/images")), expected);

    let md = std::fs::read_to_string(&out_path).unwrap();
    let embeds: Vec<&str> = md.lines().filter(|l| l.starts_with("![width:")).collect();
    let want: Vec<String> = expected
        .iter()
        .map(|f| format!("![width:500px](images/{f})"))
        .collect();
    assert_eq!(embeds, want);
    assert!(md.contains("## Figure 0\n\n![width:500px](images/Plots_01.png)"));
    assert!(md.contains("## Figure 10\n\n![width:500px](images/Plots_11.png)"));
    assert_eq!(output.stats.slides, 12);
}

#[test]
fn test_invalid_payload_aborts_without_deck() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "broken.ipynb",
        json!([
            { "cell_type": "markdown", "source": "# Broken" },
            { "cell_type": "code", "source": "a()", "outputs": [png_output()] },
            { "cell_type": "code", "source": "b()",
              "outputs": [{ "output_type": "display_data", "data": { "image/png": "@@@not-base64@@@" } }] }
        ]),
    );

    let err = convert(&input, &ConversionConfig::default()).unwrap_err();
    assert!(
        matches!(err, SlidesError::MalformedPayload { cell: 2, output: 0, .. }),
        "got: {err}"
    );

    assert!(!dir.path().join("slides/broken.md").exists());
    // The image written before the failure stays on disk.
    assert_eq!(
        list_images(&dir.path().join("slides/images")),
        vec!["broken_01.png"]
    );
}

#[test]
fn test_notebook_cleanup_and_empty_cells() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "clean.ipynb",
        json!([
            { "cell_type": "markdown", "source": "[![Open In Colab](https://colab.research.google.com/assets/colab-badge.svg)](https://colab.research.google.com/github/u/r/blob/main/clean.ipynb)" },
            { "cell_type": "markdown", "source": "# Cleanup\n" },
            { "cell_type": "markdown", "source": "---" },
            { "cell_type": "markdown", "source": "!!! note \"Heads up\"\n    Body text" },
            { "cell_type": "raw", "source": "ignored" },
            { "cell_type": "code", "source": "x = 1", "outputs": [] }
        ]),
    );

    let output = convert(&input, &ConversionConfig::default()).unwrap();
    assert_eq!(output.title, "Cleanup");
    assert_eq!(
        body(&output.markdown),
        "# Cleanup\n\n---\n\n> **Heads up**\n>\n> Body text\n\n"
    );
    assert!(list_images(&dir.path().join("slides/images")).is_empty());
}

#[test]
fn test_notebook_without_heading_uses_filename() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "first-order_systems.ipynb",
        json!([{ "cell_type": "markdown", "source": "## Overview\nText" }]),
    );
    let output = convert(&input, &ConversionConfig::default()).unwrap();
    assert_eq!(output.title, "First Order Systems");
    assert!(output
        .markdown
        .contains("# First Order Systems\n\n---\n\n## Overview\nText\n\n"));
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Start(usize),
    Unit(usize, usize, bool),
    Image(usize, String),
    Complete(usize, usize),
}

#[derive(Default)]
struct RecordingCallback {
    events: Mutex<Vec<Event>>,
}

impl RecordingCallback {
    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl ConversionProgressCallback for RecordingCallback {
    fn on_conversion_start(&self, total_units: usize) {
        self.record(Event::Start(total_units));
    }

    fn on_unit_complete(&self, unit_num: usize, total_units: usize, emitted: bool) {
        self.record(Event::Unit(unit_num, total_units, emitted));
    }

    fn on_image_extracted(&self, index: usize, relative_path: &str, _bytes: usize) {
        self.record(Event::Image(index, relative_path.to_string()));
    }

    fn on_conversion_complete(&self, separators: usize, images: usize) {
        self.record(Event::Complete(separators, images));
    }
}

#[test]
fn test_progress_events_follow_the_run() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "tracked.ipynb",
        json!([
            { "cell_type": "markdown", "source": "" },
            { "cell_type": "code", "source": "plot()", "outputs": [png_output()] }
        ]),
    );

    let recorder = Arc::new(RecordingCallback::default());
    let config = ConversionConfig::builder()
        .progress_callback(recorder.clone() as Arc<dyn ConversionProgressCallback>)
        .build()
        .unwrap();
    let output = convert(&input, &config).unwrap();

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            Event::Start(2),
            Event::Unit(1, 2, false),
            Event::Image(1, "images/tracked_01.png".to_string()),
            Event::Unit(2, 2, true),
            Event::Complete(output.stats.separators, 1),
        ]
    );
    assert_eq!(output.stats.separators, 1);
}

#[test]
fn test_no_completion_event_on_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "failing.ipynb",
        json!([
            { "cell_type": "code", "source": "b()",
              "outputs": [{ "output_type": "display_data", "data": { "image/png": "@@@" } }] }
        ]),
    );

    let recorder = Arc::new(RecordingCallback::default());
    let config = ConversionConfig::builder()
        .progress_callback(recorder.clone() as Arc<dyn ConversionProgressCallback>)
        .build()
        .unwrap();
    assert!(convert(&input, &config).is_err());

    let events = recorder.events.lock().unwrap().clone();
    assert_eq!(events, vec![Event::Start(1)]);
}

// ── Markdown scenarios ───────────────────────────────────────────────────────

#[test]
fn test_markdown_with_frontmatter() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "notes.md",
        "---\nlayout: lecture\n---\n# Title\n\n---\n\nFirst paragraph.\n\nSecond paragraph.\n",
    );

    let output = convert(&input, &ConversionConfig::default()).unwrap();
    assert_eq!(output.title, "Title");
    assert_eq!(
        body(&output.markdown),
        "# Title\n\n---\n\nFirst paragraph.\n\nSecond paragraph.\n\n"
    );
    assert_eq!(output.stats.slides, 2);
    assert_eq!(output.stats.separators, 1);
}

#[test]
fn test_markdown_title_only() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "empty.md", "# Just A Title\n");
    let output = convert(&input, &ConversionConfig::default()).unwrap();
    assert_eq!(body(&output.markdown), "# Just A Title\n\n---\n\n");
    assert_eq!(output.stats.slides, 1);
}

// ── Configuration & errors ───────────────────────────────────────────────────

#[test]
fn test_custom_config_applied() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(
        &dir,
        "cfg.ipynb",
        json!([{ "cell_type": "code", "source": "p()", "outputs": [png_output()] }]),
    );
    let config = ConversionConfig::builder()
        .theme("gaia")
        .math(None)
        .paginate(false)
        .image_width(720)
        .images_dir_name("figures")
        .build()
        .unwrap();

    let output = convert(&input, &config).unwrap();
    let md = &output.markdown;
    assert!(md.starts_with("---\nmarp: true\ntheme: gaia\npaginate: false\n---\n"));
    assert!(md.contains("![width:720px](figures/cfg_01.png)"));
    assert!(dir.path().join("slides/figures/cfg_01.png").exists());
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "slides.pptx", "binary");
    let err = convert(&input, &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, SlidesError::UnsupportedFormat { .. }));
    assert!(!dir.path().join("slides").exists());
}

#[test]
fn test_forced_format() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "README.txt", "# Forced\n\nBody");
    let config = ConversionConfig::builder()
        .format(SourceFormat::Markdown)
        .build()
        .unwrap();
    let output = convert(&input, &config).unwrap();
    assert_eq!(output.title, "Forced");
    assert!(dir.path().join("slides/README.md").exists());
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_notebook(&dir, "bad.ipynb", json!([{ "cell_type": "markdown" }]));
    let err = convert(&input, &ConversionConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SlidesError::MissingField { field: "source", cell: Some(0) }
    ));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = convert(dir.path().join("nope.ipynb"), &ConversionConfig::default()).unwrap_err();
    assert!(matches!(err, SlidesError::FileNotFound { .. }));
}

#[test]
fn test_tiny_png_fixture_is_valid() {
    let bytes = STANDARD.decode(TINY_PNG).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}
