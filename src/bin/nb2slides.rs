//! CLI binary for nb2slides.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use nb2slides::{
    convert, ConversionConfig, ConversionProgressCallback, ProgressCallback, SourceFormat,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar over the document's cells plus one log
/// line per extracted figure.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} cells",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    /// Stop the spinner tick and remove the bar from the terminal.
    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_units: usize) {
        self.bar.set_length(total_units as u64);
    }

    fn on_unit_complete(&self, _unit_num: usize, _total_units: usize, _emitted: bool) {
        self.bar.inc(1);
    }

    fn on_image_extracted(&self, _index: usize, relative_path: &str, bytes: usize) {
        self.bar.println(format!(
            "  {} Extracted {}  {}",
            green("✓"),
            relative_path,
            dim(&format!("{bytes} bytes")),
        ));
    }

    fn on_conversion_complete(&self, _separators: usize, _images: usize) {
        self.clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Notebook → lectures/First_Order_Systems/slides/First_Order_Systems.md
  nb2slides lectures/First_Order_Systems/First_Order_Systems.ipynb

  # Explicit output path (images go to ./deck/images/)
  nb2slides notebook.ipynb deck/custom-output.md

  # Markdown notes with a different theme and figure width
  nb2slides --theme gaia --image-width 640 notes.md

  # Machine-readable summary
  nb2slides --json notebook.ipynb > summary.json

RENDERING:
  The output is Marp Markdown. Render it with:
    marp slides/<name>.md --pdf --allow-local-files
"#;

/// Convert lecture notebooks and Markdown notes to Marp slides.
#[derive(Parser, Debug)]
#[command(
    name = "nb2slides",
    version,
    about = "Convert lecture notebooks and Markdown notes to Marp slides",
    long_about = "Convert Jupyter notebooks (.ipynb) or Markdown documents (.md) into a Marp \
slide deck. Figures stored in notebook outputs are extracted as PNG files and embedded; \
code itself is not shown.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Notebook (.ipynb) or Markdown (.md) file.
    input: PathBuf,

    /// Deck path. Default: <input dir>/slides/<input stem>.md
    output: Option<PathBuf>,

    /// Treat the input as this format regardless of its extension.
    #[arg(long, value_enum, env = "NB2SLIDES_FORMAT")]
    format: Option<FormatArg>,

    /// Marp theme written to the frontmatter.
    #[arg(long, env = "NB2SLIDES_THEME", default_value = "custom")]
    theme: String,

    /// Math renderer written to the frontmatter (katex, mathjax).
    #[arg(long, env = "NB2SLIDES_MATH", default_value = "katex")]
    math: String,

    /// Omit the math key from the frontmatter.
    #[arg(long, env = "NB2SLIDES_NO_MATH")]
    no_math: bool,

    /// Disable page numbers.
    #[arg(long, env = "NB2SLIDES_NO_PAGINATE")]
    no_paginate: bool,

    /// Display width of embedded figures, in pixels.
    #[arg(long, env = "NB2SLIDES_IMAGE_WIDTH", default_value_t = 500,
          value_parser = clap::value_parser!(u32).range(1..))]
    image_width: u32,

    /// Name of the image directory created beside the deck.
    #[arg(long, env = "NB2SLIDES_IMAGES_DIR", default_value = "images")]
    images_dir: String,

    /// Print a JSON summary (ConversionOutput without the deck text) to stdout.
    #[arg(long, env = "NB2SLIDES_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "NB2SLIDES_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "NB2SLIDES_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "NB2SLIDES_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Notebook,
    Markdown,
}

impl From<FormatArg> for SourceFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Notebook => SourceFormat::Notebook,
            FormatArg::Markdown => SourceFormat::Markdown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // While the progress bar is shown it carries the feedback; keep library
    // logs to errors unless --verbose asks for everything.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let cli_progress = show_progress.then(CliProgressCallback::new);
    let progress_cb: Option<ProgressCallback> = cli_progress
        .clone()
        .map(|cb| cb as Arc<dyn ConversionProgressCallback>);

    // ── Run conversion ───────────────────────────────────────────────────
    let result = build_config(&cli, progress_cb).and_then(|config| {
        if !cli.quiet && !cli.json {
            eprintln!("{} Converting {}", cyan("◆"), bold(&cli.input.display().to_string()));
        }
        convert(&cli.input, &config)
            .with_context(|| format!("Conversion of '{}' failed", cli.input.display()))
    });
    if result.is_err() {
        // A failed run never reaches on_conversion_complete.
        if let Some(ref progress) = cli_progress {
            progress.clear();
        }
    }
    let mut output = result?;

    if cli.json {
        output.markdown.clear();
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    if !cli.quiet {
        let deck = output
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        eprintln!("{}  Conversion complete  →  {}", green("✔"), bold(&deck));
        eprintln!(
            "   Slides: {}  Separators: {}  Images: {}  {}",
            output.stats.slides,
            output.stats.separators,
            output.stats.images,
            dim(&format!("{}ms", output.stats.duration_ms)),
        );
        eprintln!();
        eprintln!("Next steps:");
        eprintln!("  1. Review: {deck}");
        eprintln!("  2. Generate PDF: marp {deck} --pdf --allow-local-files");
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .theme(cli.theme.clone())
        .math(if cli.no_math { None } else { Some(cli.math.clone()) })
        .paginate(!cli.no_paginate)
        .image_width(cli.image_width)
        .images_dir_name(cli.images_dir.clone());

    if let Some(ref out) = cli.output {
        builder = builder.output(out.clone());
    }
    if let Some(format) = cli.format {
        builder = builder.format(format.into());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
