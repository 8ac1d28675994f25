//! Configuration types for notebook-to-slides conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the deck layout
//! the lecture theme expects; most callers only set an output path.

use crate::document::SourceFormat;
use crate::error::SlidesError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Configuration for a conversion run.
///
/// # Example
/// ```rust
/// use nb2slides::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .theme("gaia")
///     .image_width(640)
///     .build()
///     .unwrap();
/// assert_eq!(config.image_width, 640);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Explicit deck path. Default: `<input dir>/slides/<input stem>.md`.
    pub output: Option<PathBuf>,

    /// Force the input format instead of detecting it from the extension.
    pub format: Option<SourceFormat>,

    /// Marp theme identifier written to the frontmatter. Default: `custom`.
    pub theme: String,

    /// Math renderer written to the frontmatter. Default: `katex`.
    /// `None` omits the key.
    pub math: Option<String>,

    /// Enable page numbering. Default: true.
    pub paginate: bool,

    /// Display width in pixels used in every image embed. Default: 500.
    pub image_width: u32,

    /// Name of the image directory created beside the deck. Default: `images`.
    ///
    /// Appears literally in every embed path, so it must be a single
    /// relative path component.
    pub images_dir_name: String,

    /// Optional observer for per-cell and per-image events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output: None,
            format: None,
            theme: "custom".to_string(),
            math: Some("katex".to_string()),
            paginate: true,
            image_width: 500,
            images_dir_name: "images".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("output", &self.output)
            .field("format", &self.format)
            .field("theme", &self.theme)
            .field("math", &self.math)
            .field("paginate", &self.paginate)
            .field("image_width", &self.image_width)
            .field("images_dir_name", &self.images_dir_name)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Render the Marp frontmatter block and the opening of the title slide.
    pub fn frontmatter(&self) -> String {
        let mut fm = String::from("---\nmarp: true\n");
        fm.push_str(&format!("theme: {}\n", self.theme));
        if let Some(ref math) = self.math {
            fm.push_str(&format!("math: {}\n", math));
        }
        fm.push_str(&format!("paginate: {}\n", self.paginate));
        fm.push_str("---\n\n\n<!-- _class: title -->\n\n");
        fm
    }

    /// Markup for one embedded image.
    pub fn image_embed(&self, relative_path: &str) -> String {
        format!("![width:{}px]({})\n\n", self.image_width, relative_path)
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Some(path.into());
        self
    }

    pub fn format(mut self, format: SourceFormat) -> Self {
        self.config.format = Some(format);
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.theme = theme.into();
        self
    }

    pub fn math(mut self, math: Option<String>) -> Self {
        self.config.math = math;
        self
    }

    pub fn paginate(mut self, v: bool) -> Self {
        self.config.paginate = v;
        self
    }

    pub fn image_width(mut self, px: u32) -> Self {
        self.config.image_width = px;
        self
    }

    pub fn images_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.images_dir_name = name.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, SlidesError> {
        let c = &self.config;
        if c.image_width == 0 {
            return Err(SlidesError::InvalidConfig(
                "Image width must be ≥ 1 pixel".into(),
            ));
        }
        if c.theme.trim().is_empty() || c.theme.contains('\n') {
            return Err(SlidesError::InvalidConfig(format!(
                "Theme must be a non-empty single line, got {:?}",
                c.theme
            )));
        }
        let mut components = Path::new(&c.images_dir_name).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(SlidesError::InvalidConfig(format!(
                "Image directory must be a single relative name, got {:?}",
                c.images_dir_name
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frontmatter() {
        let fm = ConversionConfig::default().frontmatter();
        assert_eq!(
            fm,
            "---\nmarp: true\ntheme: custom\nmath: katex\npaginate: true\n---\n\n\n<!-- _class: title -->\n\n"
        );
    }

    #[test]
    fn frontmatter_without_math() {
        let config = ConversionConfig::builder()
            .math(None)
            .paginate(false)
            .build()
            .unwrap();
        let fm = config.frontmatter();
        assert!(!fm.contains("math:"));
        assert!(fm.contains("paginate: false\n"));
    }

    #[test]
    fn image_embed_uses_width() {
        let config = ConversionConfig::default();
        assert_eq!(
            config.image_embed("images/x_01.png"),
            "![width:500px](images/x_01.png)\n\n"
        );
    }

    #[test]
    fn rejects_zero_width() {
        assert!(matches!(
            ConversionConfig::builder().image_width(0).build(),
            Err(SlidesError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_nested_image_dir() {
        for bad in ["a/b", "..", "/abs", ""] {
            assert!(
                ConversionConfig::builder().images_dir_name(bad).build().is_err(),
                "{bad:?} should be rejected"
            );
        }
        assert!(ConversionConfig::builder()
            .images_dir_name("figures")
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_multiline_theme() {
        assert!(ConversionConfig::builder().theme("a\nb").build().is_err());
        assert!(ConversionConfig::builder().theme("  ").build().is_err());
    }
}
