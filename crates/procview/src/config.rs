//! Configuration types for procview views and reports.
//!
//! All types implement [`serde::Deserialize`], so they can be loaded from a
//! TOML file. Missing fields fall back to their defaults.
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`TextConfig`] - Which categories the text summary lists.
//! - [`ReportConfig`] - Report template, output directory and PDF converter.
//! - [`StyleConfig`] - Figure styling.
//!
//! # Example
//!
//! ```
//! # use procview::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.text().categories().len(), 11);
//! assert!(config.style().background_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use procview_core::{color::Color, graph::Category};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    text: TextConfig,

    #[serde(default)]
    report: ReportConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(text: TextConfig, report: ReportConfig, style: StyleConfig) -> Self {
        Self {
            text,
            report,
            style,
        }
    }

    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a copy with node details switched on or off in the text view.
    pub fn with_node_details(mut self, include: bool) -> Self {
        self.text.include_node_details = include;
        self
    }

    /// Returns a copy writing reports into `dir`.
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report.report_dir = dir.into();
        self
    }

    /// Returns a copy using the given `wkhtmltopdf` executable.
    pub fn with_wkhtmltopdf(mut self, path: impl Into<PathBuf>) -> Self {
        self.report.wkhtmltopdf = Some(path.into());
        self
    }
}

/// Text summary settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    /// Categories listed, in order.
    #[serde(default = "default_text_categories")]
    categories: Vec<Category>,

    /// Appends a per-node attribute listing.
    #[serde(default)]
    include_node_details: bool,
}

fn default_text_categories() -> Vec<Category> {
    vec![
        Category::StartEvent,
        Category::EndEvent,
        Category::IntermediateCatchEvent,
        Category::IntermediateThrowEvent,
        Category::Task,
        Category::SubProcess,
        Category::ComplexGateway,
        Category::EventBasedGateway,
        Category::InclusiveGateway,
        Category::ExclusiveGateway,
        Category::ParallelGateway,
    ]
}

impl TextConfig {
    pub fn new(categories: Vec<Category>, include_node_details: bool) -> Self {
        Self {
            categories,
            include_node_details,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn include_node_details(&self) -> bool {
        self.include_node_details
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self::new(default_text_categories(), false)
    }
}

/// HTML and PDF report settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Handlebars template file. The built-in template is used when unset.
    #[serde(default)]
    template: Option<PathBuf>,

    /// Directory receiving generated reports.
    #[serde(default = "default_report_dir")]
    report_dir: PathBuf,

    /// Adds the per-node attribute tables to the report context.
    #[serde(default = "default_include_nodes")]
    include_nodes: bool,

    /// `wkhtmltopdf` executable. Looked up on `PATH` when unset.
    #[serde(default)]
    wkhtmltopdf: Option<PathBuf>,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_include_nodes() -> bool {
    true
}

impl ReportConfig {
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn include_nodes(&self) -> bool {
        self.include_nodes
    }

    pub fn wkhtmltopdf(&self) -> Option<&Path> {
        self.wkhtmltopdf.as_deref()
    }

    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template: None,
            report_dir: default_report_dir(),
            include_nodes: default_include_nodes(),
            wkhtmltopdf: None,
        }
    }
}

/// Figure styling. Colors are CSS color strings.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    /// Side length (or diameter) of node markers.
    #[serde(default = "default_marker_size")]
    marker_size: f32,

    #[serde(default = "default_marker_fill")]
    marker_fill: String,

    #[serde(default = "default_stroke")]
    marker_stroke: String,

    #[serde(default = "default_stroke")]
    edge_color: String,

    #[serde(default = "default_font_size")]
    font_size: u16,
}

fn default_marker_size() -> f32 {
    40.0
}

fn default_marker_fill() -> String {
    String::from("white")
}

fn default_stroke() -> String {
    String::from("black")
}

fn default_font_size() -> u16 {
    8
}

impl StyleConfig {
    /// Returns the parsed background color, or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn marker_fill(&self) -> Result<Color, String> {
        Color::new(&self.marker_fill).map_err(|err| format!("Invalid marker fill in config: {err}"))
    }

    pub fn marker_stroke(&self) -> Result<Color, String> {
        Color::new(&self.marker_stroke)
            .map_err(|err| format!("Invalid marker stroke in config: {err}"))
    }

    pub fn edge_color(&self) -> Result<Color, String> {
        Color::new(&self.edge_color).map_err(|err| format!("Invalid edge color in config: {err}"))
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            marker_size: default_marker_size(),
            marker_fill: default_marker_fill(),
            marker_stroke: default_stroke(),
            edge_color: default_stroke(),
            font_size: default_font_size(),
        }
    }
}
