//! procview - text, report and figure views of BPMN process diagrams.
//!
//! A diagram is parsed into a [`DiagramGraph`](graph::DiagramGraph) and then
//! projected into one of three views: a plain-text summary, a report context
//! rendered to HTML or PDF, or a figure exported to SVG.

pub mod classify;
pub mod config;
pub mod details;
pub mod edges;
pub mod export;
pub mod labels;
pub mod report;
pub mod view;

mod error;

pub use procview_core::{color, draw, geometry, graph, identifier};

pub use error::ReportError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose};
use log::{debug, info, trace};
use serde_json::{Map, Value};

use config::AppConfig;
use export::{
    html::HtmlRenderer,
    pdf::{PdfConverter, Wkhtmltopdf},
    svg::FigureStyle,
};
use graph::DiagramGraph;
use report::ReportPaths;
use view::{context::ContextGenerator, figure::Figure, text::TextProjector};

/// Context key of the base64-encoded figure.
pub const ENCODED_IMAGE_KEY: &str = "encoded_image";

/// Builder for parsing diagrams and rendering their views.
///
/// # Examples
///
/// ```rust,no_run
/// use procview::{ReportBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("order.bpmn").expect("Failed to read");
///
/// let builder = ReportBuilder::new(AppConfig::default());
/// let graph = builder.parse(&source).expect("Failed to parse");
///
/// println!("{}", builder.render_text(&graph));
/// let svg = builder.render_svg(&graph).expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse BPMN XML into a diagram graph.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Parse`] with the source attached if the
    /// document is malformed or is not a BPMN definitions document.
    pub fn parse(&self, source: &str) -> Result<DiagramGraph, ReportError> {
        info!("Parsing diagram");

        let graph = procview_parser::parse(source)
            .map_err(|err| ReportError::new_parse_error(err, source))?;

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            processes = graph.process_elements().len();
            "Diagram parsed successfully"
        );
        trace!(graph:?; "Parsed diagram");

        Ok(graph)
    }

    /// Read and parse a BPMN file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be read, or the errors
    /// of [`ReportBuilder::parse`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DiagramGraph, ReportError> {
        let path = path.as_ref();
        info!(path:? = path; "Reading diagram file");
        let source = fs::read_to_string(path)?;
        self.parse(&source)
    }

    /// Render the plain-text summary.
    pub fn render_text(&self, graph: &DiagramGraph) -> String {
        TextProjector::new(graph, self.config.text()).project()
    }

    /// Render the report context, without the encoded image.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoProcessTitle`] if the graph declares no
    /// process.
    pub fn render_context(&self, graph: &DiagramGraph) -> Result<Map<String, Value>, ReportError> {
        ContextGenerator::new(graph, self.config.report().include_nodes()).generate()
    }

    /// Project the graph into a figure.
    pub fn render_figure(&self, graph: &DiagramGraph) -> Figure {
        Figure::from_graph(graph)
    }

    /// Render the figure to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Export`] if the configured style is invalid.
    pub fn render_svg(&self, graph: &DiagramGraph) -> Result<String, ReportError> {
        info!("Rendering figure");
        let style = FigureStyle::from_config(self.config.style())?;
        let svg = self.render_figure(graph).to_svg_string(&style);
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Encode an image for embedding into a report.
    pub fn encode_image(image: &[u8]) -> String {
        general_purpose::STANDARD.encode(image)
    }

    /// Render the HTML report with the figure embedded.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ReportBuilder::render_context`] and
    /// [`ReportBuilder::render_svg`], [`ReportError::Io`] if the configured
    /// template cannot be read, and [`ReportError::Template`] if rendering
    /// fails.
    pub fn render_html(&self, graph: &DiagramGraph) -> Result<String, ReportError> {
        let svg = self.render_svg(graph)?;
        self.render_html_with_image(graph, &svg)
    }

    /// Render the PDF report.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ReportBuilder::render_html`] and
    /// [`ReportError::Pdf`] if the conversion fails.
    pub fn render_pdf(
        &self,
        graph: &DiagramGraph,
        converter: &dyn PdfConverter,
    ) -> Result<Vec<u8>, ReportError> {
        let html = self.render_html(graph)?;
        converter.convert(&html)
    }

    /// The PDF converter named in configuration.
    pub fn pdf_converter(&self) -> Wkhtmltopdf {
        self.config
            .report()
            .wkhtmltopdf()
            .map(Wkhtmltopdf::new)
            .unwrap_or_default()
    }

    /// Report output paths for today, named after `input` when given.
    pub fn paths(&self, input: Option<&Path>) -> ReportPaths {
        ReportPaths::for_today(self.config.report().report_dir(), input)
    }

    /// Write the figure and the HTML report into the report directory.
    ///
    /// Returns the path of the HTML file.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ReportBuilder::render_html`] and any I/O
    /// error raised while writing.
    pub fn write_html_report(
        &self,
        graph: &DiagramGraph,
        input: Option<&Path>,
    ) -> Result<PathBuf, ReportError> {
        let paths = self.paths(input);
        let html = self.write_image_and_render(graph, &paths)?;

        let target = paths.html();
        fs::write(&target, html)?;
        info!(path:? = target; "HTML report written");
        Ok(target)
    }

    /// Write the figure and the PDF report into the report directory.
    ///
    /// Returns the path of the PDF file.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ReportBuilder::render_pdf`] and any I/O
    /// error raised while writing.
    pub fn write_pdf_report(
        &self,
        graph: &DiagramGraph,
        input: Option<&Path>,
        converter: &dyn PdfConverter,
    ) -> Result<PathBuf, ReportError> {
        let paths = self.paths(input);
        let html = self.write_image_and_render(graph, &paths)?;
        let pdf = converter.convert(&html)?;

        let target = paths.pdf();
        fs::write(&target, pdf)?;
        info!(path:? = target; "PDF report written");
        Ok(target)
    }

    fn write_image_and_render(
        &self,
        graph: &DiagramGraph,
        paths: &ReportPaths,
    ) -> Result<String, ReportError> {
        paths.ensure_dir()?;

        let svg = self.render_svg(graph)?;
        let image = paths.image();
        fs::write(&image, &svg)?;
        debug!(path:? = image; "Figure written");

        self.render_html_with_image(graph, &svg)
    }

    fn render_html_with_image(&self, graph: &DiagramGraph, svg: &str) -> Result<String, ReportError> {
        info!("Rendering HTML report");
        let mut context = self.render_context(graph)?;
        context.insert(
            ENCODED_IMAGE_KEY.to_string(),
            Value::String(Self::encode_image(svg.as_bytes())),
        );

        let renderer = match self.config.report().template() {
            Some(path) => HtmlRenderer::from_file(path)?,
            None => HtmlRenderer::new(),
        };
        renderer.render(&context)
    }
}
