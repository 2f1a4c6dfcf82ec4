//! HTML report rendering through handlebars templates.

use std::{fs, path::Path};

use handlebars::Handlebars;
use log::{debug, info};
use serde_json::{Map, Value};

use crate::error::ReportError;

/// Report template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.html.hbs");

/// Renders report contexts to HTML.
///
/// # Examples
///
/// ```
/// # use procview::export::html::HtmlRenderer;
/// # use serde_json::{Map, Value};
/// let renderer = HtmlRenderer::with_template("<h1>{{model_title}}</h1>");
///
/// let mut context = Map::new();
/// context.insert("model_title".to_string(), Value::from("Process_1"));
/// assert_eq!(renderer.render(&context).unwrap(), "<h1>Process_1</h1>");
/// ```
#[derive(Debug)]
pub struct HtmlRenderer {
    handlebars: Handlebars<'static>,
    template: String,
}

impl HtmlRenderer {
    /// Creates a renderer using the built-in report template.
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            handlebars: Handlebars::new(),
            template: template.into(),
        }
    }

    /// Creates a renderer from a template file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading report template");
        let template = fs::read_to_string(path)?;
        Ok(Self::with_template(template))
    }

    /// Renders a report context. Values are HTML-escaped.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Template`] if the template is malformed or
    /// fails to render.
    pub fn render(&self, context: &Map<String, Value>) -> Result<String, ReportError> {
        let html = self.handlebars.render_template(&self.template, context)?;
        debug!(bytes = html.len(); "HTML report rendered");
        Ok(html)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
