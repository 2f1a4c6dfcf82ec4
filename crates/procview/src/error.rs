//! Error types for procview operations.
//!
//! This module provides the main error type [`ReportError`] which wraps the
//! failures that can occur while parsing a diagram or producing a view.

use std::io;

use thiserror::Error;

use procview_parser::error::ParseError;

/// The main error type for procview operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the diagram source next to the structured parse
/// error, so callers can render source snippets for each diagnostic.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    /// The diagram declares no process, so the report has no title.
    #[error("no process title available")]
    NoProcessTitle,

    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::RenderError>),

    #[error("PDF conversion error: {0}")]
    Pdf(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<handlebars::RenderError> for ReportError {
    fn from(error: handlebars::RenderError) -> Self {
        Self::Template(Box::new(error))
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(error: serde_json::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ReportError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
