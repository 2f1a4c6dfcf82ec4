//! Output backends for procview views.
//!
//! # Pipeline Position
//!
//! ```text
//! BPMN source
//!     ↓ parse
//! DiagramGraph
//!     ↓ view (text / context / figure)
//! Projection
//!     ↓ export (this module)
//! SVG / HTML / PDF
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - figure to SVG document
//! - [`html`] - report context to HTML through a handlebars template
//! - [`pdf`] - HTML to PDF through an external converter
//!
//! # Error Handling
//!
//! Backends return [`Error`], which converts into [`ReportError::Export`] at
//! the crate boundary.
//!
//! [`ReportError::Export`]: crate::ReportError::Export

pub mod html;
pub mod pdf;
pub mod svg;

use thiserror::Error;

use crate::error::ReportError;

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by the message.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O error encountered while reading or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for ReportError {
    fn from(error: Error) -> Self {
        Self::Export(Box::new(error))
    }
}
