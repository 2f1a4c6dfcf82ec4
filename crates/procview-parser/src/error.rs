//! Diagnostics reported while reading a BPMN document.
//!
//! A [`Diagnostic`] is a single error or warning with an optional
//! [`ErrorCode`], labeled byte spans into the document and optional help
//! text. Fatal diagnostics are returned together as a [`ParseError`];
//! warnings are logged and otherwise dropped.
//!
//! # Example
//!
//! ```
//! # use procview_parser::error::{Diagnostic, ErrorCode};
//! # use procview_parser::Span;
//! let diag = Diagnostic::error("flow node id `Task_1` is used twice")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(120..160), "duplicate id")
//!     .with_secondary_label(Span::new(40..80), "first used here")
//!     .with_help("element ids must be unique within a document");
//! assert_eq!(diag.to_string(), "error[E200]: flow node id `Task_1` is used twice");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
