//! The three projections of a process diagram.
//!
//! Every projector reads an immutable [`DiagramGraph`] and builds its own
//! [`LabelIndex`], so a projection never depends on another one having run.
//!
//! - [`text::TextProjector`] - plain-text summary.
//! - [`context::ContextGenerator`] - template context for HTML and PDF reports.
//! - [`figure::Figure`] - positioned markers, flows and labels.
//!
//! [`DiagramGraph`]: procview_core::graph::DiagramGraph
//! [`LabelIndex`]: crate::labels::LabelIndex

pub mod context;
pub mod figure;
pub mod text;
