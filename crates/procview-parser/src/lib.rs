//! # Procview Parser
//!
//! Reads BPMN 2.0 XML documents into a [`DiagramGraph`].
//!
//! Reading happens in two phases:
//!
//! 1. **Read** - parse the XML into an element tree
//! 2. **Elaborate** - turn processes, flow nodes, sequence flows and diagram
//!    interchange geometry into the graph model
//!
//! Every problem found during elaboration is reported, not only the first.
//!
//! ## Usage
//!
//! ```
//! # use procview_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         <bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL">
//!           <bpmn:process id="Order">
//!             <bpmn:startEvent id="Start" name="Order received"/>
//!             <bpmn:endEvent id="End"/>
//!             <bpmn:sequenceFlow id="Flow_1" sourceRef="Start" targetRef="End"/>
//!           </bpmn:process>
//!         </bpmn:definitions>
//!     "#;
//!
//!     let graph = parse(source)?;
//!     assert_eq!(graph.node_count(), 2);
//!     assert_eq!(graph.edge_count(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;

mod document;
mod elaborate;
mod span;

pub use span::Span;

use log::{debug, info};

use procview_core::graph::DiagramGraph;

use error::ParseError;

/// Parses BPMN XML source text into a [`DiagramGraph`].
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic when the document is
/// not well-formed XML, is not a BPMN `definitions` document, or contains
/// elements that cannot be keyed (missing or duplicate ids). Invalid flags
/// and unreadable geometry are only warnings.
pub fn parse(source: &str) -> Result<DiagramGraph, ParseError> {
    info!(bytes = source.len(); "Reading BPMN document");

    let root = document::read(source)?;
    debug!(root = root.name(); "XML read");

    elaborate::Builder::new().build(&root)
}
