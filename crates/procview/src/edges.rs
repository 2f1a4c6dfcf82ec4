//! Flow enumeration shared by the text and report views.

use serde::Serialize;

use procview_core::graph::DiagramGraph;

use crate::labels::{self, LabelIndex};

/// One flow with its running index and display labels.
///
/// Every label is already placeholder-substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub index: usize,
    pub edge: String,
    pub source: String,
    pub target: String,
}

impl EdgeRecord {
    /// Formats the flow as a text view line.
    ///
    /// NOTE: the target is printed before the source, the reverse of
    /// [`EdgeRecord::context_entry`]. Existing text outputs depend on this
    /// order, so both conventions are kept.
    pub fn text_line(&self) -> String {
        let index = format!("{:>2}. {}: ", self.index, self.edge);
        format!("{index:<20}{} -> {}", self.target, self.source)
    }

    /// Returns the report context entry, source first.
    pub fn context_entry(&self) -> ContextEdge<'_> {
        ContextEdge {
            start: &self.source,
            end: &self.target,
            edge: &self.edge,
        }
    }
}

/// Serialized form of a flow in the report context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEdge<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub edge: &'a str,
}

/// Enumerates flows in graph order, indexed from 0.
///
/// The flow label comes from the flow's own name, so parallel flows between
/// the same two nodes keep their distinct labels. Unknown endpoints resolve
/// to [`labels::UNNAMED`].
pub fn enumerate(graph: &DiagramGraph, labels: &LabelIndex) -> Vec<EdgeRecord> {
    graph
        .edges()
        .enumerate()
        .map(|(index, edge)| EdgeRecord {
            index,
            edge: labels::display(&labels::resolve(edge.name())).to_string(),
            source: labels::display(labels.node(edge.source())).to_string(),
            target: labels::display(labels.node(edge.target())).to_string(),
        })
        .collect()
}
