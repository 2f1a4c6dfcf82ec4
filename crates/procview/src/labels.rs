//! Label resolution for nodes and flows.
//!
//! [`LabelIndex`] maps every node id, and every `(source, target)` pair of a
//! flow, to a single-line label. Empty labels are kept as empty strings; the
//! views decide how to show them, usually through [`display`].

use std::collections::HashMap;

use log::debug;

use procview_core::{graph::DiagramGraph, identifier::Id};

/// Placeholder shown for nodes and flows without a usable name.
pub const UNNAMED: &str = "Unnamed";

/// Placeholder shown for attributes without a value.
pub const NO_DATA: &str = "No data provided.";

/// Resolved labels of one graph.
///
/// Built once per rendering pass and read-only afterwards. Lookups of ids the
/// graph does not contain return an empty label.
///
/// # Examples
///
/// ```
/// # use procview::labels::LabelIndex;
/// # use procview_core::graph::{Category, DiagramGraph, Node, NodeKind};
/// # use procview_core::identifier::Id;
/// let mut graph = DiagramGraph::new();
/// graph.add_node(
///     Node::new(Id::new("Task_1"), NodeKind::empty(Category::Task)).with_name("Check\norder"),
/// );
///
/// let labels = LabelIndex::build(&graph);
/// assert_eq!(labels.node(Id::new("Task_1")), "Check order");
/// assert_eq!(labels.node(Id::new("Missing")), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    nodes: HashMap<Id, String>,
    edges: HashMap<(Id, Id), String>,
}

impl LabelIndex {
    pub fn build(graph: &DiagramGraph) -> Self {
        let mut edges = HashMap::new();
        for edge in graph.edges() {
            // Parallel flows share a key; the last one wins.
            edges.insert((edge.source(), edge.target()), resolve(edge.name()));
        }

        let nodes: HashMap<Id, String> = graph
            .nodes()
            .map(|node| (node.id(), resolve(node.name())))
            .collect();

        debug!(nodes = nodes.len(), edges = edges.len(); "Label index built");
        Self { nodes, edges }
    }

    /// Returns the resolved label of a node, or `""` for unknown ids.
    pub fn node(&self, id: Id) -> &str {
        self.nodes.get(&id).map(String::as_str).unwrap_or_default()
    }

    /// Returns the resolved label of the flow between two nodes, or `""`.
    pub fn edge(&self, source: Id, target: Id) -> &str {
        self.edges
            .get(&(source, target))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Collapses line breaks in a raw name so the label renders on one line.
///
/// `\r\n`, `\n` and `\r` each become a single space. Nothing is trimmed.
pub fn resolve(raw: &str) -> String {
    raw.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Returns the label to show: [`UNNAMED`] for empty or whitespace-only
/// labels, the label itself otherwise.
pub fn display(label: &str) -> &str {
    if label.trim().is_empty() { UNNAMED } else { label }
}
