//! Plain-text summary of a diagram.

use log::debug;

use procview_core::graph::DiagramGraph;

use crate::{
    classify::ClassifiedNodes,
    config::TextConfig,
    details::{self, NodeDetails},
    edges,
    labels::LabelIndex,
};

const HEADER: &str = "Components of the BPMN diagram:";

/// Renders the text view of a graph.
///
/// The output is a newline-joined string without a trailing newline:
///
/// ```text
/// Components of the BPMN diagram:
/// startEvent:
///    0. Start
/// endEvent:
///    0. Unnamed
///
/// Edges:
///  0. Flow 1:         Unnamed -> Start
/// ```
///
/// Categories without nodes get no block. When node details are enabled a
/// `Nodes:` section follows the flows.
#[derive(Debug)]
pub struct TextProjector<'a> {
    graph: &'a DiagramGraph,
    config: &'a TextConfig,
    labels: LabelIndex,
}

impl<'a> TextProjector<'a> {
    pub fn new(graph: &'a DiagramGraph, config: &'a TextConfig) -> Self {
        Self {
            graph,
            config,
            labels: LabelIndex::build(graph),
        }
    }

    pub fn project(&self) -> String {
        let mut sections = vec![
            HEADER.to_string(),
            self.nodes_section(),
            self.edges_section(),
        ];
        if self.config.include_node_details() {
            sections.push(details_section(&details::extract_all(self.graph)));
        }

        let text = sections.join("\n");
        debug!(bytes = text.len(); "Text view rendered");
        text
    }

    /// Category blocks, joined. Empty when no listed category has nodes.
    fn nodes_section(&self) -> String {
        let classified = ClassifiedNodes::new(self.graph, &self.labels, self.config.categories());
        classified
            .non_empty()
            .map(|(category, labels)| {
                let mut lines = vec![format!("{category}:")];
                lines.extend(
                    labels
                        .iter()
                        .enumerate()
                        .map(|(idx, label)| format!("  {idx:>2}. {label}")),
                );
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn edges_section(&self) -> String {
        let mut lines = vec![String::from("\nEdges:")];
        lines.extend(
            edges::enumerate(self.graph, &self.labels)
                .iter()
                .map(edges::EdgeRecord::text_line),
        );
        lines.join("\n")
    }
}

fn details_section(nodes: &[NodeDetails]) -> String {
    let mut lines = vec![String::from("\nNodes:")];
    for node in nodes {
        lines.push(format!("\nNode name: {}", node.name));
        lines.extend(
            node.record
                .iter()
                .map(|(key, value)| format!("\t{key:>20}: {value:>60}")),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use procview_core::{
        graph::{Category, Edge, Node, NodeKind},
        identifier::Id,
    };

    use super::*;

    fn round_trip_graph() -> DiagramGraph {
        let mut graph = DiagramGraph::new();
        graph.add_node(
            Node::new(Id::new("S"), NodeKind::empty(Category::StartEvent)).with_name("Start"),
        );
        graph.add_node(Node::new(Id::new("E"), NodeKind::empty(Category::EndEvent)).with_name(""));
        graph.add_edge(Edge::new(Id::new("F"), Id::new("S"), Id::new("E")).with_name("Flow 1"));
        graph
    }

    #[test]
    fn test_round_trip_text() {
        let graph = round_trip_graph();
        let config = TextConfig::default();

        let text = TextProjector::new(&graph, &config).project();

        let expected = "Components of the BPMN diagram:\n\
                        startEvent:\n   0. Start\n\
                        endEvent:\n   0. Unnamed\n\
                        \n\
                        Edges:\n 0. Flow 1:         Unnamed -> Start";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_absent_categories_have_no_header() {
        let graph = round_trip_graph();
        let config = TextConfig::default();

        let text = TextProjector::new(&graph, &config).project();

        assert!(!text.contains("task:"));
        assert!(!text.contains("exclusiveGateway:"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = DiagramGraph::new();
        let config = TextConfig::default();

        let text = TextProjector::new(&graph, &config).project();
        assert_eq!(text, "Components of the BPMN diagram:\n\n\nEdges:");
    }

    #[test]
    fn test_category_order_follows_config() {
        let graph = round_trip_graph();
        let config = TextConfig::new(vec![Category::EndEvent, Category::StartEvent], false);

        let text = TextProjector::new(&graph, &config).project();
        let end = text.find("endEvent:").unwrap();
        let start = text.find("startEvent:").unwrap();
        assert!(end < start);
    }

    #[test]
    fn test_node_details_section() {
        let mut graph = DiagramGraph::new();
        graph.add_node(
            Node::new(Id::new("T"), NodeKind::empty(Category::Task))
                .with_name("Check")
                .with_attribute("approved", ""),
        );
        let config = TextConfig::new(vec![Category::Task], true);

        let text = TextProjector::new(&graph, &config).project();

        let tail = format!(
            "\n\nNodes:\n\nNode name: Check\n\t{:>20}: {:>60}",
            "approved", "No data provided."
        );
        assert!(text.ends_with(&tail), "unexpected text: {text}");
    }
}
