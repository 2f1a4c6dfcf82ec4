//! Template context for HTML and PDF reports.
//!
//! The context is a JSON object with a fixed set of keys, each produced by
//! one accessor in [`CONTEXT_FIELDS`]. Values are display-ready: unnamed
//! nodes and flows already read [`UNNAMED`](crate::labels::UNNAMED).

use log::{debug, trace};
use serde_json::{Map, Value, json};

use procview_core::graph::{Category, DiagramGraph};

use crate::{
    classify::ClassifiedNodes,
    details,
    edges::{self, EdgeRecord},
    error::ReportError,
    labels::LabelIndex,
};

/// Categories listed under `processes`, in order.
pub const PROCESS_CATEGORIES: [Category; 6] = [
    Category::Task,
    Category::Process,
    Category::SubProcess,
    Category::IntermediateCatchEvent,
    Category::IntermediateThrowEvent,
    Category::BoundaryEvent,
];

/// Categories listed under `gates`, in order.
pub const GATE_CATEGORIES: [Category; 5] = [
    Category::ComplexGateway,
    Category::EventBasedGateway,
    Category::InclusiveGateway,
    Category::ExclusiveGateway,
    Category::ParallelGateway,
];

type FieldAccessor = fn(&ContextGenerator<'_>) -> Result<Value, ReportError>;

/// Context keys with their accessors, in output order.
///
/// `nodes` is only emitted when node details are requested.
const CONTEXT_FIELDS: &[(&str, FieldAccessor)] = &[
    ("start_events", |generator| Ok(generator.start_events())),
    ("end_events", |generator| Ok(generator.end_events())),
    ("processes", |generator| Ok(generator.processes())),
    ("gates", |generator| Ok(generator.gates())),
    ("edges", |generator| generator.edges()),
    ("model_title", |generator| {
        generator.model_title().map(Value::String)
    }),
];

const NODES_KEY: &str = "nodes";

/// Builds the report context of a graph.
///
/// # Examples
///
/// ```
/// # use procview::view::context::ContextGenerator;
/// # use procview_core::graph::{DiagramGraph, ProcessElement};
/// # use procview_core::identifier::Id;
/// let mut graph = DiagramGraph::new();
/// graph.add_process(ProcessElement::new(Id::new("Process_1")));
///
/// let context = ContextGenerator::new(&graph, false).generate().unwrap();
/// assert_eq!(context["model_title"], "Process_1");
/// assert!(!context.contains_key("nodes"));
/// ```
#[derive(Debug)]
pub struct ContextGenerator<'a> {
    graph: &'a DiagramGraph,
    labels: LabelIndex,
    include_nodes: bool,
}

impl<'a> ContextGenerator<'a> {
    pub fn new(graph: &'a DiagramGraph, include_nodes: bool) -> Self {
        Self {
            graph,
            labels: LabelIndex::build(graph),
            include_nodes,
        }
    }

    /// Builds the full context.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoProcessTitle`] if the graph declares no
    /// process element.
    pub fn generate(&self) -> Result<Map<String, Value>, ReportError> {
        let mut context = Map::new();
        for (key, accessor) in CONTEXT_FIELDS {
            context.insert((*key).to_string(), accessor(self)?);
        }
        if self.include_nodes {
            context.insert(NODES_KEY.to_string(), self.nodes());
        }

        debug!(keys = context.len(); "Report context generated");
        trace!(context:? = context; "Report context");
        Ok(context)
    }

    /// Returns the identifier of the first declared process.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoProcessTitle`] if there is none.
    pub fn model_title(&self) -> Result<String, ReportError> {
        self.graph
            .process_elements()
            .first()
            .map(|process| process.id().to_text())
            .ok_or(ReportError::NoProcessTitle)
    }

    fn start_events(&self) -> Value {
        self.labels_value(&[Category::StartEvent])
    }

    fn end_events(&self) -> Value {
        self.labels_value(&[Category::EndEvent])
    }

    fn processes(&self) -> Value {
        self.labels_value(&PROCESS_CATEGORIES)
    }

    fn gates(&self) -> Value {
        self.labels_value(&GATE_CATEGORIES)
    }

    /// Flows as `{start, end, edge}` objects, source first.
    fn edges(&self) -> Result<Value, ReportError> {
        let records = edges::enumerate(self.graph, &self.labels);
        let entries: Vec<_> = records.iter().map(EdgeRecord::context_entry).collect();
        Ok(serde_json::to_value(entries)?)
    }

    /// Nodes as `[name, record]` pairs in graph order.
    fn nodes(&self) -> Value {
        details::extract_all(self.graph)
            .into_iter()
            .map(|node| json!([node.name, node.record]))
            .collect()
    }

    fn labels_value(&self, categories: &[Category]) -> Value {
        ClassifiedNodes::new(self.graph, &self.labels, categories)
            .flatten()
            .into_iter()
            .map(Value::String)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use procview_core::{
        graph::{Edge, Node, NodeKind, ProcessElement},
        identifier::Id,
    };

    use super::*;

    fn node(id: &str, category: Category, name: &str) -> Node {
        Node::new(Id::new(id), NodeKind::empty(category)).with_name(name)
    }

    fn graph() -> DiagramGraph {
        let mut graph = DiagramGraph::new();
        graph.add_process(ProcessElement::new(Id::new("Process_A")).with_name("First"));
        graph.add_process(ProcessElement::new(Id::new("Process_B")));
        graph.add_node(node("S", Category::StartEvent, "Start"));
        graph.add_node(node("E", Category::EndEvent, ""));
        graph.add_node(node("B", Category::BoundaryEvent, "Timeout"));
        graph.add_node(node("T", Category::Task, "Check"));
        graph.add_node(node("G2", Category::ParallelGateway, "Join"));
        graph.add_node(node("G1", Category::ExclusiveGateway, "Approved?"));
        graph.add_edge(Edge::new(Id::new("F"), Id::new("S"), Id::new("E")).with_name("Flow 1"));
        graph
    }

    #[test]
    fn test_key_order() {
        let graph = graph();
        let context = ContextGenerator::new(&graph, true).generate().unwrap();

        let keys: Vec<&str> = context.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "start_events",
                "end_events",
                "processes",
                "gates",
                "edges",
                "model_title",
                "nodes"
            ]
        );
    }

    #[test]
    fn test_grouped_labels() {
        let graph = graph();
        let context = ContextGenerator::new(&graph, false).generate().unwrap();

        assert_eq!(context["start_events"], json!(["Start"]));
        assert_eq!(context["end_events"], json!(["Unnamed"]));
        assert_eq!(context["processes"], json!(["Check", "Timeout"]));
        assert_eq!(context["gates"], json!(["Approved?", "Join"]));
    }

    // Source first here; the text view prints the target first.
    #[test]
    fn test_edges_are_source_first() {
        let graph = graph();
        let context = ContextGenerator::new(&graph, false).generate().unwrap();

        assert_eq!(
            context["edges"],
            json!([{"start": "Start", "end": "Unnamed", "edge": "Flow 1"}])
        );
    }

    #[test]
    fn test_model_title_is_first_process_id() {
        let graph = graph();
        let generator = ContextGenerator::new(&graph, false);
        assert_eq!(generator.model_title().unwrap(), "Process_A");
    }

    #[test]
    fn test_missing_process_is_fatal() {
        let mut graph = DiagramGraph::new();
        graph.add_node(node("S", Category::StartEvent, "Start"));

        let result = ContextGenerator::new(&graph, false).generate();
        assert!(matches!(result, Err(ReportError::NoProcessTitle)));
    }

    #[test]
    fn test_nodes_pairs() {
        let mut graph = DiagramGraph::new();
        graph.add_process(ProcessElement::new(Id::new("P")));
        graph.add_node(
            node("T", Category::Task, "")
                .with_attribute("approved", "")
                .with_attribute("owners", vec!["a", "b"]),
        );

        let context = ContextGenerator::new(&graph, true).generate().unwrap();
        assert_eq!(
            context["nodes"],
            json!([["Unnamed", {"approved": "No data provided.", "owners": "a, b"}]])
        );
    }
}
