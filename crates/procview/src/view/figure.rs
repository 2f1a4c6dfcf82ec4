//! Graphical projection of a diagram.
//!
//! A [`Figure`] is plain data: which marker to draw where, which flows to
//! draw and where to put labels. It performs no I/O; the SVG export lives in
//! [`crate::export::svg`].

use log::{debug, warn};

use procview_core::{
    draw::MarkerShape,
    geometry::Point,
    graph::{Category, DiagramGraph},
    identifier::Id,
};

use crate::labels::LabelIndex;

/// Marker shape per drawn category, in drawing order.
///
/// Process elements are never drawn.
pub const CATEGORY_SHAPES: [(Category, MarkerShape); 12] = [
    (Category::Task, MarkerShape::Square),
    (Category::SubProcess, MarkerShape::Square),
    (Category::ComplexGateway, MarkerShape::Diamond),
    (Category::EventBasedGateway, MarkerShape::Diamond),
    (Category::InclusiveGateway, MarkerShape::Diamond),
    (Category::ExclusiveGateway, MarkerShape::Diamond),
    (Category::ParallelGateway, MarkerShape::Diamond),
    (Category::StartEvent, MarkerShape::Circle),
    (Category::IntermediateCatchEvent, MarkerShape::Square),
    (Category::EndEvent, MarkerShape::Circle),
    (Category::IntermediateThrowEvent, MarkerShape::Square),
    (Category::BoundaryEvent, MarkerShape::Square),
];

/// Returns the marker shape of a category, or `None` if it is not drawn.
pub fn shape_of(category: Category) -> Option<MarkerShape> {
    CATEGORY_SHAPES
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, shape)| *shape)
}

/// Markers of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    pub category: Category,
    pub shape: MarkerShape,
    /// Positioned nodes of the category, in graph order.
    pub positions: Vec<(Id, Point)>,
}

/// A piece of text anchored at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLabel {
    pub text: String,
    pub position: Point,
}

/// A flow line between two positioned nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureEdge {
    pub source: Point,
    pub target: Point,
}

impl FigureEdge {
    pub fn midpoint(&self) -> Point {
        self.source.midpoint(self.target)
    }
}

/// Everything needed to draw a diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    markers: Vec<DrawInstruction>,
    node_labels: Vec<FigureLabel>,
    edges: Vec<FigureEdge>,
    edge_labels: Vec<FigureLabel>,
}

impl Figure {
    /// Projects a graph into a figure.
    ///
    /// Nodes without a stored position are left out, as are flows touching
    /// them. Empty labels are not drawn.
    pub fn from_graph(graph: &DiagramGraph) -> Self {
        let labels = LabelIndex::build(graph);
        let positions = graph.positions();

        let markers: Vec<DrawInstruction> = CATEGORY_SHAPES
            .iter()
            .filter_map(|(category, shape)| {
                let positions: Vec<(Id, Point)> = graph
                    .node_ids_of_category(*category)
                    .into_iter()
                    .filter_map(|id| positions.get(&id).map(|position| (id, *position)))
                    .collect();
                (!positions.is_empty()).then_some(DrawInstruction {
                    category: *category,
                    shape: *shape,
                    positions,
                })
            })
            .collect();

        let node_labels = graph
            .nodes()
            .filter(|node| shape_of(node.category()).is_some())
            .filter_map(|node| {
                let position = positions.get(&node.id())?;
                let text = labels.node(node.id());
                (!text.trim().is_empty()).then(|| FigureLabel {
                    text: text.to_string(),
                    position: *position,
                })
            })
            .collect();

        let mut edges = Vec::new();
        let mut edge_labels = Vec::new();
        for edge in graph.edges() {
            let (Some(source), Some(target)) = (
                positions.get(&edge.source()),
                positions.get(&edge.target()),
            ) else {
                warn!(edge:% = edge.id(); "Skipping flow with an unpositioned endpoint");
                continue;
            };
            let line = FigureEdge {
                source: *source,
                target: *target,
            };

            let text = labels.edge(edge.source(), edge.target());
            if !text.trim().is_empty() {
                edge_labels.push(FigureLabel {
                    text: text.to_string(),
                    position: line.midpoint(),
                });
            }
            edges.push(line);
        }

        debug!(
            marker_groups = markers.len(),
            edges = edges.len();
            "Figure projected"
        );

        Self {
            markers,
            node_labels,
            edges,
            edge_labels,
        }
    }

    /// Draw instructions, one per non-empty category.
    pub fn markers(&self) -> &[DrawInstruction] {
        &self.markers
    }

    pub fn node_labels(&self) -> &[FigureLabel] {
        &self.node_labels
    }

    pub fn edges(&self) -> &[FigureEdge] {
        &self.edges
    }

    pub fn edge_labels(&self) -> &[FigureLabel] {
        &self.edge_labels
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use procview_core::{
        geometry::{Bounds, Size},
        graph::{Edge, Node, NodeKind},
    };

    use super::*;

    fn placed(id: &str, category: Category, name: &str, x: f32, y: f32) -> Node {
        Node::new(Id::new(id), NodeKind::empty(category))
            .with_name(name)
            .with_bounds(Bounds::new_from_top_left(
                Point::new(x, y),
                Size::new(36.0, 36.0),
            ))
    }

    fn graph() -> DiagramGraph {
        let mut graph = DiagramGraph::new();
        graph.add_node(placed("S", Category::StartEvent, "Start", 0.0, 0.0));
        graph.add_node(placed("T", Category::Task, "Check", 100.0, 0.0));
        graph.add_node(placed("G", Category::ExclusiveGateway, "", 200.0, 50.0));
        graph.add_node(Node::new(Id::new("Loose"), NodeKind::empty(Category::Task)));
        graph.add_edge(Edge::new(Id::new("F1"), Id::new("S"), Id::new("T")).with_name("go"));
        graph.add_edge(Edge::new(Id::new("F2"), Id::new("T"), Id::new("G")));
        graph.add_edge(Edge::new(Id::new("F3"), Id::new("G"), Id::new("Loose")));
        graph
    }

    #[test]
    fn test_shapes() {
        assert_eq!(shape_of(Category::Task), Some(MarkerShape::Square));
        assert_eq!(shape_of(Category::BoundaryEvent), Some(MarkerShape::Square));
        assert_eq!(shape_of(Category::ParallelGateway), Some(MarkerShape::Diamond));
        assert_eq!(shape_of(Category::EndEvent), Some(MarkerShape::Circle));
        assert_eq!(shape_of(Category::Process), None);
    }

    #[test]
    fn test_one_instruction_per_non_empty_category() {
        let figure = Figure::from_graph(&graph());

        let categories: Vec<Category> = figure
            .markers()
            .iter()
            .map(|instruction| instruction.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                Category::Task,
                Category::ExclusiveGateway,
                Category::StartEvent
            ]
        );
        // The unpositioned task is not drawn.
        assert_eq!(figure.markers()[0].positions.len(), 1);
    }

    #[test]
    fn test_edges_skip_unpositioned_endpoints() {
        let figure = Figure::from_graph(&graph());
        assert_eq!(figure.edges().len(), 2);
    }

    #[test]
    fn test_edge_label_at_midpoint() {
        let figure = Figure::from_graph(&graph());

        assert_eq!(figure.edge_labels().len(), 1);
        let label = &figure.edge_labels()[0];
        assert_eq!(label.text, "go");
        assert_approx_eq!(f32, label.position.x(), 50.0);
        assert_approx_eq!(f32, label.position.y(), 0.0);
    }

    #[test]
    fn test_empty_node_labels_are_not_drawn() {
        let figure = Figure::from_graph(&graph());

        let texts: Vec<&str> = figure
            .node_labels()
            .iter()
            .map(|label| label.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Start", "Check"]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(Figure::from_graph(&DiagramGraph::new()).is_empty());
    }
}
