//! Grouping of node labels by category.

use indexmap::IndexMap;

use procview_core::graph::{Category, DiagramGraph};

use crate::labels::{self, LabelIndex};

/// Returns the display labels of every node of `category`, in graph order.
///
/// Empty or whitespace-only labels are shown as [`labels::UNNAMED`].
pub fn labels_of(graph: &DiagramGraph, labels: &LabelIndex, category: Category) -> Vec<String> {
    graph
        .nodes_of_category(category)
        .map(|node| labels::display(labels.node(node.id())).to_string())
        .collect()
}

/// Node labels grouped by category, in the order the caller listed the
/// categories.
///
/// Every requested category has an entry, possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedNodes {
    groups: IndexMap<Category, Vec<String>>,
}

impl ClassifiedNodes {
    pub fn new(graph: &DiagramGraph, labels: &LabelIndex, categories: &[Category]) -> Self {
        let groups = categories
            .iter()
            .map(|category| (*category, labels_of(graph, labels, *category)))
            .collect();
        Self { groups }
    }

    /// Returns the labels of one category, empty if it was not requested.
    pub fn get(&self, category: Category) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates categories in request order, skipping empty ones.
    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.groups
            .iter()
            .filter(|(_, labels)| !labels.is_empty())
            .map(|(category, labels)| (*category, labels.as_slice()))
    }

    /// Concatenates the labels of every requested category, in order.
    pub fn flatten(&self) -> Vec<String> {
        self.groups.values().flatten().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use procview_core::{
        graph::{Node, NodeKind},
        identifier::Id,
    };

    use super::*;

    fn graph() -> DiagramGraph {
        let mut graph = DiagramGraph::new();
        for (id, category, name) in [
            ("T1", Category::Task, "First"),
            ("S", Category::StartEvent, "Start"),
            ("T2", Category::Task, " "),
            ("T3", Category::Task, "Third"),
        ] {
            graph.add_node(Node::new(Id::new(id), NodeKind::empty(category)).with_name(name));
        }
        graph
    }

    #[test]
    fn test_labels_follow_graph_order() {
        let graph = graph();
        let labels = LabelIndex::build(&graph);

        assert_eq!(
            labels_of(&graph, &labels, Category::Task),
            vec!["First", "Unnamed", "Third"]
        );
    }

    #[test]
    fn test_missing_category_is_empty() {
        let graph = graph();
        let labels = LabelIndex::build(&graph);

        assert!(labels_of(&graph, &labels, Category::ParallelGateway).is_empty());
    }

    #[test]
    fn test_classified_order_follows_request() {
        let graph = graph();
        let labels = LabelIndex::build(&graph);
        let classified = ClassifiedNodes::new(
            &graph,
            &labels,
            &[Category::Task, Category::EndEvent, Category::StartEvent],
        );

        let order: Vec<Category> = classified.non_empty().map(|(category, _)| category).collect();
        assert_eq!(order, vec![Category::Task, Category::StartEvent]);
        assert!(classified.get(Category::EndEvent).is_empty());
        assert!(classified.get(Category::SubProcess).is_empty());
        assert_eq!(
            classified.flatten(),
            vec!["First", "Unnamed", "Third", "Start"]
        );
    }
}
