//! Per-node attribute tables for detail listings.
//!
//! A [`NodeDetailRecord`] lists a node's attributes as display strings in
//! the node's native attribute order. Layout-only keys and the name key are
//! dropped, list values are joined with `", "`, and empty values are replaced
//! with [`NO_DATA`].

use indexmap::IndexMap;

use procview_core::graph::{AttributeValue, DiagramGraph, Node};

use crate::labels::{self, NO_DATA};

/// Keys never listed in a detail record.
pub const HIDDEN_KEYS: [&str; 5] = ["width", "height", "x", "y", "node_name"];

/// Ordered attribute key to display value.
pub type NodeDetailRecord = IndexMap<String, String>;

/// The detail record of one node, paired with its display name.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDetails {
    pub name: String,
    pub record: NodeDetailRecord,
}

/// Builds the detail record of a node.
///
/// Extraction does not modify the node, so repeated calls return identical
/// records.
pub fn extract(node: &Node) -> NodeDetailRecord {
    node.attributes()
        .into_iter()
        .filter(|(key, _)| !HIDDEN_KEYS.contains(key))
        .map(|(key, value)| (key.to_string(), display_value(&value)))
        .collect()
}

/// Builds the details of every node, in graph order.
pub fn extract_all(graph: &DiagramGraph) -> Vec<NodeDetails> {
    graph
        .nodes()
        .map(|node| NodeDetails {
            name: labels::display(&labels::resolve(node.name())).to_string(),
            record: extract(node),
        })
        .collect()
}

/// Renders an attribute value, substituting [`NO_DATA`] for empty values.
///
/// Lists are joined before the emptiness check, so a list of empty strings
/// also renders as the placeholder.
pub fn display_value(value: &AttributeValue) -> String {
    if value.is_empty() {
        return NO_DATA.to_string();
    }
    let rendered = value.to_string();
    if rendered.is_empty() {
        NO_DATA.to_string()
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use procview_core::{
        geometry::{Bounds, Point, Size},
        graph::{Category, NodeKind, NodeLinks},
        identifier::Id,
    };

    use super::*;

    fn task() -> Node {
        Node::new(Id::new("Check"), NodeKind::empty(Category::Task)).with_name("Check")
    }

    #[test]
    fn test_layout_and_name_keys_are_dropped() {
        let node = task()
            .with_attribute("width", 40_i64)
            .with_attribute("height", 40_i64)
            .with_attribute("x", 1_i64)
            .with_attribute("y", 2_i64)
            .with_attribute("node_name", "Check")
            .with_attribute("approved", "");

        let record = extract(&node);

        let expected: NodeDetailRecord =
            [("approved".to_string(), NO_DATA.to_string())].into_iter().collect();
        assert_eq!(record, expected);
    }

    #[test]
    fn test_list_values_are_joined() {
        let node = task().with_attribute("owners", vec!["a", "b"]);
        assert_eq!(extract(&node)["owners"], "a, b");
    }

    #[test]
    fn test_empty_values_use_placeholder() {
        let node = task()
            .with_attribute("count", 0_i64)
            .with_attribute("ratio", 0.0_f64)
            .with_attribute("flag", false)
            .with_attribute("tags", Vec::<String>::new())
            .with_attribute("blanks", vec![""]);

        let record = extract(&node);
        assert!(record.values().all(|value| value == NO_DATA));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_native_attribute_order() {
        let node = task()
            .with_links(NodeLinks {
                incoming: vec![Id::new("Flow_1")],
                outgoing: Vec::new(),
                process: Some(Id::new("Process_1")),
            })
            .with_attribute("zeta", "z")
            .with_attribute("alpha", "a");

        let record = extract(&node);
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["incoming", "outgoing", "process", "zeta", "alpha"]);
        assert_eq!(record["outgoing"], NO_DATA);
    }

    #[test]
    fn test_bounds_never_listed() {
        let node = task().with_bounds(Bounds::new_from_top_left(
            Point::new(1.0, 2.0),
            Size::new(40.0, 40.0),
        ));
        assert!(extract(&node).is_empty());
    }

    #[test]
    fn test_extract_all_names() {
        let mut graph = DiagramGraph::new();
        graph.add_node(task());
        graph.add_node(Node::new(Id::new("End"), NodeKind::empty(Category::EndEvent)));

        let details = extract_all(&graph);
        assert_eq!(details[0].name, "Check");
        assert_eq!(details[1].name, "Unnamed");
    }

    proptest! {
        #[test]
        fn extraction_is_idempotent_and_hides_layout(
            attributes in proptest::collection::vec(("[a-z]{1,6}", "[a-z]{0,4}"), 0..12)
        ) {
            let mut node = task();
            for (key, value) in &attributes {
                node = node.with_attribute(key.as_str(), value.as_str());
            }

            let first = extract(&node);
            let second = extract(&node);
            prop_assert_eq!(&first, &second);
            for key in HIDDEN_KEYS {
                prop_assert!(!first.contains_key(key));
            }
            prop_assert!(first.values().all(|value| !value.is_empty()));
        }
    }
}
