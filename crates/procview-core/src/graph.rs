//! Attributed directed graph of a process diagram.
//!
//! [`DiagramGraph`] is the hand-off point between the diagram parser and the
//! view projections. It stores:
//!
//! - nodes keyed by [`Id`], iterated in insertion order;
//! - directed edges, iterated in insertion order;
//! - the declared process elements, in declaration order.
//!
//! Edges are expected to reference existing nodes. The graph does not reject
//! dangling endpoints; it logs them and leaves consumers to degrade gracefully.

mod attribute;
mod kind;

pub use attribute::{AttributeMap, AttributeValue};
pub use kind::{
    ActivityAttributes, AttributeRecord, BoundaryEventAttributes, Category, EventAttributes,
    EventBasedGatewayAttributes, FieldList, GatewayAttributes, NodeKind, ProcessAttributes,
    SubProcessAttributes, UnknownCategory,
};

use indexmap::IndexMap;
use log::warn;

use crate::{
    geometry::{Bounds, Point},
    identifier::Id,
};

/// Incoming/outgoing flow references and owning process of a flow node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLinks {
    pub incoming: Vec<Id>,
    pub outgoing: Vec<Id>,
    pub process: Option<Id>,
}

impl NodeLinks {
    fn fields(&self) -> Vec<(&'static str, AttributeValue)> {
        let ids = |ids: &[Id]| AttributeValue::List(ids.iter().map(|id| id.to_text()).collect());

        let mut fields = vec![
            ("incoming", ids(&self.incoming)),
            ("outgoing", ids(&self.outgoing)),
        ];
        if let Some(process) = self.process {
            fields.push(("process", AttributeValue::Text(process.to_text())));
        }
        fields
    }
}

/// A process node: event, activity or gateway.
///
/// # Examples
///
/// ```
/// # use procview_core::graph::{Category, Node, NodeKind};
/// # use procview_core::identifier::Id;
/// let node = Node::new(Id::new("Task_1"), NodeKind::empty(Category::Task))
///     .with_name("Check order")
///     .with_attribute("approved", "yes");
///
/// assert_eq!(node.name(), "Check order");
/// assert_eq!(node.category(), Category::Task);
/// assert_eq!(node.attributes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    name: Option<String>,
    kind: NodeKind,
    bounds: Option<Bounds>,
    links: Option<NodeLinks>,
    extra: AttributeMap,
}

impl Node {
    /// Creates an unnamed node without position or attributes.
    pub fn new(id: Id, kind: NodeKind) -> Self {
        Self {
            id,
            name: None,
            kind,
            bounds: None,
            links: None,
            extra: AttributeMap::new(),
        }
    }

    /// Sets the display name of the node.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the shape bounds from the diagram interchange section.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the flow references of the node.
    pub fn with_links(mut self, links: NodeLinks) -> Self {
        self.links = Some(links);
        self
    }

    /// Appends an open-ended attribute. Re-inserting a key keeps its original
    /// position and replaces the value.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the raw display name, or an empty string when none was given.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Returns the stored position: the top-left corner of the shape bounds.
    pub fn position(&self) -> Option<Point> {
        self.bounds.map(Bounds::min_point)
    }

    pub fn links(&self) -> Option<&NodeLinks> {
        self.links.as_ref()
    }

    pub fn extra(&self) -> &AttributeMap {
        &self.extra
    }

    /// Returns every non-geometric attribute in listing order: flow links,
    /// then typed kind fields, then open-ended attributes in insertion order.
    pub fn attributes(&self) -> Vec<(&str, AttributeValue)> {
        let mut attributes: Vec<(&str, AttributeValue)> = Vec::new();
        if let Some(links) = &self.links {
            attributes.extend(links.fields());
        }
        attributes.extend(self.kind.fields());
        attributes.extend(
            self.extra
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone())),
        );
        attributes
    }
}

/// A directed flow between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: Id,
    source: Id,
    target: Id,
    name: Option<String>,
    waypoints: Vec<Point>,
    extra: AttributeMap,
}

impl Edge {
    pub fn new(id: Id, source: Id, target: Id) -> Self {
        Self {
            id,
            source,
            target,
            name: None,
            waypoints: Vec::new(),
            extra: AttributeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the routed polyline from the diagram interchange section.
    pub fn with_waypoints(mut self, waypoints: Vec<Point>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns the raw display name, or an empty string when none was given.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn extra(&self) -> &AttributeMap {
        &self.extra
    }
}

/// A process declared in the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessElement {
    id: Id,
    name: Option<String>,
    attributes: ProcessAttributes,
}

impl ProcessElement {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            name: None,
            attributes: ProcessAttributes::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attributes(mut self, attributes: ProcessAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn attributes(&self) -> &ProcessAttributes {
        &self.attributes
    }
}

/// The attributed directed graph consumed by every view.
#[derive(Debug, Clone, Default)]
pub struct DiagramGraph {
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
    processes: Vec<ProcessElement>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. A node with the same id is replaced in place, keeping its
    /// original iteration position.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    /// Adds a directed edge.
    ///
    /// Endpoints missing from the node set are logged but accepted.
    pub fn add_edge(&mut self, edge: Edge) {
        for endpoint in [edge.source(), edge.target()] {
            if !self.nodes.contains_key(&endpoint) {
                warn!(edge_id:% = edge.id(), endpoint:% = endpoint; "Edge references unknown node");
            }
        }
        self.edges.push(edge);
    }

    /// Declares a process element.
    pub fn add_process(&mut self, process: ProcessElement) {
        self.processes.push(process);
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterates nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates nodes of the given category in insertion order.
    pub fn nodes_of_category(&self, category: Category) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(move |node| node.category() == category)
    }

    /// Returns the ids of nodes of the given category in insertion order.
    pub fn node_ids_of_category(&self, category: Category) -> Vec<Id> {
        self.nodes_of_category(category).map(Node::id).collect()
    }

    /// Returns the stored position of a node, if the node exists and has one.
    pub fn position(&self, id: Id) -> Option<Point> {
        self.node(id).and_then(Node::position)
    }

    /// Returns the positions of every positioned node, in node order.
    pub fn positions(&self) -> IndexMap<Id, Point> {
        self.nodes
            .values()
            .filter_map(|node| node.position().map(|position| (node.id(), position)))
            .collect()
    }

    /// Returns the declared process elements in declaration order.
    pub fn process_elements(&self) -> &[ProcessElement] {
        &self.processes
    }
}
