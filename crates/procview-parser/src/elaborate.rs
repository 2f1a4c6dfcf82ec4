//! Elaboration: turns the XML element tree into a [`DiagramGraph`].
//!
//! Flow nodes and sequence flows are read from every `process` (and from
//! nested sub-processes), geometry is read from the diagram interchange
//! section (`BPMNShape` bounds and `BPMNEdge` waypoints). Attributes the BPMN
//! schema gives a default are filled with that default when absent.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use procview_core::{
    geometry::{Bounds, Point, Size},
    graph::{
        ActivityAttributes, BoundaryEventAttributes, Category, DiagramGraph, Edge,
        EventAttributes, EventBasedGatewayAttributes, GatewayAttributes, Node, NodeKind,
        NodeLinks, ProcessAttributes, ProcessElement, SubProcessAttributes,
    },
    identifier::Id,
};

use crate::{
    document::Element,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Task element names that are all read as [`Category::Task`].
const TASK_ELEMENTS: &[&str] = &[
    "task",
    "userTask",
    "serviceTask",
    "manualTask",
    "scriptTask",
    "sendTask",
    "receiveTask",
    "businessRuleTask",
    "callActivity",
];

/// Sub-process element names that are all read as [`Category::SubProcess`].
const SUB_PROCESS_ELEMENTS: &[&str] = &["subProcess", "transaction", "adHocSubProcess"];

/// Maps a BPMN element name to the category it is read as.
fn category_of(element_name: &str) -> Option<Category> {
    if TASK_ELEMENTS.contains(&element_name) {
        return Some(Category::Task);
    }
    if SUB_PROCESS_ELEMENTS.contains(&element_name) {
        return Some(Category::SubProcess);
    }
    match element_name {
        "startEvent" => Some(Category::StartEvent),
        "endEvent" => Some(Category::EndEvent),
        "intermediateCatchEvent" => Some(Category::IntermediateCatchEvent),
        "intermediateThrowEvent" => Some(Category::IntermediateThrowEvent),
        "boundaryEvent" => Some(Category::BoundaryEvent),
        "complexGateway" => Some(Category::ComplexGateway),
        "eventBasedGateway" => Some(Category::EventBasedGateway),
        "inclusiveGateway" => Some(Category::InclusiveGateway),
        "exclusiveGateway" => Some(Category::ExclusiveGateway),
        "parallelGateway" => Some(Category::ParallelGateway),
        _ => None,
    }
}

#[derive(Debug, Error)]
enum ValueError {
    #[error("expected `true` or `false`, found `{0}`")]
    Boolean(String),

    #[error("expected a number, found `{0}`")]
    Number(String),
}

fn parse_bool(value: &str) -> Result<bool, ValueError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValueError::Boolean(value.to_string())),
    }
}

fn parse_number(value: &str) -> Result<f32, ValueError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValueError::Number(value.to_string()))
}

/// Builds a [`DiagramGraph`] from a `definitions` element.
pub struct Builder {
    collector: DiagnosticCollector,
    nodes: IndexMap<Id, (Node, Span)>,
    flows: Vec<(Edge, Span)>,
    flow_spans: HashMap<Id, Span>,
    processes: Vec<ProcessElement>,
    bounds: HashMap<Id, Bounds>,
    waypoints: HashMap<Id, Vec<Point>>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            collector: DiagnosticCollector::new(),
            nodes: IndexMap::new(),
            flows: Vec::new(),
            flow_spans: HashMap::new(),
            processes: Vec::new(),
            bounds: HashMap::new(),
            waypoints: HashMap::new(),
        }
    }

    /// Reads the whole document.
    ///
    /// All problems are collected before failing, so a single call reports
    /// every missing attribute and duplicate id at once.
    pub fn build(mut self, root: &Element) -> Result<DiagramGraph, ParseError> {
        if root.name() != "definitions" {
            return Err(Diagnostic::error(format!(
                "expected a `definitions` root element, found `{}`",
                root.name()
            ))
            .with_code(ErrorCode::E100)
            .with_label(root.span(), "document root")
            .with_help("the input must be a BPMN 2.0 XML document")
            .into());
        }

        for process in root.children_named("process") {
            self.read_process(process);
        }

        for diagram in root.children_named("BPMNDiagram") {
            for plane in diagram.children_named("BPMNPlane") {
                self.read_plane(plane);
            }
        }

        self.check_flow_endpoints();
        std::mem::take(&mut self.collector).finish()?;

        Ok(self.assemble())
    }

    fn read_process(&mut self, element: &Element) {
        let Some(id) = self.required(element, "id") else {
            return;
        };

        let attributes = ProcessAttributes {
            is_executable: self.flag(element, "isExecutable", Some(false)),
            is_closed: self.flag(element, "isClosed", Some(false)),
            process_type: Some(element.attribute("processType").unwrap_or("None").to_string()),
        };

        let mut process = ProcessElement::new(id).with_attributes(attributes);
        if let Some(name) = element.attribute("name") {
            process = process.with_name(name);
        }
        debug!(process_id:% = id; "Reading process");
        self.processes.push(process);

        self.read_flow_elements(element, id);
    }

    fn read_flow_elements(&mut self, container: &Element, owner: Id) {
        for child in container.children() {
            if child.name() == "sequenceFlow" {
                self.read_flow(child);
                continue;
            }

            let Some(category) = category_of(child.name()) else {
                trace!(element = child.name(); "Skipping element without a graph counterpart");
                continue;
            };

            let Some(id) = self.read_node(child, category, owner) else {
                continue;
            };

            if category == Category::SubProcess {
                self.read_flow_elements(child, id);
            }
        }
    }

    fn read_node(&mut self, element: &Element, category: Category, owner: Id) -> Option<Id> {
        let id = self.required(element, "id")?;

        let links = NodeLinks {
            incoming: child_ids(element, "incoming"),
            outgoing: child_ids(element, "outgoing"),
            process: Some(owner),
        };

        let kind = self.read_kind(element, category);
        let mut node = Node::new(id, kind).with_links(links);

        if let Some(name) = element.attribute("name") {
            node = node.with_name(name);
        }
        if category == Category::Task && element.name() != "task" {
            node = node.with_attribute("taskType", element.name());
        }
        if let Some(documentation) = element.children_named("documentation").next() {
            node = node.with_attribute("documentation", documentation.text());
        }

        if let Some((_, first_span)) = self.nodes.get(&id) {
            let first_span = *first_span;
            self.collector.emit(
                Diagnostic::error(format!("flow node id `{id}` is used more than once"))
                    .with_code(ErrorCode::E200)
                    .with_label(element.span(), "duplicate id")
                    .with_secondary_label(first_span, "first used here"),
            );
            return None;
        }

        trace!(node_id:% = id, category:% = category; "Read flow node");
        self.nodes.insert(id, (node, element.span()));
        Some(id)
    }

    fn read_kind(&mut self, element: &Element, category: Category) -> NodeKind {
        match category {
            Category::StartEvent => NodeKind::StartEvent(EventAttributes {
                parallel_multiple: self.flag(element, "parallelMultiple", Some(false)),
                is_interrupting: self.flag(element, "isInterrupting", Some(true)),
                event_definitions: Some(event_definitions(element)),
            }),
            Category::IntermediateCatchEvent => NodeKind::IntermediateCatchEvent(EventAttributes {
                parallel_multiple: self.flag(element, "parallelMultiple", Some(false)),
                is_interrupting: None,
                event_definitions: Some(event_definitions(element)),
            }),
            Category::EndEvent => NodeKind::EndEvent(EventAttributes {
                event_definitions: Some(event_definitions(element)),
                ..EventAttributes::default()
            }),
            Category::IntermediateThrowEvent => NodeKind::IntermediateThrowEvent(EventAttributes {
                event_definitions: Some(event_definitions(element)),
                ..EventAttributes::default()
            }),
            Category::BoundaryEvent => NodeKind::BoundaryEvent(BoundaryEventAttributes {
                parallel_multiple: self.flag(element, "parallelMultiple", Some(false)),
                attached_to: element.attribute("attachedToRef").map(Id::new),
                cancel_activity: self.flag(element, "cancelActivity", Some(true)),
                event_definitions: Some(event_definitions(element)),
            }),
            Category::Task => NodeKind::Task(ActivityAttributes {
                default: element.attribute("default").map(Id::new),
            }),
            Category::SubProcess => NodeKind::SubProcess(SubProcessAttributes {
                default: element.attribute("default").map(Id::new),
                triggered_by_event: self.flag(element, "triggeredByEvent", Some(false)),
            }),
            Category::ComplexGateway => NodeKind::ComplexGateway(gateway(element, true)),
            Category::InclusiveGateway => NodeKind::InclusiveGateway(gateway(element, true)),
            Category::ExclusiveGateway => NodeKind::ExclusiveGateway(gateway(element, true)),
            Category::ParallelGateway => NodeKind::ParallelGateway(gateway(element, false)),
            Category::EventBasedGateway => {
                NodeKind::EventBasedGateway(EventBasedGatewayAttributes {
                    direction: Some(gateway_direction(element)),
                    instantiate: self.flag(element, "instantiate", Some(false)),
                    event_gateway_type: Some(
                        element
                            .attribute("eventGatewayType")
                            .unwrap_or("Exclusive")
                            .to_string(),
                    ),
                })
            }
            // Processes are declared at the top level, never as flow elements.
            Category::Process => NodeKind::empty(Category::Process),
        }
    }

    fn read_flow(&mut self, element: &Element) {
        let id = self.required(element, "id");
        let source = self.required(element, "sourceRef");
        let target = self.required(element, "targetRef");
        let (Some(id), Some(source), Some(target)) = (id, source, target) else {
            return;
        };

        if let Some(first_span) = self.flow_spans.get(&id) {
            let first_span = *first_span;
            self.collector.emit(
                Diagnostic::error(format!("sequence flow id `{id}` is used more than once"))
                    .with_code(ErrorCode::E200)
                    .with_label(element.span(), "duplicate id")
                    .with_secondary_label(first_span, "first used here"),
            );
            return;
        }

        let mut edge = Edge::new(id, source, target);
        if let Some(name) = element.attribute("name") {
            edge = edge.with_name(name);
        }
        if let Some(condition) = element.children_named("conditionExpression").next() {
            edge = edge.with_attribute("condition", condition.text());
        }

        self.flow_spans.insert(id, element.span());
        self.flows.push((edge, element.span()));
    }

    fn read_plane(&mut self, plane: &Element) {
        for child in plane.children() {
            let Some(element_id) = child.attribute("bpmnElement").map(Id::new) else {
                continue;
            };

            match child.name() {
                "BPMNShape" => {
                    let Some(bounds) = child.children_named("Bounds").next() else {
                        continue;
                    };
                    if let Some(bounds) = self.read_bounds(bounds) {
                        self.bounds.insert(element_id, bounds);
                    }
                }
                "BPMNEdge" => {
                    let points: Vec<Point> = child
                        .children_named("waypoint")
                        .filter_map(|waypoint| self.read_point(waypoint))
                        .collect();
                    self.waypoints.insert(element_id, points);
                }
                _ => {}
            }
        }
    }

    fn read_bounds(&mut self, element: &Element) -> Option<Bounds> {
        let x = self.number(element, "x");
        let y = self.number(element, "y");
        let width = self.number(element, "width");
        let height = self.number(element, "height");
        Some(Bounds::new_from_top_left(
            Point::new(x?, y?),
            Size::new(width?, height?),
        ))
    }

    fn read_point(&mut self, element: &Element) -> Option<Point> {
        let x = self.number(element, "x");
        let y = self.number(element, "y");
        Some(Point::new(x?, y?))
    }

    fn check_flow_endpoints(&mut self) {
        let mut dangling = Vec::new();
        for (edge, span) in &self.flows {
            for (role, endpoint) in [("source", edge.source()), ("target", edge.target())] {
                if !self.nodes.contains_key(&endpoint) {
                    dangling.push(
                        Diagnostic::warning(format!(
                            "sequence flow `{}` has unknown {role} `{endpoint}`",
                            edge.id()
                        ))
                        .with_code(ErrorCode::E201)
                        .with_label(*span, "declared here"),
                    );
                }
            }
        }
        for diagnostic in dangling {
            self.collector.emit(diagnostic);
        }
    }

    fn assemble(self) -> DiagramGraph {
        let mut graph = DiagramGraph::new();

        for process in self.processes {
            graph.add_process(process);
        }

        for (id, (node, _)) in self.nodes {
            let node = match self.bounds.get(&id) {
                Some(bounds) => node.with_bounds(*bounds),
                None => node,
            };
            graph.add_node(node);
        }

        let mut waypoints = self.waypoints;
        for (edge, _) in self.flows {
            let edge = match waypoints.remove(&edge.id()) {
                Some(points) if points.len() >= 2 => edge.with_waypoints(points),
                _ => edge,
            };
            graph.add_edge(edge);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            processes = graph.process_elements().len();
            "BPMN document elaborated"
        );
        graph
    }

    /// Returns a required attribute as an id, reporting it when missing.
    fn required(&mut self, element: &Element, key: &str) -> Option<Id> {
        match element.attribute(key) {
            Some(value) if !value.trim().is_empty() => Some(Id::new(value)),
            _ => {
                self.collector.emit(
                    Diagnostic::error(format!(
                        "`{}` element is missing the `{key}` attribute",
                        element.name()
                    ))
                    .with_code(ErrorCode::E101)
                    .with_label(element.span(), "declared here"),
                );
                None
            }
        }
    }

    /// Reads a boolean attribute, falling back to `default` when absent or
    /// unreadable.
    fn flag(&mut self, element: &Element, key: &str, default: Option<bool>) -> Option<bool> {
        let Some(value) = element.attribute(key) else {
            return default;
        };
        match parse_bool(value) {
            Ok(flag) => Some(flag),
            Err(err) => {
                self.invalid_value(element, key, err);
                default
            }
        }
    }

    /// Reads a coordinate. Unreadable geometry leaves the element
    /// unpositioned.
    fn number(&mut self, element: &Element, key: &str) -> Option<f32> {
        let Some(value) = element.attribute(key) else {
            self.collector.emit(
                Diagnostic::warning(format!(
                    "`{}` element is missing the `{key}` coordinate",
                    element.name()
                ))
                .with_code(ErrorCode::E101)
                .with_label(element.span(), "declared here"),
            );
            return None;
        };
        match parse_number(value) {
            Ok(number) => Some(number),
            Err(err) => {
                self.invalid_value(element, key, err);
                None
            }
        }
    }

    fn invalid_value(&mut self, element: &Element, key: &str, err: ValueError) {
        self.collector.emit(
            Diagnostic::warning(format!("invalid `{key}` attribute: {err}"))
                .with_code(ErrorCode::E102)
                .with_label(element.span(), "in this element"),
        );
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn child_ids(element: &Element, name: &str) -> Vec<Id> {
    element
        .children_named(name)
        .map(|child| child.text().trim())
        .filter(|text| !text.is_empty())
        .map(Id::new)
        .collect()
}

/// Names of the event definitions nested in an event element.
fn event_definitions(element: &Element) -> Vec<String> {
    element
        .children()
        .iter()
        .filter(|child| child.name().ends_with("EventDefinition"))
        .map(|child| child.name().to_string())
        .collect()
}

fn gateway_direction(element: &Element) -> String {
    element
        .attribute("gatewayDirection")
        .unwrap_or("Unspecified")
        .to_string()
}

fn gateway(element: &Element, has_default: bool) -> GatewayAttributes {
    GatewayAttributes {
        direction: Some(gateway_direction(element)),
        default: if has_default {
            element.attribute("default").map(Id::new)
        } else {
            None
        },
    }
}
