//! Node categories and their typed attribute records.
//!
//! Every node carries a [`NodeKind`]: a tagged variant whose payload holds the
//! attributes that the BPMN model defines for that element type. The
//! field-less [`Category`] is the tag used for grouping and lookups.
//!
//! Typed records expose their populated fields through a fixed, ordered list
//! of `(field name, accessor)` pairs, so detail views list them in a stable
//! order without any string-keyed lookups.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{graph::AttributeValue, identifier::Id};

/// Category tag of a process node.
///
/// The string form matches the BPMN element name (`startEvent`,
/// `exclusiveGateway`, ...), which is also how categories are written in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    StartEvent,
    EndEvent,
    IntermediateCatchEvent,
    IntermediateThrowEvent,
    BoundaryEvent,
    Task,
    Process,
    SubProcess,
    ComplexGateway,
    EventBasedGateway,
    InclusiveGateway,
    ExclusiveGateway,
    ParallelGateway,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 13] = [
        Self::StartEvent,
        Self::EndEvent,
        Self::IntermediateCatchEvent,
        Self::IntermediateThrowEvent,
        Self::BoundaryEvent,
        Self::Task,
        Self::Process,
        Self::SubProcess,
        Self::ComplexGateway,
        Self::EventBasedGateway,
        Self::InclusiveGateway,
        Self::ExclusiveGateway,
        Self::ParallelGateway,
    ];

    /// Returns the BPMN element name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartEvent => "startEvent",
            Self::EndEvent => "endEvent",
            Self::IntermediateCatchEvent => "intermediateCatchEvent",
            Self::IntermediateThrowEvent => "intermediateThrowEvent",
            Self::BoundaryEvent => "boundaryEvent",
            Self::Task => "task",
            Self::Process => "process",
            Self::SubProcess => "subProcess",
            Self::ComplexGateway => "complexGateway",
            Self::EventBasedGateway => "eventBasedGateway",
            Self::InclusiveGateway => "inclusiveGateway",
            Self::ExclusiveGateway => "exclusiveGateway",
            Self::ParallelGateway => "parallelGateway",
        }
    }

    /// Returns true for the five gateway categories.
    pub fn is_gateway(self) -> bool {
        matches!(
            self,
            Self::ComplexGateway
                | Self::EventBasedGateway
                | Self::InclusiveGateway
                | Self::ExclusiveGateway
                | Self::ParallelGateway
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// An ordered list of `(field name, accessor)` pairs describing a record.
///
/// Accessors return `None` for fields the parser did not populate; those
/// fields are left out of listings entirely.
pub type FieldList<T> = &'static [(&'static str, fn(&T) -> Option<AttributeValue>)];

/// Typed attribute record of a node kind.
pub trait AttributeRecord: Sized + 'static {
    /// Field accessors in listing order.
    const FIELDS: FieldList<Self>;

    /// Returns the populated fields of this record in listing order.
    fn fields(&self) -> Vec<(&'static str, AttributeValue)> {
        Self::FIELDS
            .iter()
            .filter_map(|(name, accessor)| accessor(self).map(|value| (*name, value)))
            .collect()
    }
}

// Boolean model attributes are listed the way they appear in the source
// document, as `true`/`false` text.
fn flag(value: Option<bool>) -> Option<AttributeValue> {
    value.map(|value| AttributeValue::Text(value.to_string()))
}

fn id_text(value: Option<Id>) -> Option<AttributeValue> {
    value.map(|id| AttributeValue::Text(id.to_text()))
}

fn text(value: &Option<String>) -> Option<AttributeValue> {
    value.clone().map(AttributeValue::Text)
}

fn list(value: &Option<Vec<String>>) -> Option<AttributeValue> {
    value.clone().map(AttributeValue::List)
}

/// Attributes of start, end and intermediate events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventAttributes {
    pub parallel_multiple: Option<bool>,
    pub is_interrupting: Option<bool>,
    /// Names of the event definitions (`messageEventDefinition`, ...).
    pub event_definitions: Option<Vec<String>>,
}

impl AttributeRecord for EventAttributes {
    const FIELDS: FieldList<Self> = &[
        ("parallelMultiple", |a| flag(a.parallel_multiple)),
        ("isInterrupting", |a| flag(a.is_interrupting)),
        ("event_definitions", |a| list(&a.event_definitions)),
    ];
}

/// Attributes of boundary events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryEventAttributes {
    pub parallel_multiple: Option<bool>,
    pub attached_to: Option<Id>,
    pub cancel_activity: Option<bool>,
    pub event_definitions: Option<Vec<String>>,
}

impl AttributeRecord for BoundaryEventAttributes {
    const FIELDS: FieldList<Self> = &[
        ("parallelMultiple", |a| flag(a.parallel_multiple)),
        ("attachedToRef", |a| id_text(a.attached_to)),
        ("cancelActivity", |a| flag(a.cancel_activity)),
        ("event_definitions", |a| list(&a.event_definitions)),
    ];
}

/// Attributes of tasks of any flavour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityAttributes {
    /// Default outgoing flow.
    pub default: Option<Id>,
}

impl AttributeRecord for ActivityAttributes {
    const FIELDS: FieldList<Self> = &[("default", |a| id_text(a.default))];
}

/// Attributes of embedded sub-processes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubProcessAttributes {
    pub default: Option<Id>,
    pub triggered_by_event: Option<bool>,
}

impl AttributeRecord for SubProcessAttributes {
    const FIELDS: FieldList<Self> = &[
        ("default", |a| id_text(a.default)),
        ("triggeredByEvent", |a| flag(a.triggered_by_event)),
    ];
}

/// Attributes shared by complex, inclusive, exclusive and parallel gateways.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayAttributes {
    /// `Unspecified`, `Converging`, `Diverging` or `Mixed`.
    pub direction: Option<String>,
    pub default: Option<Id>,
}

impl AttributeRecord for GatewayAttributes {
    const FIELDS: FieldList<Self> = &[
        ("gatewayDirection", |a| text(&a.direction)),
        ("default", |a| id_text(a.default)),
    ];
}

/// Attributes of event-based gateways.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBasedGatewayAttributes {
    pub direction: Option<String>,
    pub instantiate: Option<bool>,
    pub event_gateway_type: Option<String>,
}

impl AttributeRecord for EventBasedGatewayAttributes {
    const FIELDS: FieldList<Self> = &[
        ("gatewayDirection", |a| text(&a.direction)),
        ("instantiate", |a| flag(a.instantiate)),
        ("eventGatewayType", |a| text(&a.event_gateway_type)),
    ];
}

/// Attributes of process elements that appear as nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessAttributes {
    pub is_executable: Option<bool>,
    pub is_closed: Option<bool>,
    pub process_type: Option<String>,
}

impl AttributeRecord for ProcessAttributes {
    const FIELDS: FieldList<Self> = &[
        ("isExecutable", |a| flag(a.is_executable)),
        ("isClosed", |a| flag(a.is_closed)),
        ("processType", |a| text(&a.process_type)),
    ];
}

/// Kind of a process node together with its typed attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    StartEvent(EventAttributes),
    EndEvent(EventAttributes),
    IntermediateCatchEvent(EventAttributes),
    IntermediateThrowEvent(EventAttributes),
    BoundaryEvent(BoundaryEventAttributes),
    Task(ActivityAttributes),
    Process(ProcessAttributes),
    SubProcess(SubProcessAttributes),
    ComplexGateway(GatewayAttributes),
    EventBasedGateway(EventBasedGatewayAttributes),
    InclusiveGateway(GatewayAttributes),
    ExclusiveGateway(GatewayAttributes),
    ParallelGateway(GatewayAttributes),
}

impl NodeKind {
    /// Creates a kind of the given category with an empty attribute record.
    ///
    /// # Examples
    ///
    /// ```
    /// # use procview_core::graph::{Category, NodeKind};
    /// let kind = NodeKind::empty(Category::ExclusiveGateway);
    /// assert_eq!(kind.category(), Category::ExclusiveGateway);
    /// assert!(kind.fields().is_empty());
    /// ```
    pub fn empty(category: Category) -> Self {
        match category {
            Category::StartEvent => Self::StartEvent(EventAttributes::default()),
            Category::EndEvent => Self::EndEvent(EventAttributes::default()),
            Category::IntermediateCatchEvent => {
                Self::IntermediateCatchEvent(EventAttributes::default())
            }
            Category::IntermediateThrowEvent => {
                Self::IntermediateThrowEvent(EventAttributes::default())
            }
            Category::BoundaryEvent => Self::BoundaryEvent(BoundaryEventAttributes::default()),
            Category::Task => Self::Task(ActivityAttributes::default()),
            Category::Process => Self::Process(ProcessAttributes::default()),
            Category::SubProcess => Self::SubProcess(SubProcessAttributes::default()),
            Category::ComplexGateway => Self::ComplexGateway(GatewayAttributes::default()),
            Category::EventBasedGateway => {
                Self::EventBasedGateway(EventBasedGatewayAttributes::default())
            }
            Category::InclusiveGateway => Self::InclusiveGateway(GatewayAttributes::default()),
            Category::ExclusiveGateway => Self::ExclusiveGateway(GatewayAttributes::default()),
            Category::ParallelGateway => Self::ParallelGateway(GatewayAttributes::default()),
        }
    }

    /// Returns the category tag of this kind.
    pub fn category(&self) -> Category {
        match self {
            Self::StartEvent(_) => Category::StartEvent,
            Self::EndEvent(_) => Category::EndEvent,
            Self::IntermediateCatchEvent(_) => Category::IntermediateCatchEvent,
            Self::IntermediateThrowEvent(_) => Category::IntermediateThrowEvent,
            Self::BoundaryEvent(_) => Category::BoundaryEvent,
            Self::Task(_) => Category::Task,
            Self::Process(_) => Category::Process,
            Self::SubProcess(_) => Category::SubProcess,
            Self::ComplexGateway(_) => Category::ComplexGateway,
            Self::EventBasedGateway(_) => Category::EventBasedGateway,
            Self::InclusiveGateway(_) => Category::InclusiveGateway,
            Self::ExclusiveGateway(_) => Category::ExclusiveGateway,
            Self::ParallelGateway(_) => Category::ParallelGateway,
        }
    }

    /// Returns the populated typed fields of this kind in listing order.
    pub fn fields(&self) -> Vec<(&'static str, AttributeValue)> {
        match self {
            Self::StartEvent(attrs)
            | Self::EndEvent(attrs)
            | Self::IntermediateCatchEvent(attrs)
            | Self::IntermediateThrowEvent(attrs) => attrs.fields(),
            Self::BoundaryEvent(attrs) => attrs.fields(),
            Self::Task(attrs) => attrs.fields(),
            Self::Process(attrs) => attrs.fields(),
            Self::SubProcess(attrs) => attrs.fields(),
            Self::ComplexGateway(attrs)
            | Self::InclusiveGateway(attrs)
            | Self::ExclusiveGateway(attrs)
            | Self::ParallelGateway(attrs) => attrs.fields(),
            Self::EventBasedGateway(attrs) => attrs.fields(),
        }
    }
}
