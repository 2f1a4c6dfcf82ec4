//! Open-ended attribute values attached to nodes and edges.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered bag of attributes that have no typed home on a node or edge.
///
/// Insertion order is preserved; it is the order in which detail views list
/// the attributes.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// A single attribute value as delivered by the diagram parser.
///
/// # Examples
///
/// ```
/// # use procview_core::graph::AttributeValue;
/// let flows = AttributeValue::from(vec!["Flow_1", "Flow_2"]);
/// assert_eq!(flows.to_string(), "Flow_1, Flow_2");
///
/// assert!(AttributeValue::from("").is_empty());
/// assert!(AttributeValue::from(0_i64).is_empty());
/// assert!(!AttributeValue::from("x").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    List(Vec<String>),
}

impl AttributeValue {
    /// Returns true for values that carry no information: empty text, zero,
    /// `false` and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Integer(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::Flag(value) => !value,
            Self::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Flag(value) => write!(f, "{value}"),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}
