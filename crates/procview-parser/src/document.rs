//! XML reading: turns BPMN source text into a lightweight element tree.
//!
//! Namespace prefixes are dropped from element and attribute names, so
//! `<bpmn:task>`, `<bpmn2:task>` and `<task>` all read as `task`. Every
//! element keeps the byte span of its start tag for diagnostics.

use indexmap::IndexMap;
use log::trace;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// An XML element with its attributes, child elements and text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
    text: String,
    span: Span,
}

impl Element {
    fn new(name: String, attributes: IndexMap<String, String>, span: Span) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
            span,
        }
    }

    /// Local element name, without namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Iterates child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Concatenated, trimmed text content of this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Span of the start tag.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Reads a whole document and returns its root element.
pub fn read(source: &str) -> Result<Element, Diagnostic> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text_start = true;
    reader.config_mut().trim_text_end = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let start = offset(reader.buffer_position());
        let event = reader.read_event().map_err(|err| {
            let position = offset(reader.error_position());
            malformed(err.to_string(), Span::new(position..position.saturating_add(1)))
        })?;
        let span = markup_span(source, start, offset(reader.buffer_position()));

        match event {
            Event::Start(tag) => {
                let element = start_element(&tag, span)?;
                stack.push(element);
            }
            Event::Empty(tag) => {
                let element = start_element(&tag, span)?;
                close_element(element, &mut stack, &mut root, span)?;
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(malformed("closing tag without an opening tag", span));
                };
                close_element(element, &mut stack, &mut root, span)?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let text = text.unescape().map_err(|err| {
                        Diagnostic::error(format!("cannot decode text: {err}"))
                            .with_code(ErrorCode::E002)
                            .with_label(span, "in this text")
                    })?;
                    append_text(parent, &text);
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    append_text(parent, &String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            // Declarations, comments and processing instructions carry no model data.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(
            format!("element `{}` is never closed", open.name()),
            open.span(),
        ));
    }

    root.ok_or_else(|| {
        Diagnostic::error("document has no root element")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..source.len()), "empty document")
    })
}

fn start_element(tag: &BytesStart<'_>, span: Span) -> Result<Element, Diagnostic> {
    let name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();

    let mut attributes = IndexMap::new();
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| malformed(err.to_string(), span))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| {
            Diagnostic::error(format!("cannot decode attribute `{key}`: {err}"))
                .with_code(ErrorCode::E002)
                .with_label(span, "in this element")
        })?;
        attributes.insert(key, value.into_owned());
    }

    trace!(name, span:?; "Read element");
    Ok(Element::new(name, attributes, span))
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    span: Span,
) -> Result<(), Diagnostic> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(malformed("document has more than one root element", span));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(element: &mut Element, text: &str) {
    if text.is_empty() {
        return;
    }
    if !element.text.is_empty() {
        element.text.push(' ');
    }
    element.text.push_str(text);
}

fn malformed(message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::error(message)
        .with_code(ErrorCode::E001)
        .with_label(span, "malformed XML")
}

/// Span of the markup read between two positions, skipping the whitespace
/// the reader trims in front of a tag.
fn markup_span(source: &str, start: usize, end: usize) -> Span {
    let end = end.min(source.len());
    let start = start.min(end);
    let leading = source.as_bytes()[start..end]
        .iter()
        .position(|byte| *byte == b'<')
        .unwrap_or(0);
    Span::new(start + leading..end)
}

/// Converts a reader position to a byte offset.
fn offset<T: TryInto<usize>>(position: T) -> usize {
    position.try_into().unwrap_or(usize::MAX)
}
