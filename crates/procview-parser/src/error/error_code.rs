//! Error codes for BPMN reading diagnostics.
//!
//! - `E0xx` - XML syntax errors
//! - `E1xx` - Model structure errors
//! - `E2xx` - Reference errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Errors (E0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The document is not well-formed XML: mismatched or unclosed tags,
    /// broken markup, or trailing content after the root element.
    E001,

    /// Undecodable attribute or text.
    ///
    /// An attribute value or text node contains an unknown entity or an
    /// invalid character reference.
    E002,

    // =========================================================================
    // Model Errors (E1xx)
    // =========================================================================
    /// Not a BPMN document.
    ///
    /// The root element is not `definitions`.
    E100,

    /// Missing required attribute.
    ///
    /// A process, flow node or sequence flow lacks an attribute it cannot be
    /// read without, such as `id` or `sourceRef`.
    E101,

    /// Invalid attribute value.
    ///
    /// A boolean attribute is neither `true` nor `false`, or a coordinate is
    /// not a number. Reported as a warning.
    E102,

    // =========================================================================
    // Reference Errors (E2xx)
    // =========================================================================
    /// Duplicate element id.
    ///
    /// Two flow nodes or sequence flows share the same `id`.
    E200,

    /// Unknown flow node reference.
    ///
    /// A sequence flow names a source or target that no flow node declares.
    E201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed XML",
            ErrorCode::E002 => "undecodable attribute or text",
            ErrorCode::E100 => "not a BPMN document",
            ErrorCode::E101 => "missing required attribute",
            ErrorCode::E102 => "invalid attribute value",
            ErrorCode::E200 => "duplicate element id",
            ErrorCode::E201 => "unknown flow node reference",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E101.to_string(), "E101");
        assert_eq!(ErrorCode::E201.to_string(), "E201");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "malformed XML");
        assert_eq!(ErrorCode::E101.description(), "missing required attribute");
        assert_eq!(ErrorCode::E200.description(), "duplicate element id");
    }
}
