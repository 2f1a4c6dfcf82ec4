//! Identifier management using string interning.
//!
//! Node identifiers in process definitions are opaque strings that get
//! compared and hashed constantly while building label lookups, so they are
//! interned once and passed around as a [`Copy`] symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a diagram element (node, flow or process).
///
/// # Examples
///
/// ```
/// use procview_core::identifier::Id;
///
/// let task = Id::new("Task_1");
/// assert_eq!(task, "Task_1");
/// assert_eq!(task, Id::new("Task_1"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns an owned copy of the identifier text.
    pub fn to_text(self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_string)
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve before writing so the lock is not held across the formatter.
        let text = self.to_text();
        f.write_str(&text)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_id() {
        let a = Id::new("StartEvent_1");
        let b = Id::new("StartEvent_1");
        let c = Id::new("EndEvent_1");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_roundtrips_text() {
        let id = Id::new("Gateway_0x9");
        assert_eq!(id.to_string(), "Gateway_0x9");
        assert_eq!(id.to_text(), "Gateway_0x9");
    }

    #[test]
    fn test_compare_with_str() {
        let id: Id = "Flow_1".into();
        assert!(id == "Flow_1");
        assert!(id != "Flow_2");
    }
}
