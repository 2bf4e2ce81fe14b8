//! Storage types for promptkeep.
//!
//! A [`Document`] is the opaque JSON value held under one storage key. The
//! store never distinguishes "never written" from "unreadable": both are
//! [`Document::Empty`].

use serde_json::Value;

/// The value stored under a single key.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Document {
    /// Key never set, file missing, empty, or not parseable as JSON.
    #[default]
    Empty,
    /// A successfully parsed JSON value (including JSON `null`).
    Value(Value),
}

impl Document {
    /// Parse raw file contents. Blank or malformed input yields `Empty`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Document::Empty;
        }
        match serde_json::from_str(trimmed) {
            Ok(value) => Document::Value(value),
            Err(_) => Document::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Document::Empty)
    }

    /// Convert to an `Option`, mapping `Empty` to `None`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Document::Empty => None,
            Document::Value(v) => Some(v),
        }
    }

    /// Coerce to a list. Anything that is not a JSON array is an empty list.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Document::Value(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document::Value(value)
    }
}
