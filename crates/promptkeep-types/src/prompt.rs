//! Prompt history and favorites types.
//!
//! History and favorites share one item shape. Items live as JSON objects
//! inside a list document keyed `history.<type>` or `favorite.<type>`, where
//! `<type>` is the UI panel the prompt belongs to (e.g. `txt2img`).

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Which list family a prompt item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    History,
    Favorite,
}

impl ListKind {
    /// Storage key for this list family and prompt type.
    pub fn key(&self, prompt_type: &str) -> String {
        format!("{self}.{prompt_type}")
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::History => write!(f, "history"),
            ListKind::Favorite => write!(f, "favorite"),
        }
    }
}

/// A stored history or favorite entry.
///
/// Decoding is lenient: missing or oddly typed fields take their defaults, and
/// fields this type does not know about are kept in `extra` so a rewrite never
/// drops them. Any JSON object decodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptItem {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    /// Creation time, seconds since the Unix epoch (UTC).
    #[serde(deserialize_with = "lenient_time")]
    pub time: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<Value>,
    #[serde(deserialize_with = "lenient_string")]
    pub prompt: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PromptItem {
    /// Decode a stored list element. Non-object elements yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Encode as a JSON object for storage.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Caller-supplied prompt fields.
///
/// Used both as the input for minting a new item (absent fields take
/// defaults) and as a partial update (absent fields are left unchanged).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromptFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Value>>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl PromptFields {
    /// Build a new item with a fresh id and the current UTC time.
    pub fn mint(self) -> PromptItem {
        PromptItem {
            id: Uuid::now_v7().to_string(),
            time: Utc::now().timestamp(),
            name: self.name.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            prompt: self.prompt.unwrap_or_default(),
            extra: Map::new(),
        }
    }

    /// Overwrite only the supplied fields on a stored JSON object.
    pub fn apply_to(&self, object: &mut Map<String, Value>) {
        if let Some(tags) = &self.tags {
            object.insert("tags".to_string(), Value::Array(tags.clone()));
        }
        if let Some(prompt) = &self.prompt {
            object.insert("prompt".to_string(), Value::String(prompt.clone()));
        }
        if let Some(name) = &self.name {
            object.insert("name".to_string(), Value::String(name.clone()));
        }
    }
}

/// A history item as returned to readers, with its derived favorite flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub item: PromptItem,
    pub is_favorite: bool,
}

/// Ids written by older clients may be numbers; read them as their decimal
/// form so they match [`item_id`].
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(id_string(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let time = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    };
    Ok(time.unwrap_or_default())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(tags) => tags,
        _ => Vec::new(),
    })
}

/// A JSON id rendered as a string. Strings pass through and numbers use their
/// decimal form; anything else is not an id.
pub fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Identifier of a stored list element, if it has one.
///
/// Numeric ids compare by their decimal form, so `7` and `"7"` match.
pub fn item_id(value: &Value) -> Option<String> {
    id_string(value.get("id")?)
}

/// Whether a stored list element carries the given id.
pub fn has_id(value: &Value, id: &str) -> bool {
    item_id(value).is_some_and(|v| v == id)
}
