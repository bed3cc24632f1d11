//! # Canvas Configuration
//!
//! A canvas is configured by an ordered list of tagged entries, one per
//! shape. Each entry carries plain text attributes; shapes read them
//! permissively (missing or malformed values become defaults).
//!
//! ## JSON form
//!
//! Each entry is a single-key object whose key is the shape tag:
//!
//! ```
//! use easel::config::CanvasConfig;
//!
//! let config: CanvasConfig = serde_json::from_str(r#"[
//!     {"line": {"x1": 0, "y1": 0, "x2": 5, "y2": 0, "colour": "255 0 0 255"}},
//!     {"rectangle": {"x": 1, "w": "(width - 2)", "h": 3, "fill_colour": "0 0 255 255"}}
//! ]"#).unwrap();
//!
//! assert_eq!(config.len(), 2);
//! assert_eq!(config.entries()[0].tag, "line");
//! assert_eq!(config.entries()[1].attributes.get("w"), "(width - 2)");
//! ```
//!
//! Numbers and booleans are read as their textual form; entry order is
//! preserved and is the paint order.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CanvasError;
use crate::variables::Variant;

/// Text attributes of one configuration entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute text, empty when absent.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One tagged configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ShapeEntry {
    pub tag: String,
    pub attributes: Attributes,
}

impl ShapeEntry {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(key, value.to_string());
        self
    }
}

/// Textual form of a JSON scalar attribute value.
fn attribute_text(key: &str, value: Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("attribute '{}' must be a scalar, got {}", key, other)),
    }
}

impl TryFrom<Map<String, Value>> for ShapeEntry {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "shape entry must have exactly one tag, found {}",
                map.len()
            ));
        }
        let Some((tag, body)) = map.into_iter().next() else {
            return Err("shape entry must have exactly one tag".to_string());
        };

        let mut attributes = Attributes::new();
        match body {
            Value::Object(fields) => {
                for (key, value) in fields {
                    let text = attribute_text(&key, value)?;
                    attributes.insert(key, text);
                }
            }
            Value::Null => {}
            other => return Err(format!("shape '{}' must be an object, got {}", tag, other)),
        }

        Ok(ShapeEntry { tag, attributes })
    }
}

impl From<ShapeEntry> for Map<String, Value> {
    fn from(entry: ShapeEntry) -> Self {
        let fields: Map<String, Value> = entry
            .attributes
            .0
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        let mut map = Map::new();
        map.insert(entry.tag, Value::Object(fields));
        map
    }
}

/// The ordered shape entries of one canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasConfig {
    entries: Vec<ShapeEntry>,
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ShapeEntry) {
        self.entries.push(entry);
    }

    /// Builder form of [`CanvasConfig::push`].
    pub fn with(mut self, entry: ShapeEntry) -> Self {
        self.push(entry);
        self
    }

    pub fn entries(&self) -> &[ShapeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ShapeEntry> for CanvasConfig {
    fn from_iter<I: IntoIterator<Item = ShapeEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A standalone canvas document: size, extra variables and shapes.
///
/// ```
/// use easel::config::Document;
///
/// let doc = Document::from_json(r#"{
///     "width": 64, "height": 32,
///     "variables": {"revision": "1.0"},
///     "shapes": [{"text": {"text": "(revision)", "w": 64, "h": 32, "font_size": 12}}]
/// }"#).unwrap();
/// assert_eq!((doc.width, doc.height), (64, 32));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Variables bound on the canvas before drawing.
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    #[serde(default)]
    pub shapes: CanvasConfig,
}

impl Document {
    pub fn from_json(text: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(text).map_err(|e| CanvasError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Document variables as runtime values.
    pub fn variants(&self) -> impl Iterator<Item = (&str, Variant)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), json_variant(v)))
    }
}

/// Integers that fit become [`Variant::Int`], everything else its text.
fn json_variant(value: &Value) -> Variant {
    match value {
        Value::Null => Variant::Null,
        Value::Bool(b) => Variant::from(*b),
        Value::Number(n) => match n.as_i64().and_then(|v| i32::try_from(v).ok()) {
            Some(v) => Variant::Int(v),
            None => Variant::Str(n.to_string()),
        },
        Value::String(s) => Variant::Str(s.clone()),
        other => Variant::Str(other.to_string()),
    }
}
