//! Scene description data model.
//!
//! The on-disk format is JSON:
//!
//! ```json
//! {
//!   "room_description": {
//!     "id": "room_20251209_001",
//!     "name": "Bedroom 001",
//!     "dimensions": [3.2, 3.1, 2.2],
//!     "items": [{ "type": "Bed", "align": "north-northeast", "display": "block" }]
//!   }
//! }
//! ```
//!
//! Fields the renderer can recover from (dimensions, align, display) are kept
//! loosely typed so that a questionable value falls back instead of failing
//! the whole parse.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level document: the room plus fields that belong to other consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub room_description: Room,
    /// Prompt-flattening metadata; carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Value>,
}

impl SceneDescription {
    pub fn new(room: Room) -> Self {
        Self { room_description: room, role: None, task: None }
    }
}

/// One physical space and its furnishings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-text shape descriptor; never parsed geometrically.
    #[serde(default)]
    pub shape: String,
    /// Width, depth, height in meters. Validated by [`Room::resolved_dimensions`].
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub dimensions: Value,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub theme: String,
    /// Declaration order is also draw order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Room {
    /// The validated dimension triple, or the documented fallback.
    pub fn resolved_dimensions(&self) -> Dimensions {
        Dimensions::from_value(&self.dimensions)
    }

    /// Items whose `display` is exactly `"block"`, with their declaration index.
    pub fn visible_items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.items.iter().enumerate().filter(|(_, item)| {
            let visible = item.is_visible();
            if !visible {
                crate::log::debug!(kind = %item.kind, "item hidden, skipping");
            }
            visible
        })
    }
}

/// Where a [`Dimensions`] value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionsSource {
    Declared,
    Fallback,
}

/// Room extent in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub source: DimensionsSource,
}

impl Dimensions {
    pub const FALLBACK: Dimensions = Dimensions {
        width: 3.0,
        depth: 3.0,
        height: 2.5,
        source: DimensionsSource::Fallback,
    };

    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self { width, depth, height, source: DimensionsSource::Declared }
    }

    /// Accept exactly three finite, positive numbers; anything else is the fallback.
    pub fn from_value(value: &Value) -> Self {
        let Some(entries) = value.as_array() else {
            crate::log::warn!(?value, "dimensions missing or not an array, using fallback");
            return Self::FALLBACK;
        };
        let numbers: Vec<f64> = entries
            .iter()
            .filter_map(Value::as_f64)
            .filter(|v| crate::types::positive(*v).is_ok())
            .collect();
        match (entries.len(), numbers.as_slice()) {
            (3, &[w, d, h]) => Self::new(w, d, h),
            _ => {
                crate::log::warn!(?value, "dimensions must be three positive numbers, using fallback");
                Self::FALLBACK
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DimensionsSource::Fallback
    }
}

/// `W×D×Hm`
impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}×{}m", self.width, self.depth, self.height)
    }
}

/// One furnishing or fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Type tag selecting the rendering variant; shown verbatim in the label.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Only the literal string `"block"` makes the item visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Value>,
    /// Variant-specific extras (`chair`, `plants`, `count`, ...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Item {
    pub const VISIBLE: &'static str = "block";

    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), align: None, display: None, attributes: Map::new() }
    }

    pub fn aligned(mut self, token: impl Into<String>) -> Self {
        self.align = Some(Align::One(token.into()));
        self
    }

    pub fn displayed(mut self, display: impl Into<String>) -> Self {
        self.display = Some(Value::String(display.into()));
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_visible(&self) -> bool {
        matches!(&self.display, Some(Value::String(s)) if s == Self::VISIBLE)
    }

    /// Lowercased, trimmed type tag used for variant lookup.
    pub fn tag(&self) -> String {
        self.kind.trim().to_lowercase()
    }

    /// JSON truthiness of an optional attribute; absent is false.
    pub fn flag(&self, key: &str) -> bool {
        self.attributes.get(key).is_some_and(truthy)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Placement hint: one compass token, several, or something unusable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Align {
    One(String),
    /// One anchor per entry; entries that are not strings anchor at the center.
    Many(Vec<Value>),
    /// Any other JSON value; resolves to the room center.
    Other(Value),
}

impl Align {
    /// The raw tokens, in declaration order; non-string entries become `""`.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Align::One(token) => vec![token.as_str()],
            Align::Many(tokens) => tokens.iter().map(|t| t.as_str().unwrap_or_default()).collect(),
            Align::Other(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn visibility_requires_exact_block() {
        assert!(item(json!({"type": "Bed", "display": "block"})).is_visible());
        assert!(!item(json!({"type": "Bed", "display": "Block"})).is_visible());
        assert!(!item(json!({"type": "Bed", "display": "none"})).is_visible());
        assert!(!item(json!({"type": "Bed", "display": true})).is_visible());
        assert!(!item(json!({"type": "Bed"})).is_visible());
    }

    #[test]
    fn align_accepts_string_list_and_garbage() {
        let one = item(json!({"type": "Door", "align": "west"}));
        assert_eq!(one.align, Some(Align::One("west".into())));

        let many = item(json!({"type": "Door", "align": ["west", "east"]}));
        assert_eq!(many.align.unwrap().tokens(), vec!["west", "east"]);

        let other = item(json!({"type": "Door", "align": 42}));
        assert!(other.align.unwrap().tokens().is_empty());

        let mixed = item(json!({"type": "Door", "align": ["north", 3, null]}));
        assert!(matches!(mixed.align, Some(Align::Many(_))));
        assert_eq!(mixed.align.unwrap().tokens(), vec!["north", "", ""]);
    }

    #[test]
    fn attributes_are_flattened() {
        let desk = item(json!({"type": "Desk", "chair": true, "count": 0, "style": "oak"}));
        assert!(desk.flag("chair"));
        assert!(!desk.flag("count"));
        assert!(desk.flag("style"));
        assert!(!desk.flag("plants"));
    }

    #[test]
    fn tag_is_normalized() {
        assert_eq!(Item::new("  NightStand ").tag(), "nightstand");
    }

    #[test]
    fn dimensions_declared() {
        let dims = Dimensions::from_value(&json!([3.2, 3.1, 2.2]));
        assert_eq!(dims, Dimensions::new(3.2, 3.1, 2.2));
        assert_eq!(dims.to_string(), "3.2×3.1×2.2m");
    }

    #[test]
    fn dimensions_fall_back() {
        for bad in [
            json!(null),
            json!([3.2, 3.1]),
            json!([3.2, 3.1, 2.2, 1.0]),
            json!([3.2, "wide", 2.2]),
            json!([3.2, 0, 2.2]),
            json!([3.2, -1, 2.2]),
            json!({"w": 3}),
        ] {
            assert!(Dimensions::from_value(&bad).is_fallback(), "{bad} should fall back");
        }
    }

    #[test]
    fn missing_type_is_an_error() {
        assert!(serde_json::from_value::<Item>(json!({"align": "north"})).is_err());
    }

    #[test]
    fn round_trip_keeps_extras() {
        let original = json!({
            "room_description": {
                "id": "r1",
                "dimensions": [1, 2, 3],
                "items": [{"type": "Window", "align": "east", "display": "block", "plants": true}]
            },
            "task": {"goal": "render"}
        });
        let scene: SceneDescription = serde_json::from_value(original.clone()).unwrap();
        let back = serde_json::to_value(&scene).unwrap();
        assert_eq!(back["room_description"]["items"][0]["plants"], json!(true));
        assert_eq!(back["task"], original["task"]);
    }
}
