use super::Block;
use serde_json::{Map, Value};

/// A JSON object with keys kept in source order.
pub type JsonObject = Map<String, Value>;

/// Key under which a block's (or page's) children are stored.
pub const CHILDREN_KEY: &str = "blocks";

/// Fields shared by every block kind.
///
/// `fields` holds the block exactly as Notion returned it, minus the
/// children. `children` is `None` when the source object carried no
/// `blocks` key, so a block without one serializes without one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockCommon {
    pub fields: JsonObject,
    pub children: Option<Vec<Block>>,
}

impl BlockCommon {
    pub fn new(fields: JsonObject) -> Self {
        Self {
            fields,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = Some(children);
        self
    }

    /// The Notion block id, if present.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// The `type` tag as Notion reported it.
    pub fn type_tag(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// Whether Notion reported nested content for this block.
    pub fn has_children(&self) -> bool {
        self.fields
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// A string field inside the type-specific payload, e.g.
    /// `payload_str("bookmark", "url")`.
    pub fn payload_str(&self, payload: &str, key: &str) -> Option<&str> {
        self.fields.get(payload)?.get(key)?.as_str()
    }
}
