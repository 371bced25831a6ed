use super::blocks::*;
use super::common::{BlockCommon, JsonObject, CHILDREN_KEY};
use crate::types::ValidationError;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Image($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Other($pattern) => $result,
        }
    };
}

/// A node of a page's content tree.
///
/// Only the kinds the exporter rewrites get their own variant. Everything
/// else is `Other` and keeps its JSON verbatim, so unknown block types
/// survive the pipeline unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Image(ImageBlock),
    Bookmark(BookmarkBlock),
    Other(OpaqueBlock),
}

impl Block {
    /// Builds a block (and its `blocks` subtree) from a JSON value.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(fields) => Self::from_object(fields),
            other => Err(ValidationError::MalformedBlock(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Builds a block from a JSON object, peeling off its children.
    pub fn from_object(mut fields: JsonObject) -> Result<Self, ValidationError> {
        let children = match fields.shift_remove(CHILDREN_KEY) {
            None => None,
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .map(Block::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(other) => {
                return Err(ValidationError::MalformedBlock(format!(
                    "'{}' must be an array, found {}",
                    CHILDREN_KEY,
                    json_kind(&other)
                )))
            }
        };

        let common = BlockCommon { fields, children };
        Ok(Self::from_common(common))
    }

    /// Picks the variant from the `type` tag.
    pub fn from_common(common: BlockCommon) -> Self {
        match common.type_tag() {
            Some("image") => Block::Image(ImageBlock { common }),
            Some("bookmark") => Block::Bookmark(BookmarkBlock { common }),
            _ => Block::Other(OpaqueBlock { common }),
        }
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Get the block's ID
    pub fn id(&self) -> Option<&str> {
        self.common().id()
    }

    /// Get block type name as Notion reported it
    pub fn block_type(&self) -> &str {
        self.common().type_tag().unwrap_or("unknown")
    }

    /// Get the block's children (empty when it has none)
    pub fn children(&self) -> &[Block] {
        self.common().children.as_deref().unwrap_or(&[])
    }

    /// Set children
    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = Some(children);
    }

    /// Detaches the children, leaving `None` behind.
    pub fn take_children(&mut self) -> Option<Vec<Block>> {
        self.common_mut().children.take()
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_with_children(
            serializer,
            &self.common().fields,
            self.common().children.as_deref(),
        )
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = JsonObject::deserialize(deserializer)?;
        Block::from_object(fields).map_err(D::Error::custom)
    }
}

/// Writes `fields` in order, followed by `blocks` when present.
pub(crate) fn serialize_with_children<S>(
    serializer: S,
    fields: &JsonObject,
    children: Option<&[Block]>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let len = fields.len() + usize::from(children.is_some());
    let mut map = serializer.serialize_map(Some(len))?;
    for (key, value) in fields {
        map.serialize_entry(key, value)?;
    }
    if let Some(children) = children {
        map.serialize_entry(CHILDREN_KEY, children)?;
    }
    map.end()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn dispatches_on_type_tag() {
        let image = Block::from_json(json!({ "type": "image", "image": {} })).unwrap();
        let bookmark = Block::from_json(json!({ "type": "bookmark", "bookmark": {} })).unwrap();
        let toggle = Block::from_json(json!({ "type": "toggle", "toggle": {} })).unwrap();
        let untyped = Block::from_json(json!({ "id": "x" })).unwrap();

        assert!(matches!(image, Block::Image(_)));
        assert!(matches!(bookmark, Block::Bookmark(_)));
        assert!(matches!(toggle, Block::Other(_)));
        assert_eq!(untyped.block_type(), "unknown");
    }

    #[test]
    fn nested_children_are_parsed() {
        let block = Block::from_json(json!({
            "id": "outer",
            "type": "toggle",
            "blocks": [
                { "id": "inner", "type": "image", "image": {} }
            ]
        }))
        .unwrap();

        assert_eq!(block.children().len(), 1);
        assert_eq!(block.children()[0].id(), Some("inner"));
        assert!(!block.common().fields.contains_key("blocks"));
    }

    #[test]
    fn unknown_blocks_round_trip_verbatim() {
        let source = r#"{"object":"block","id":"b1","type":"synced_block","synced_block":{"synced_from":null,"z":1,"a":[true,null]},"has_children":true,"blocks":[{"id":"b2","type":"paragraph","paragraph":{"rich_text":[]}}]}"#;
        let block: Block = serde_json::from_str(source).unwrap();
        assert_eq!(serde_json::to_string(&block).unwrap(), source);
    }

    #[test]
    fn missing_children_key_stays_missing() {
        let source = r#"{"id":"b1","type":"divider","divider":{}}"#;
        let block: Block = serde_json::from_str(source).unwrap();
        assert!(block.common().children.is_none());
        assert_eq!(serde_json::to_string(&block).unwrap(), source);
    }

    #[test]
    fn rejects_malformed_children() {
        let err = Block::from_json(json!({ "type": "toggle", "blocks": {} })).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
        assert!(Block::from_json(json!("not a block")).is_err());
    }
}
