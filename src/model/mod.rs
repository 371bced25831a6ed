mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;

use crate::types::ValidationError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A Notion page: the page object's own fields, verbatim, plus its full
/// content tree under `blocks`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub fields: JsonObject,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(fields: JsonObject, blocks: Vec<Block>) -> Self {
        Self { fields, blocks }
    }

    /// Builds a page from a full-page JSON object (page fields plus `blocks`).
    pub fn from_object(mut fields: JsonObject) -> Result<Self, ValidationError> {
        let blocks = match fields.shift_remove(CHILDREN_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(Block::from_json)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ValidationError::MalformedBlock(format!(
                    "page '{}' must be an array",
                    CHILDREN_KEY
                )))
            }
        };
        Ok(Self { fields, blocks })
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Plain-text title from the page's `title` property, if any.
    pub fn title(&self) -> Option<String> {
        let properties = self.fields.get("properties")?.as_object()?;
        let title = properties
            .values()
            .find(|property| property.get("type").and_then(Value::as_str) == Some("title"))?;
        let text: String = title
            .get("title")?
            .as_array()?
            .iter()
            .filter_map(|item| item.get("plain_text").and_then(Value::as_str))
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Counts over the whole content tree.
    pub fn stats(&self) -> TreeStats {
        TreeStats::of(&self.blocks)
    }
}

impl Serialize for Page {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        block::serialize_with_children(serializer, &self.fields, Some(&self.blocks))
    }
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = JsonObject::deserialize(deserializer)?;
        Page::from_object(fields).map_err(D::Error::custom)
    }
}

/// Block counts over a content tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub blocks: usize,
    pub images: usize,
    pub bookmarks: usize,
    pub deepest_nesting: usize,
}

impl TreeStats {
    pub fn of(blocks: &[Block]) -> Self {
        let mut stats = TreeStats::default();
        stats.accumulate(blocks, 1);
        stats
    }

    fn accumulate(&mut self, blocks: &[Block], depth: usize) {
        for block in blocks {
            self.blocks += 1;
            self.deepest_nesting = self.deepest_nesting.max(depth);
            match block {
                Block::Image(_) => self.images += 1,
                Block::Bookmark(_) => self.bookmarks += 1,
                Block::Other(_) => {}
            }
            self.accumulate(block.children(), depth + 1);
        }
    }
}
