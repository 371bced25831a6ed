//! The block kinds the exporter rewrites, plus the opaque fallback.

use super::common::{BlockCommon, JsonObject};
use serde_json::Value;

/// Payload key of an image block.
pub const IMAGE_PAYLOAD: &str = "image";
/// Payload key of a raw bookmark block.
pub const BOOKMARK_PAYLOAD: &str = "bookmark";
/// Key holding derived metadata on an enriched bookmark.
pub const METADATA_KEY: &str = "metadata";

/// An `image` block. The source reference lives at `image.<image.type>.url`,
/// where the type is `file` (Notion hosted) or `external`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub common: BlockCommon,
}

impl ImageBlock {
    /// The current image reference (remote URL or materialized local path).
    pub fn source_url(&self) -> Option<&str> {
        let image = self.common.fields.get(IMAGE_PAYLOAD)?;
        let kind = image.get("type")?.as_str()?;
        image.get(kind)?.get("url")?.as_str()
    }

    /// Replaces the image reference. Returns `false` when the payload has no
    /// reference to replace.
    pub fn set_source_url(&mut self, reference: impl Into<String>) -> bool {
        let Some(image) = self
            .common
            .fields
            .get_mut(IMAGE_PAYLOAD)
            .and_then(Value::as_object_mut)
        else {
            return false;
        };
        let Some(kind) = image.get("type").and_then(Value::as_str).map(str::to_owned) else {
            return false;
        };
        match image.get_mut(&kind).and_then(Value::as_object_mut) {
            Some(source) if source.contains_key("url") => {
                source.insert("url".to_string(), Value::String(reference.into()));
                true
            }
            _ => false,
        }
    }
}

/// A `bookmark` block, either raw (`bookmark` payload) or enriched
/// (`metadata` object, no `bookmark` payload).
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
}

impl BookmarkBlock {
    /// The bookmarked URL from the raw payload. Empty URLs count as absent.
    pub fn url(&self) -> Option<&str> {
        self.common
            .payload_str(BOOKMARK_PAYLOAD, "url")
            .filter(|url| !url.trim().is_empty())
    }

    /// Whether the raw payload is still attached.
    pub fn has_raw_payload(&self) -> bool {
        self.common.fields.contains_key(BOOKMARK_PAYLOAD)
    }

    /// The derived metadata, once enriched.
    pub fn metadata(&self) -> Option<&JsonObject> {
        self.common.fields.get(METADATA_KEY)?.as_object()
    }

    pub fn is_enriched(&self) -> bool {
        self.metadata().is_some() && !self.has_raw_payload()
    }

    /// Returns a copy carrying `metadata` in place of the raw payload.
    pub fn enriched(&self, metadata: JsonObject) -> BookmarkBlock {
        let mut common = self.common.clone();
        common.fields.shift_remove(BOOKMARK_PAYLOAD);
        common
            .fields
            .insert(METADATA_KEY.to_string(), Value::Object(metadata));
        BookmarkBlock { common }
    }
}

/// Any other block type, carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueBlock {
    pub common: BlockCommon,
}
