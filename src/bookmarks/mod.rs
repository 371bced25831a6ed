//! Bookmark enrichment: replace each bookmark's raw payload with derived
//! link metadata (title, url, description, favicon, image).

mod html;
mod merger;

pub use html::parse_link_metadata;
pub use merger::{BookmarkEnricher, EnrichmentResult};

use crate::error::AppError;
use crate::model::JsonObject;
use crate::types::{MetadataField, MetadataFieldSet, ValidatedUrl};
use crate::web::WebClient;
use serde_json::Value;

/// Metadata derived from a bookmarked page. The URL itself is not part of
/// it; it comes from the bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub favicon: Option<String>,
    pub image: Option<String>,
}

impl LinkMetadata {
    /// The `metadata` object for a bookmark: exactly the requested fields,
    /// in the requested order, `null` where nothing was found.
    pub fn project(&self, url: Option<&str>, fields: &MetadataFieldSet) -> JsonObject {
        fields
            .iter()
            .map(|field| {
                let value = match field {
                    MetadataField::Title => self.title.as_deref(),
                    MetadataField::Url => url,
                    MetadataField::Description => self.description.as_deref(),
                    MetadataField::Favicon => self.favicon.as_deref(),
                    MetadataField::Image => self.image.as_deref(),
                };
                let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
                (field.as_str().to_string(), value)
            })
            .collect()
    }
}

/// The ability to derive metadata for a bookmarked link.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    async fn link_metadata(&self, url: &ValidatedUrl) -> Result<LinkMetadata, AppError>;
}

#[async_trait::async_trait]
impl MetadataSource for WebClient {
    async fn link_metadata(&self, url: &ValidatedUrl) -> Result<LinkMetadata, AppError> {
        let html = self.get_text(url).await.map_err(|e| AppError::Enrichment {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(parse_link_metadata(&html, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_keeps_requested_fields_only() {
        let metadata = LinkMetadata {
            title: Some("Y".into()),
            description: None,
            favicon: Some("http://y/favicon.ico".into()),
            image: None,
        };

        let all = metadata.project(Some("http://y"), &MetadataFieldSet::default());
        assert_eq!(
            Value::Object(all),
            json!({
                "title": "Y",
                "url": "http://y",
                "description": null,
                "favicon": "http://y/favicon.ico",
                "image": null
            })
        );

        let some = metadata.project(
            Some("http://y"),
            &MetadataFieldSet::parse("url,title").unwrap(),
        );
        let keys: Vec<&str> = some.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["url", "title"]);
    }
}
