//! Merges derived metadata into bookmark blocks.
//!
//! The merge is all-or-nothing. Metadata for every bookmark is gathered
//! first; only when all of it arrived is a new tree built with each
//! bookmark's raw payload swapped for a `metadata` object. On any error
//! the caller still holds the untouched input tree.

use super::{LinkMetadata, MetadataSource};
use crate::error::AppError;
use crate::model::Block;
use crate::types::{MetadataFieldSet, ValidatedUrl};
use std::collections::HashMap;

/// Outcome of a successful enrichment pass.
#[derive(Debug, Clone)]
pub struct EnrichmentResult {
    pub blocks: Vec<Block>,
    /// Bookmarks that received a `metadata` object.
    pub enriched: usize,
    /// Distinct links that were looked up.
    pub lookups: usize,
}

pub struct BookmarkEnricher<'a> {
    source: &'a dyn MetadataSource,
    fields: &'a MetadataFieldSet,
}

impl<'a> BookmarkEnricher<'a> {
    pub fn new(source: &'a dyn MetadataSource, fields: &'a MetadataFieldSet) -> Self {
        Self { source, fields }
    }

    /// Returns a copy of `blocks` with every raw bookmark enriched.
    ///
    /// Bookmarks are visited depth-first, including those nested in
    /// columns, toggles and other wrappers. Each distinct link is looked up
    /// once. Bookmarks without a URL get a `metadata` object of nulls.
    pub async fn enrich(&self, blocks: &[Block]) -> Result<EnrichmentResult, AppError> {
        let mut links = Vec::new();
        collect_bookmark_links(blocks, &mut links);

        let mut found: HashMap<String, LinkMetadata> = HashMap::new();
        for link in links {
            if found.contains_key(&link) {
                continue;
            }
            let url = ValidatedUrl::parse(&link).map_err(|e| AppError::Enrichment {
                url: link.clone(),
                message: e.to_string(),
            })?;
            log::debug!("Fetching bookmark metadata for {}", url);
            let metadata = self.source.link_metadata(&url).await?;
            found.insert(link, metadata);
        }

        let lookups = found.len();
        let mut enriched = 0;
        let blocks = self.merge(blocks, &found, &mut enriched);
        Ok(EnrichmentResult {
            blocks,
            enriched,
            lookups,
        })
    }

    fn merge(
        &self,
        blocks: &[Block],
        found: &HashMap<String, LinkMetadata>,
        enriched: &mut usize,
    ) -> Vec<Block> {
        blocks
            .iter()
            .map(|block| {
                let mut merged = match block {
                    Block::Bookmark(bookmark) if bookmark.has_raw_payload() => {
                        let url = bookmark.url();
                        let metadata = url
                            .and_then(|url| found.get(url))
                            .cloned()
                            .unwrap_or_default();
                        *enriched += 1;
                        Block::Bookmark(bookmark.enriched(metadata.project(url, self.fields)))
                    }
                    other => other.clone(),
                };
                if !block.children().is_empty() {
                    merged.set_children(self.merge(block.children(), found, enriched));
                }
                merged
            })
            .collect()
    }
}

/// URLs of raw bookmarks, depth-first.
fn collect_bookmark_links(blocks: &[Block], links: &mut Vec<String>) {
    for block in blocks {
        if let Block::Bookmark(bookmark) = block {
            if bookmark.has_raw_payload() {
                if let Some(url) = bookmark.url() {
                    links.push(url.to_string());
                }
            }
        }
        collect_bookmark_links(block.children(), links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookmarkBlock;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubSource {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl MetadataSource for StubSource {
        async fn link_metadata(&self, url: &ValidatedUrl) -> Result<LinkMetadata, AppError> {
            self.calls.lock().unwrap().push(url.to_string());
            Ok(LinkMetadata {
                title: Some(format!("Title of {}", url)),
                ..LinkMetadata::default()
            })
        }
    }

    fn bookmark(id: &str, url: &str) -> serde_json::Value {
        json!({
            "id": id,
            "type": "bookmark",
            "bookmark": { "caption": [], "url": url }
        })
    }

    fn as_bookmark(block: &Block) -> &BookmarkBlock {
        match block {
            Block::Bookmark(bookmark) => bookmark,
            other => panic!("expected a bookmark, got {}", other.block_type()),
        }
    }

    #[tokio::test]
    async fn enriches_nested_bookmarks_and_dedups_lookups() {
        let source = StubSource::default();
        let fields = MetadataFieldSet::default();
        let blocks: Vec<Block> = serde_json::from_value(json!([
            bookmark("a", "https://a.example/"),
            { "id": "cols", "type": "column_list", "blocks": [
                { "id": "col", "type": "column", "blocks": [
                    bookmark("b", "https://a.example/"),
                    bookmark("c", "")
                ]}
            ]}
        ]))
        .unwrap();

        let result = BookmarkEnricher::new(&source, &fields)
            .enrich(&blocks)
            .await
            .unwrap();

        assert_eq!(result.enriched, 3);
        assert_eq!(result.lookups, 1);
        assert_eq!(source.calls.lock().unwrap().len(), 1);

        let nested = &result.blocks[1].children()[0].children();
        let b = as_bookmark(&nested[0]);
        assert!(b.is_enriched());
        assert_eq!(
            b.metadata().unwrap()["title"],
            json!("Title of https://a.example/")
        );

        let c = as_bookmark(&nested[1]);
        assert!(c.is_enriched());
        assert_eq!(c.metadata().unwrap()["url"], json!(null));

        // Input untouched.
        assert!(as_bookmark(&blocks[0]).has_raw_payload());
    }

    #[tokio::test]
    async fn invalid_link_fails_the_whole_pass() {
        let source = StubSource::default();
        let fields = MetadataFieldSet::default();
        let blocks: Vec<Block> = serde_json::from_value(json!([
            bookmark("a", "https://a.example/"),
            bookmark("b", "mailto:someone@example.com")
        ]))
        .unwrap();

        let result = BookmarkEnricher::new(&source, &fields).enrich(&blocks).await;
        assert!(matches!(result, Err(AppError::Enrichment { .. })));
    }
}
