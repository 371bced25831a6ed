//! Assembles a full page: the page object plus its block tree.
//!
//! Children are fetched depth-first, one listing at a time, and attached
//! under each block's `blocks` key. Child pages and child databases are
//! separate documents and are not descended into.

use super::types::FetchMetadata;
use super::NotionRepository;
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::{Block, BlockCommon, JsonObject, Page};
use crate::types::PageId;
use std::future::Future;
use std::pin::Pin;

/// Block types whose children belong to another document.
const SEPARATE_DOCUMENT_TYPES: &[&str] = &["child_page", "child_database"];

type BoxedFetch<'a> = Pin<Box<dyn Future<Output = Result<Vec<Block>, AppError>> + Send + 'a>>;

/// A fully fetched page with what it took to get it.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub page: Page,
    pub metadata: FetchMetadata,
}

/// Walks a page's block tree through a [`NotionRepository`].
pub struct NotionFetcher<'a> {
    repository: &'a dyn NotionRepository,
    max_depth: u8,
}

impl<'a> NotionFetcher<'a> {
    pub fn new(repository: &'a dyn NotionRepository) -> Self {
        Self {
            repository,
            max_depth: NOTION_MAX_FETCH_DEPTH,
        }
    }

    /// Caps how many levels below the page are fetched.
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth.min(NOTION_MAX_FETCH_DEPTH);
        self
    }

    /// Fetches the page object and its whole block tree.
    ///
    /// Any failed request aborts the fetch: a half-fetched page is not worth
    /// exporting.
    pub async fn fetch_full_page(&self, id: &PageId) -> Result<FetchResult, AppError> {
        let fields = self.repository.retrieve_page(id).await?;
        let root_id = fields
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| id.to_hyphenated());

        let mut metadata = FetchMetadata::default();
        let blocks = self.fetch_tree(root_id, 1, &mut metadata).await?;

        Ok(FetchResult {
            page: Page::new(fields, blocks),
            metadata,
        })
    }

    fn fetch_tree<'s>(
        &'s self,
        parent_id: String,
        depth: u8,
        metadata: &'s mut FetchMetadata,
    ) -> BoxedFetch<'s> {
        Box::pin(async move {
            let raw_children = self.repository.retrieve_children(&parent_id).await?;
            metadata.children_requests += 1;
            metadata.blocks_fetched += raw_children.len();
            metadata.max_depth_reached = metadata.max_depth_reached.max(depth);

            let mut blocks = Vec::with_capacity(raw_children.len());
            for fields in raw_children {
                blocks.push(self.assemble_block(fields, depth, metadata).await?);
            }
            Ok(blocks)
        })
    }

    async fn assemble_block(
        &self,
        fields: JsonObject,
        depth: u8,
        metadata: &mut FetchMetadata,
    ) -> Result<Block, AppError> {
        let common = BlockCommon::new(fields);
        let descend = common.has_children()
            && !common
                .type_tag()
                .is_some_and(|tag| SEPARATE_DOCUMENT_TYPES.contains(&tag));

        let Some(block_id) = common.id().filter(|_| descend).map(str::to_owned) else {
            return Ok(Block::from_common(common));
        };

        if depth >= self.max_depth {
            let warning = format!(
                "Maximum fetch depth ({}) reached at block {}; its children were skipped",
                self.max_depth, block_id
            );
            log::warn!("{}", warning);
            metadata.warnings.push(warning);
            return Ok(Block::from_common(common));
        }

        let children = self.fetch_tree(block_id, depth + 1, metadata).await?;
        Ok(Block::from_common(common.with_children(children)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct StaticRepository {
        children: HashMap<String, Vec<JsonObject>>,
    }

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[async_trait::async_trait]
    impl NotionRepository for StaticRepository {
        async fn retrieve_page(&self, _id: &PageId) -> Result<JsonObject, AppError> {
            Ok(object(json!({ "object": "page", "id": "root" })))
        }

        async fn retrieve_children(&self, block_id: &str) -> Result<Vec<JsonObject>, AppError> {
            self.children
                .get(block_id)
                .cloned()
                .ok_or_else(|| AppError::InvalidInput(format!("unexpected fetch of {}", block_id)))
        }
    }

    fn repository() -> StaticRepository {
        let mut children = HashMap::new();
        children.insert(
            "root".to_string(),
            vec![
                object(json!({ "id": "toggle", "type": "toggle", "has_children": true })),
                object(json!({ "id": "sub", "type": "child_page", "has_children": true })),
                object(json!({ "id": "para", "type": "paragraph", "has_children": false })),
            ],
        );
        children.insert(
            "toggle".to_string(),
            vec![object(
                json!({ "id": "img", "type": "image", "has_children": false }),
            )],
        );
        StaticRepository { children }
    }

    #[tokio::test]
    async fn assembles_nested_tree() {
        let repo = repository();
        let result = NotionFetcher::new(&repo)
            .fetch_full_page(&PageId::parse("abc123").unwrap())
            .await
            .unwrap();

        let page = result.page;
        assert_eq!(page.blocks.len(), 3);
        assert_eq!(page.blocks[0].children()[0].id(), Some("img"));
        assert!(matches!(page.blocks[0].children()[0], Block::Image(_)));
        // Child pages are separate documents.
        assert!(page.blocks[1].common().children.is_none());
        assert!(page.blocks[2].common().children.is_none());

        assert_eq!(result.metadata.children_requests, 2);
        assert_eq!(result.metadata.blocks_fetched, 4);
        assert_eq!(result.metadata.max_depth_reached, 2);
    }

    #[tokio::test]
    async fn depth_limit_skips_deeper_children() {
        let repo = repository();
        let result = NotionFetcher::new(&repo)
            .with_max_depth(1)
            .fetch_full_page(&PageId::parse("abc123").unwrap())
            .await
            .unwrap();

        assert!(result.page.blocks[0].common().children.is_none());
        assert_eq!(result.metadata.warnings.len(), 1);
    }

    #[tokio::test]
    async fn fetch_errors_abort() {
        let repo = StaticRepository {
            children: HashMap::new(),
        };
        let result = NotionFetcher::new(&repo)
            .fetch_full_page(&PageId::parse("abc123").unwrap())
            .await;
        assert!(result.is_err());
    }
}
