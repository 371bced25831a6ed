// src/api/mod.rs
//! Notion API interaction: the ability to retrieve a page from a workspace.
//!
//! This module keeps HTTP details (`client`), response parsing (`parser`)
//! and tree assembly (`fetcher`) apart, so the pipeline only ever sees the
//! [`NotionRepository`] trait.

pub mod client;
mod fetcher;
pub mod parser;
mod simple_pagination;
pub mod types;

use crate::error::AppError;
use crate::model::JsonObject;
use crate::types::PageId;

/// The ability to retrieve content from a Notion workspace.
///
/// Objects come back as raw JSON so that every field Notion returns ends up
/// in the exported file. Business logic depends on this trait, never on
/// HTTP details.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Retrieves the page object itself (properties, icon, cover, ...).
    async fn retrieve_page(&self, id: &PageId) -> Result<JsonObject, AppError>;

    /// Retrieves every direct child of a block or page, across all result pages.
    async fn retrieve_children(&self, block_id: &str) -> Result<Vec<JsonObject>, AppError>;
}

pub use client::NotionHttpClient;
pub use fetcher::{FetchResult, NotionFetcher};
pub use types::FetchMetadata;
