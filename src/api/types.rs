// src/api/types.rs
//! Type definitions for the Notion API module.

use crate::model::JsonObject;
use serde::Deserialize;

/// One page of a paginated Notion list response.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Block children as returned by `GET /blocks/{id}/children`, kept as raw
/// JSON so that every field survives into the exported file.
pub type BlockChildrenResponse = PaginatedResponse<JsonObject>;

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Counters collected while assembling a full page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchMetadata {
    /// Number of `blocks/{id}/children` listings requested.
    pub children_requests: usize,
    /// Number of blocks retrieved.
    pub blocks_fetched: usize,
    /// Deepest nesting level that was fetched.
    pub max_depth_reached: u8,
    /// Non-fatal issues met along the way.
    pub warnings: Vec<String>,
}
