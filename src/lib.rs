// src/lib.rs
//! npresso library: exports a Notion page as JSON for static-site generators.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ExportConfig`
//! - **Domain model**: `Page`, `Block`, `ImageBlock`, `BookmarkBlock`
//! - **Domain types**: `PageId`, `ApiKey`, `ValidatedUrl`, `MetadataFieldSet`
//! - **Remote access**: `NotionRepository`, `AssetFetcher`, `MetadataSource`
//! - **Pipeline**: `PageExporter`, `ExportReport`

pub mod api;
pub mod bookmarks;
pub mod config;
pub mod constants;
pub mod error;
pub mod images;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;
pub mod web;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, BookmarkBlock, ImageBlock, JsonObject, OpaqueBlock, Page, TreeStats,
};

// --- Domain Types ---
pub use crate::types::{
    extract_page_id, ApiKey, MetadataField, MetadataFieldSet, PageId, ValidatedUrl,
};

// --- Remote Access ---
pub use crate::api::{FetchMetadata, FetchResult, NotionFetcher, NotionHttpClient, NotionRepository};
pub use crate::bookmarks::{BookmarkEnricher, EnrichmentResult, LinkMetadata, MetadataSource};
pub use crate::images::{AssetFetcher, FailedImage, ImageMaterializer, MaterializeReport};
pub use crate::web::{FetchedAsset, WebClient};

// --- Pipeline ---
pub use crate::pipeline::{BookmarkOutcome, ExportReport, PageExporter};
