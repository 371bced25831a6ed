// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these constants should tell you how the exporter talks to Notion, where
//! it writes by default, and which bookmark fields it knows about.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking block children.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum nesting depth when recursively fetching block children.
///
/// Notion blocks can nest arbitrarily deep (toggles within columns within
/// toggles). 50 levels is far deeper than any real page.
pub const NOTION_MAX_FETCH_DEPTH: u8 = 50;

/// Notion API version header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Request timeout applied to every outbound HTTP call.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent for image and bookmark requests. Some sites refuse requests
/// without one.
pub const HTTP_USER_AGENT: &str = concat!("npresso/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// Directory (relative to the working directory) for page JSON files.
pub const DEFAULT_OUTPUT_DIR: &str = "notion-data";

/// Directory (relative to the working directory) for downloaded images.
pub const DEFAULT_IMAGE_OUT_DIR: &str = "public/notion-data";

// ---------------------------------------------------------------------------
// Bookmark metadata
// ---------------------------------------------------------------------------

/// Fields kept on an enriched bookmark when `--fields` is not given.
pub const DEFAULT_METADATA_FIELDS: [&str; 5] = ["title", "url", "description", "favicon", "image"];

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
