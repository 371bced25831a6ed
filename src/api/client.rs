// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations without business logic.

use super::parser::{parse_blocks_pagination, parse_page_response};
use super::simple_pagination::fetch_all_pages_simple;
use crate::constants::{HTTP_TIMEOUT_SECS, NOTION_API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::model::JsonObject;
use crate::types::{ApiKey, PageId};
use reqwest::{header, Client, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client against a different API root (proxies, test servers).
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header)
            .map_err(|e| AppError::InvalidInput(format!("Invalid API token format: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `query` - Query string pairs
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;

        log::debug!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &PageId) -> Result<JsonObject, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parse_page_response(result)
    }

    async fn retrieve_children(&self, block_id: &str) -> Result<Vec<JsonObject>, AppError> {
        let endpoint = format!("blocks/{}/children", block_id);
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let response = self.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parse_blocks_pagination(result)
                }
            },
            None,
        )
        .await?;
        Ok(pagination_result.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
