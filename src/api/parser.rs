// src/api/parser.rs
//! Turns raw Notion HTTP responses into values or typed errors.
//!
//! Success bodies are kept as raw JSON; error bodies are read with
//! notion-client's error object so the API's error code survives.

use super::client::ApiResponse;
use super::types::BlockChildrenResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::JsonObject;
use notion_client::objects::error::Error as NotionError;
use reqwest::StatusCode;

/// Parse any Notion API response body into `T`, or the error it describes.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse {
            url: url.to_string(),
            message: format!("{} (body: {})", e, preview(body)),
        }
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return AppError::NotionApi {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status: status.as_u16(),
            request_id: notion_error.request_id,
        };
    }

    // Fallback to generic error with HTTP status code
    AppError::NotionApi {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status: status.as_u16(),
        request_id: None,
    }
}

/// Parse a page object (`GET /pages/{id}`).
pub fn parse_page_response(result: ApiResponse<String>) -> Result<JsonObject, AppError> {
    parse_api_response(result)
}

/// Parse one page of block children (`GET /blocks/{id}/children`).
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<BlockChildrenResponse, AppError> {
    parse_api_response(result)
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
