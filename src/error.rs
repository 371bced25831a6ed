// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names what went wrong and where. Some failures end the run
//! (bad input, a page that cannot be fetched, a file that cannot be
//! written); others are recovered by the pipeline and only logged
//! (bookmark enrichment, a single image download).

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the domain vocabulary is encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// A hint shown to the user alongside the raw API message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ObjectNotFound => {
                Some("check the page id and that the page is shared with your integration")
            }
            Self::Unauthorized => Some("check the --auth token"),
            Self::RestrictedResource => Some("the integration lacks access to this page"),
            _ => None,
        }
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionApi {
        code: NotionErrorCode,
        message: String,
        status: u16,
        request_id: Option<String>,
    },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Failed to fetch bookmark metadata for {url}: {message}")]
    Enrichment { url: String, message: String },

    #[error("Failed to download image {url}: {message}")]
    ImageDownload { url: String, message: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize page data: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Whether this error happened before any network call was made.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_unknown_codes() {
        assert_eq!(
            NotionErrorCode::from_api_response("object_not_found"),
            NotionErrorCode::ObjectNotFound
        );
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
        assert_eq!(NotionErrorCode::from_http_status(502).to_string(), "http_502");
    }

    #[test]
    fn input_errors_are_the_pre_network_ones() {
        assert!(AppError::InvalidInput("bad".into()).is_input_error());
        assert!(AppError::Validation(crate::types::ValidationError::EmptyField("page")).is_input_error());
        assert!(!AppError::ImageDownload {
            url: "https://example.com/a.png".into(),
            message: "HTTP 404".into(),
        }
        .is_input_error());
    }

    #[test]
    fn api_error_message_includes_code() {
        let err = AppError::NotionApi {
            code: NotionErrorCode::Unauthorized,
            message: "API token is invalid.".into(),
            status: 401,
            request_id: None,
        };
        assert_eq!(
            err.to_string(),
            "Notion API returned an error (unauthorized): API token is invalid."
        );
    }
}
