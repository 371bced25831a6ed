// src/web.rs
//! Plain HTTP access to the open web: image downloads and bookmark pages.
//!
//! Unlike [`crate::api::NotionHttpClient`] this client carries no Notion
//! credentials. Notion-hosted files are pre-signed URLs and must be fetched
//! without an `Authorization` header.

use crate::constants::{HTTP_TIMEOUT_SECS, HTTP_USER_AGENT};
use crate::error::AppError;
use crate::types::ValidatedUrl;
use reqwest::{header, Client};
use std::time::Duration;

/// Bytes of a downloaded resource and the type the server reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedAsset {
    /// The media type without parameters, lowercased (`image/png`).
    pub fn media_type(&self) -> Option<String> {
        let raw = self.content_type.as_deref()?;
        let media = raw.split(';').next()?.trim().to_ascii_lowercase();
        (!media.is_empty()).then_some(media)
    }
}

/// Shared client for unauthenticated GET requests.
#[derive(Clone)]
pub struct WebClient {
    client: Client,
}

impl WebClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url`, failing on any non-success status.
    pub async fn get(&self, url: &ValidatedUrl) -> Result<FetchedAsset, AppError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url.as_str()).send().await?;
        let response = response.error_for_status()?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?.to_vec();

        log::debug!("GET {} -> {} bytes", url, bytes.len());
        Ok(FetchedAsset {
            bytes,
            content_type,
        })
    }

    /// GETs `url` and decodes the body as (lossy) UTF-8 text.
    pub async fn get_text(&self, url: &ValidatedUrl) -> Result<String, AppError> {
        let asset = self.get(url).await?;
        Ok(String::from_utf8_lossy(&asset.bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_strips_parameters() {
        let asset = FetchedAsset {
            bytes: Vec::new(),
            content_type: Some("Image/JPEG; charset=binary".to_string()),
        };
        assert_eq!(asset.media_type().as_deref(), Some("image/jpeg"));

        let asset = FetchedAsset {
            bytes: Vec::new(),
            content_type: None,
        };
        assert_eq!(asset.media_type(), None);
    }
}
