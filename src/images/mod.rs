//! Image materialization: download every image a page references and point
//! its blocks at the local copies.

mod materializer;

pub use materializer::{FailedImage, ImageMaterializer, MaterializeReport};

use crate::error::AppError;
use crate::types::ValidatedUrl;
use crate::web::{FetchedAsset, WebClient};

/// The ability to download an image.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &ValidatedUrl) -> Result<FetchedAsset, AppError>;
}

#[async_trait::async_trait]
impl AssetFetcher for WebClient {
    async fn fetch(&self, url: &ValidatedUrl) -> Result<FetchedAsset, AppError> {
        self.get(url).await.map_err(|e| AppError::ImageDownload {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Extensions an image file is saved with as-is.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "avif", "bmp", "tif", "tiff", "ico", "heic",
];

/// Whether `ext` (lowercase) names an image format.
pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

/// Maps an image media type to a file extension.
pub fn extension_for_media_type(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        "image/avif" => Some("avif"),
        "image/bmp" => Some("bmp"),
        "image/tiff" => Some("tiff"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        _ => None,
    }
}
