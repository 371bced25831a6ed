// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// API key for Notion API authentication
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if key.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible = self.0.char_indices().nth(8).map_or(self.0.len(), |(i, _)| i);
        write!(f, "{}...", &self.0[..visible])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// An absolute http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url.trim()) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Resolves a possibly relative reference (`/favicon.ico`,
    /// `//cdn.example.com/a.png`) against this URL.
    pub fn join(&self, reference: &str) -> Option<ValidatedUrl> {
        let joined = self.0.join(reference.trim()).ok()?;
        Self::parse(joined.as_str()).ok()
    }

    /// The lowercased extension of the last path segment, if it looks like one.
    pub fn path_extension(&self) -> Option<String> {
        let file_name = self.0.path_segments()?.next_back()?;
        let (_, ext) = file_name.rsplit_once('.')?;
        let valid = !ext.is_empty()
            && ext.len() <= 5
            && ext.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then(|| ext.to_ascii_lowercase())
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_accepts_any_non_blank_token() {
        assert!(ApiKey::new("secret_abcdefghijklmnop").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnop").is_ok());
        assert!(ApiKey::new("token_abcdefghijklmnop").is_ok());
        assert!(ApiKey::new("my-oauth-access-token-123").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("secret_abc def").is_err());
    }

    #[test]
    fn api_key_display_is_redacted() {
        let key = ApiKey::new("secret_abcdefghijklmnop").unwrap();
        assert_eq!(key.to_string(), "secret_a...");
        assert!(!format!("{:?}", key).contains("ijklmnop"));
    }

    #[test]
    fn url_helpers() {
        let url = ValidatedUrl::parse("https://example.com/a/b/photo.JPG?x=1").unwrap();
        assert_eq!(url.path_extension().as_deref(), Some("jpg"));
        assert_eq!(
            url.join("/favicon.ico").unwrap().as_str(),
            "https://example.com/favicon.ico"
        );

        let url = ValidatedUrl::parse("https://example.com/download").unwrap();
        assert_eq!(url.path_extension(), None);

        assert!(ValidatedUrl::parse("public/notion-data/abc/img.png").is_err());
        assert!(ValidatedUrl::parse("ftp://example.com/a.png").is_err());
    }
}
