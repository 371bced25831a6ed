use super::ValidationError;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Canonical identifier of the page being exported.
///
/// Notion ids (32 hex characters, with or without dashes) are normalized to
/// lowercase without dashes. Other identifier-shaped tokens are kept as
/// given so that short ids still name the output files predictably.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(String);

impl PageId {
    /// Parses a bare id or a URL-like path ending in an id.
    ///
    /// Accepted shapes:
    /// - `550e8400e29b41d4a716446655440000`
    /// - `550e8400-e29b-41d4-a716-446655440000`
    /// - `https://www.notion.so/workspace/My-Page-550e8400e29b41d4a716446655440000?pvs=4`
    /// - `myblog/page-id-123` (resolves to `123`)
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        extract_page_id(input)
    }

    /// Returns the canonical id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a full 32-hex Notion id.
    pub fn is_notion_uuid(&self) -> bool {
        self.0.len() == 32 && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Returns the hyphenated UUID form for API calls, or the id unchanged
    /// when it is not a 32-hex Notion id.
    pub fn to_hyphenated(&self) -> String {
        match Uuid::try_parse(&self.0) {
            Ok(uuid) if self.is_notion_uuid() => uuid.hyphenated().to_string(),
            _ => self.0.clone(),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Extracts the page id from a bare id or a URL-like path.
pub fn extract_page_id(input: &str) -> Result<PageId, ValidationError> {
    lazy_static::lazy_static! {
        static ref NOTION_ID_SUFFIX: Regex = Regex::new(
            r"(?:^|-)([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})$"
        ).expect("Failed to compile Notion ID regex - this is a bug in the code");
    }

    let segment = last_path_segment(input);
    if segment.is_empty() {
        return Err(ValidationError::InvalidId(format!(
            "no page id found in '{}'",
            input
        )));
    }

    if let Some(id) = NOTION_ID_SUFFIX
        .captures(segment)
        .and_then(|captures| captures.get(1))
    {
        return Ok(PageId(id.as_str().replace('-', "").to_lowercase()));
    }

    // Short ids: the token after the last dash of a "title-id" slug.
    let token = segment.rsplit('-').next().unwrap_or_default();
    if !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Ok(PageId(token.to_string()));
    }

    Err(ValidationError::InvalidId(format!(
        "no page id found in '{}'",
        input
    )))
}

/// Returns the last `/`-separated segment with query, fragment and trailing
/// slashes removed.
fn last_path_segment(input: &str) -> &str {
    let trimmed = input.trim();
    let without_fragment = trimmed.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
