//! Reads link-preview metadata out of an HTML document.
//!
//! Only the document head matters here, so a handful of tolerant regexes
//! over `<title>`, `<meta>` and `<link>` tags is enough. Open Graph values
//! win over Twitter card values, which win over plain HTML ones.

use super::LinkMetadata;
use crate::types::ValidatedUrl;
use regex::Regex;
use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref TITLE_TAG: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>")
        .expect("Failed to compile title regex - this is a bug in the code");
    static ref META_TAG: Regex = Regex::new(r"(?is)<meta\b[^>]*>")
        .expect("Failed to compile meta regex - this is a bug in the code");
    static ref LINK_TAG: Regex = Regex::new(r"(?is)<link\b[^>]*>")
        .expect("Failed to compile link regex - this is a bug in the code");
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"(?s)([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#
    )
    .expect("Failed to compile attribute regex - this is a bug in the code");
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));")
        .expect("Failed to compile entity regex - this is a bug in the code");
    static ref WHITESPACE: Regex = Regex::new(r"\s+")
        .expect("Failed to compile whitespace regex - this is a bug in the code");
}

const TITLE_KEYS: &[&str] = &["og:title", "twitter:title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];
const IMAGE_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "og:image:secure_url",
    "twitter:image",
    "twitter:image:src",
];

/// Extracts title, description, favicon and preview image from `html`.
///
/// Relative favicon and image references are resolved against `page_url`.
/// When the page declares no icon, `<origin>/favicon.ico` is assumed.
pub fn parse_link_metadata(html: &str, page_url: &ValidatedUrl) -> LinkMetadata {
    let meta = meta_contents(html);
    let lookup = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| meta.get(*key))
            .map(|value| clean_text(value))
            .filter(|value| !value.is_empty())
    };

    let title = lookup(TITLE_KEYS).or_else(|| {
        TITLE_TAG
            .captures(html)
            .and_then(|captures| captures.get(1))
            .map(|title| clean_text(title.as_str()))
            .filter(|title| !title.is_empty())
    });

    let image = lookup(IMAGE_KEYS)
        .and_then(|image| page_url.join(&image))
        .map(|url| url.to_string());

    let favicon = favicon_href(html)
        .and_then(|href| page_url.join(&href))
        .or_else(|| page_url.join("/favicon.ico"))
        .map(|url| url.to_string());

    LinkMetadata {
        title,
        description: lookup(DESCRIPTION_KEYS),
        favicon,
        image,
    }
}

/// Maps lowercased `property`/`name` of every `<meta>` tag to its `content`.
/// The first tag for a key wins.
fn meta_contents(html: &str) -> HashMap<String, String> {
    let mut contents = HashMap::new();
    for tag in META_TAG.find_iter(html) {
        let attributes = attributes(tag.as_str());
        let key = attributes
            .get("property")
            .or_else(|| attributes.get("name"))
            .map(|key| key.trim().to_ascii_lowercase());
        if let (Some(key), Some(content)) = (key, attributes.get("content")) {
            contents.entry(key).or_insert_with(|| content.clone());
        }
    }
    contents
}

/// The best icon declared by `<link rel=...>`: a plain `icon` beats
/// `apple-touch-icon` and friends.
fn favicon_href(html: &str) -> Option<String> {
    let mut fallback = None;
    for tag in LINK_TAG.find_iter(html) {
        let attributes = attributes(tag.as_str());
        let (Some(rel), Some(href)) = (attributes.get("rel"), attributes.get("href")) else {
            continue;
        };
        let href = decode_entities(href.trim());
        if href.is_empty() {
            continue;
        }
        let rel = rel.to_ascii_lowercase();
        let rels: Vec<&str> = rel.split_whitespace().collect();
        if rels.contains(&"icon") {
            return Some(href);
        }
        if fallback.is_none() && rels.iter().any(|r| r.ends_with("icon")) {
            fallback = Some(href);
        }
    }
    fallback
}

/// Attribute names (lowercased) to raw values of a single tag.
fn attributes(tag: &str) -> HashMap<String, String> {
    ATTRIBUTE
        .captures_iter(tag)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str().to_ascii_lowercase();
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))?
                .as_str()
                .to_string();
            Some((name, value))
        })
        .collect()
}

/// Decodes entities and collapses whitespace.
fn clean_text(raw: &str) -> String {
    let decoded = decode_entities(raw);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(raw: &str) -> String {
    let numeric = NUMERIC_ENTITY.replace_all(raw, |captures: &regex::Captures| {
        let code = match (captures.get(1), captures.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| captures[0].to_string())
    });

    numeric
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
