//! The set of bookmark metadata fields kept on an enriched bookmark.

use super::ValidationError;
use crate::constants::DEFAULT_METADATA_FIELDS;
use indexmap::IndexSet;
use std::fmt;
use std::str::FromStr;

/// A piece of metadata that can be derived for a bookmarked link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Title,
    Url,
    Description,
    Favicon,
    Image,
}

impl MetadataField {
    pub const ALL: [MetadataField; 5] = [
        MetadataField::Title,
        MetadataField::Url,
        MetadataField::Description,
        MetadataField::Favicon,
        MetadataField::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Url => "url",
            Self::Description => "description",
            Self::Favicon => "favicon",
            Self::Image => "image",
        }
    }
}

impl FromStr for MetadataField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownMetadataField {
                name: s.trim().to_string(),
                expected: DEFAULT_METADATA_FIELDS.join(", "),
            })
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of metadata fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFieldSet(IndexSet<MetadataField>);

impl MetadataFieldSet {
    /// Parses a comma separated list such as `"title,url"`.
    ///
    /// Blank entries are skipped and repeats collapse onto their first
    /// occurrence. An empty result is rejected.
    pub fn parse(list: &str) -> Result<Self, ValidationError> {
        let fields = list
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(MetadataField::from_str)
            .collect::<Result<IndexSet<_>, _>>()?;

        if fields.is_empty() {
            return Err(ValidationError::EmptyField("fields"));
        }
        Ok(Self(fields))
    }

    pub fn iter(&self) -> impl Iterator<Item = MetadataField> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, field: MetadataField) -> bool {
        self.0.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MetadataFieldSet {
    fn default() -> Self {
        Self(MetadataField::ALL.into_iter().collect())
    }
}

impl FromIterator<MetadataField> for MetadataFieldSet {
    fn from_iter<I: IntoIterator<Item = MetadataField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MetadataFieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|field| field.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_fields() {
        let names: Vec<&str> = MetadataFieldSet::default()
            .iter()
            .map(|f| f.as_str())
            .collect();
        assert_eq!(names, DEFAULT_METADATA_FIELDS);
    }

    #[test]
    fn parse_trims_and_dedups() {
        let set = MetadataFieldSet::parse(" url, Title ,,url").unwrap();
        assert_eq!(set.to_string(), "url,title");
        assert!(set.contains(MetadataField::Title));
        assert!(!set.contains(MetadataField::Image));
    }

    #[test]
    fn parse_rejects_unknown_and_empty() {
        assert!(matches!(
            MetadataFieldSet::parse("title,author"),
            Err(ValidationError::UnknownMetadataField { name, .. }) if name == "author"
        ));
        assert_eq!(
            MetadataFieldSet::parse(" , "),
            Err(ValidationError::EmptyField("fields"))
        );
    }
}
