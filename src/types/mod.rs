use thiserror::Error;

mod domain_types;
mod fields;
mod ids;

pub use domain_types::*;
pub use fields::*;
pub use ids::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid page id: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Unknown bookmark metadata field '{name}' (expected one of: {expected})")]
    UnknownMetadataField { name: String, expected: String },

    #[error("Malformed block: {0}")]
    MalformedBlock(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),
}
