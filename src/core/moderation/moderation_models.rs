// Moderation domain models.
//
// These are pure domain types with no HTTP or provider dependencies.
// The infra layer converts provider responses into them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of classifying a single piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    /// Whether the classifier flagged the text
    pub flagged: bool,
    /// Opaque per-category metadata from the classifier. Never interpreted.
    #[serde(default)]
    pub categories: serde_json::Value,
}

#[allow(dead_code)]
impl ModerationVerdict {
    /// Create an "approved" verdict with no metadata
    pub fn approved() -> Self {
        Self {
            flagged: false,
            categories: serde_json::Value::Null,
        }
    }

    /// Create a "flagged" verdict with no metadata
    pub fn flagged() -> Self {
        Self {
            flagged: true,
            categories: serde_json::Value::Null,
        }
    }
}

/// Faults raised while talking to the classifier.
///
/// None of these mean "the content is fine"; every variant leaves the
/// verdict unknown.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Moderation request failed: {0}")]
    Http(String),

    #[error("Moderation API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Malformed moderation response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ModerationError {
    fn from(err: reqwest::Error) -> Self {
        ModerationError::Http(err.to_string())
    }
}
