// Comment domain models.
//
// Field names on the wire follow the callable payload (`announcementId`,
// `isAnonymous`, `commentId`), so serde renames to camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed comment for an announcement thread. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub announcement_id: String,
    pub content: String,
    pub is_anonymous: bool,
}

/// What the pipeline hands to the store once moderation has approved.
///
/// No id or timestamp here: the store assigns both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub content: String,
    pub is_anonymous: bool,
}

/// Store-assigned identity of an appended comment.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredComment {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Returned to the caller when a comment was accepted and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    pub comment_id: String,
}

impl SubmissionResult {
    pub fn accepted(comment_id: String) -> Self {
        Self {
            success: true,
            comment_id,
        }
    }
}
