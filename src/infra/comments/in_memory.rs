// In-memory CommentStore.
//
// Used for local development (`COMMENT_STORE=memory`) and transport tests.
// Nothing survives a restart.

use super::comment_ids::generate_comment_id;
use crate::core::comments::{CommentRecord, CommentStore, StoreError, StoredComment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// A comment as held by the in-memory store.
#[allow(dead_code)]
#[derive(Clone, Debug)]
pub struct MemoryComment {
    pub id: String,
    pub content: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Maps announcement_id -> comments in append order.
pub struct InMemoryCommentStore {
    threads: DashMap<String, Vec<MemoryComment>>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self {
            threads: DashMap::new(),
        }
    }

    /// Snapshot of one announcement's comments.
    #[allow(dead_code)]
    pub fn comments_for(&self, announcement_id: &str) -> Vec<MemoryComment> {
        self.threads
            .get(announcement_id)
            .map(|thread| thread.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn append(
        &self,
        announcement_id: &str,
        record: CommentRecord,
    ) -> Result<StoredComment, StoreError> {
        let comment = MemoryComment {
            id: generate_comment_id(),
            content: record.content,
            is_anonymous: record.is_anonymous,
            created_at: Utc::now(),
        };
        let stored = StoredComment {
            id: comment.id.clone(),
            created_at: comment.created_at,
        };

        // entry() holds the shard lock, so each append is atomic
        self.threads
            .entry(announcement_id.to_string())
            .or_default()
            .push(comment);

        Ok(stored)
    }
}
