use super::comment_models::{CommentRecord, StoredComment};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Append-only persistence for announcement comments.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Append `record` under `announcement_id`.
    ///
    /// The store generates the comment id and stamps `created_at` at write time.
    async fn append(
        &self,
        announcement_id: &str,
        record: CommentRecord,
    ) -> Result<StoredComment, StoreError>;
}

#[async_trait]
impl CommentStore for Box<dyn CommentStore> {
    async fn append(
        &self,
        announcement_id: &str,
        record: CommentRecord,
    ) -> Result<StoredComment, StoreError> {
        (**self).append(announcement_id, record).await
    }
}

#[async_trait]
impl<T: CommentStore + ?Sized> CommentStore for Arc<T> {
    async fn append(
        &self,
        announcement_id: &str,
        record: CommentRecord,
    ) -> Result<StoredComment, StoreError> {
        (**self).append(announcement_id, record).await
    }
}
