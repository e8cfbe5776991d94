// Comment submission pipeline - core business logic.
//
// Validate -> Moderate -> (Reject | Persist) -> Respond.
//
// Every exit is either a SubmissionResult or exactly one SubmissionError.
// Nothing is persisted unless moderation completed and approved this exact
// content. There are no retries and no cached verdicts.

use super::comment_models::{CommentRecord, SubmissionRequest, SubmissionResult};
use super::comment_store::CommentStore;
use crate::core::moderation::ModerationClient;
use std::fmt::Display;
use thiserror::Error;

pub const MISSING_PARAMETERS: &str = "Missing parameters.";
pub const OFFENSIVE_CONTENT: &str = "Comment contains offensive content.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

// ============================================================================
// ERRORS
// ============================================================================

/// The only errors a caller of `submit` can observe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Required input missing or empty. Detected before any external call.
    #[error("{0}")]
    InvalidArgument(String),

    /// Content failed moderation. A decision, not a fault.
    #[error("{0}")]
    PermissionDenied(String),

    /// A dependency failed. The cause is logged, never returned.
    #[error("{}", INTERNAL_ERROR)]
    Internal,
}

impl SubmissionError {
    /// Wire name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::InvalidArgument(_) => "invalid-argument",
            SubmissionError::PermissionDenied(_) => "permission-denied",
            SubmissionError::Internal => "internal",
        }
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct SubmissionPipeline<M: ModerationClient, S: CommentStore> {
    moderation: M,
    store: S,
}

impl<M: ModerationClient, S: CommentStore> SubmissionPipeline<M, S> {
    pub fn new(moderation: M, store: S) -> Self {
        Self { moderation, store }
    }

    /// Screen a comment and append it to the announcement thread if approved.
    ///
    /// # Errors
    /// * `InvalidArgument` - `announcement_id` or `content` is empty
    /// * `PermissionDenied` - the classifier flagged the content
    /// * `Internal` - the classifier or the store failed
    pub async fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionResult, SubmissionError> {
        validate(&request)?;

        let SubmissionRequest {
            announcement_id,
            content,
            is_anonymous,
        } = request;

        let verdict = self
            .moderation
            .classify(&content)
            .await
            .map_err(|e| internal("moderation", &announcement_id, e))?;

        tracing::debug!(
            announcement_id = %announcement_id,
            categories = %verdict.categories,
            "Moderation verdict received"
        );

        if verdict.flagged {
            tracing::info!(
                announcement_id = %announcement_id,
                content_len = content.len(),
                "Comment rejected by moderation"
            );
            return Err(SubmissionError::PermissionDenied(
                OFFENSIVE_CONTENT.to_string(),
            ));
        }

        let record = CommentRecord {
            content,
            is_anonymous,
        };
        let stored = self
            .store
            .append(&announcement_id, record)
            .await
            .map_err(|e| internal("store", &announcement_id, e))?;

        tracing::info!(
            announcement_id = %announcement_id,
            comment_id = %stored.id,
            created_at = %stored.created_at,
            "Comment accepted"
        );

        Ok(SubmissionResult::accepted(stored.id))
    }
}

fn validate(request: &SubmissionRequest) -> Result<(), SubmissionError> {
    if request.announcement_id.is_empty() || request.content.is_empty() {
        return Err(SubmissionError::InvalidArgument(
            MISSING_PARAMETERS.to_string(),
        ));
    }
    Ok(())
}

/// Single normalization point for dependency faults.
fn internal(stage: &str, announcement_id: &str, cause: impl Display) -> SubmissionError {
    tracing::error!(
        stage,
        announcement_id,
        error = %cause,
        "Comment submission failed"
    );
    SubmissionError::Internal
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comments::{StoreError, StoredComment};
    use crate::core::moderation::{ModerationError, ModerationVerdict};
    use async_trait::async_trait;
    use chrono::Utc;
    use dashmap::DashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Copy)]
    enum Outcome {
        Approve,
        Flag,
        Fail,
    }

    /// Classifier mock that counts calls and records what it saw
    struct MockModeration {
        outcome: Outcome,
        calls: AtomicUsize,
        seen: DashMap<usize, String>,
    }

    impl MockModeration {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
                seen: DashMap::new(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModerationClient for MockModeration {
        async fn classify(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.insert(n, text.to_string());
            match self.outcome {
                Outcome::Approve => Ok(ModerationVerdict::approved()),
                Outcome::Flag => Ok(ModerationVerdict::flagged()),
                Outcome::Fail => Err(ModerationError::Http("connection refused".to_string())),
            }
        }
    }

    /// In-memory store mock handing out ids "c{n}"
    struct MockCommentStore {
        fail: bool,
        next_id: AtomicUsize,
        calls: AtomicUsize,
        appended: DashMap<String, (String, CommentRecord)>,
    }

    impl MockCommentStore {
        fn starting_at(first_id: usize) -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                next_id: AtomicUsize::new(first_id),
                calls: AtomicUsize::new(0),
                appended: DashMap::new(),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                next_id: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
                appended: DashMap::new(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommentStore for MockCommentStore {
        async fn append(
            &self,
            announcement_id: &str,
            record: CommentRecord,
        ) -> Result<StoredComment, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::StorageError("disk full".to_string()));
            }
            let id = format!("c{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            self.appended
                .insert(id.clone(), (announcement_id.to_string(), record));
            Ok(StoredComment {
                id,
                created_at: Utc::now(),
            })
        }
    }

    fn request(announcement_id: &str, content: &str, is_anonymous: bool) -> SubmissionRequest {
        SubmissionRequest {
            announcement_id: announcement_id.to_string(),
            content: content.to_string(),
            is_anonymous,
        }
    }

    #[tokio::test]
    async fn test_approved_comment_is_persisted() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::starting_at(9);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let result = pipeline.submit(request("a1", "hello", false)).await.unwrap();

        assert_eq!(result, SubmissionResult::accepted("c9".to_string()));
        assert!(result.success);
        assert_eq!(moderation.calls(), 1);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_store_receives_content_and_flag_unmodified() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let content = "  Looking forward to it!  ";
        let result = pipeline.submit(request("a7", content, true)).await.unwrap();

        let entry = store.appended.get(&result.comment_id).unwrap();
        let (announcement_id, record) = entry.value();
        assert_eq!(announcement_id, "a7");
        assert_eq!(record.content, content);
        assert!(record.is_anonymous);
        // Moderation saw the exact same text
        assert_eq!(moderation.seen.get(&0).unwrap().value(), content);
    }

    #[tokio::test]
    async fn test_empty_content_is_invalid_without_side_effects() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let err = pipeline.submit(request("a1", "", false)).await.unwrap_err();

        assert_eq!(
            err,
            SubmissionError::InvalidArgument(MISSING_PARAMETERS.to_string())
        );
        assert_eq!(err.kind(), "invalid-argument");
        assert_eq!(moderation.calls(), 0);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_announcement_id_is_invalid_without_side_effects() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        for req in [request("", "hello", false), request("", "", true)] {
            let err = pipeline.submit(req).await.unwrap_err();
            assert!(matches!(err, SubmissionError::InvalidArgument(_)));
        }

        assert_eq!(moderation.calls(), 0);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_content_counts_as_present() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let result = pipeline.submit(request("a1", "   ", false)).await;

        assert!(result.is_ok());
        assert_eq!(moderation.calls(), 1);
    }

    #[tokio::test]
    async fn test_flagged_comment_is_denied_and_not_stored() {
        let moderation = MockModeration::new(Outcome::Flag);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let err = pipeline
            .submit(request("a1", "something nasty", false))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::PermissionDenied(OFFENSIVE_CONTENT.to_string())
        );
        assert_eq!(err.kind(), "permission-denied");
        assert_eq!(moderation.calls(), 1);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_moderation_failure_fails_closed() {
        let moderation = MockModeration::new(Outcome::Fail);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let err = pipeline.submit(request("a1", "hello", false)).await.unwrap_err();

        assert_eq!(err, SubmissionError::Internal);
        assert_eq!(err.kind(), "internal");
        assert_eq!(moderation.calls(), 1);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_and_not_retried() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::failing();
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let err = pipeline.submit(request("a1", "hello", false)).await.unwrap_err();

        assert_eq!(err, SubmissionError::Internal);
        assert_eq!(moderation.calls(), 1);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let moderation = MockModeration::new(Outcome::Fail);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation, store);

        let err = pipeline.submit(request("a1", "hello", false)).await.unwrap_err();

        assert_eq!(err.to_string(), INTERNAL_ERROR);
        assert!(!err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_same_content_twice_appends_twice() {
        let moderation = MockModeration::new(Outcome::Approve);
        let store = MockCommentStore::starting_at(1);
        let pipeline = SubmissionPipeline::new(moderation.clone(), store.clone());

        let first = pipeline.submit(request("a1", "same", false)).await.unwrap();
        let second = pipeline.submit(request("a1", "same", false)).await.unwrap();

        assert_ne!(first.comment_id, second.comment_id);
        assert_eq!(moderation.calls(), 2);
        assert_eq!(store.calls(), 2);
        assert_eq!(store.appended.len(), 2);
    }

    #[tokio::test]
    async fn test_boxed_dependencies() {
        let moderation: Box<dyn ModerationClient> = Box::new(MockModeration::new(Outcome::Approve));
        let store: Box<dyn CommentStore> = Box::new(MockCommentStore::starting_at(3));
        let pipeline = SubmissionPipeline::new(moderation, store);

        let result = pipeline.submit(request("a1", "hi", false)).await.unwrap();

        assert_eq!(result.comment_id, "c3");
    }
}
