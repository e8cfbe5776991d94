use super::moderation_models::{ModerationError, ModerationVerdict};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ModerationClient: Send + Sync {
    /// Classifies `text` with the external moderation service.
    ///
    /// A single attempt is made; callers decide what a failure means.
    async fn classify(&self, text: &str) -> Result<ModerationVerdict, ModerationError>;
}

// Lets the composition root pick a classifier backend at runtime.
#[async_trait]
impl ModerationClient for Box<dyn ModerationClient> {
    async fn classify(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        (**self).classify(text).await
    }
}

#[async_trait]
impl<T: ModerationClient + ?Sized> ModerationClient for Arc<T> {
    async fn classify(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        (**self).classify(text).await
    }
}
