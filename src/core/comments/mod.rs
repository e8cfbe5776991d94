// Core comments module - the moderation-gated submission pipeline.
// Following the same layout as the moderation module.

pub mod comment_models;
pub mod comment_store;
pub mod submission_service;

pub use comment_models::*;
pub use comment_store::*;
pub use submission_service::*;
