// Core moderation module - the classifier port and its verdict type.
// Implementations live in infra/moderation.

pub mod moderation_client;
pub mod moderation_models;

pub use moderation_client::*;
pub use moderation_models::*;
