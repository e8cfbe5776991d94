// This is the entry point of the announcement comment gateway.
//
// **Architecture Overview:**
// - `core/` = Business logic (transport-agnostic): the submission pipeline and its ports
// - `infra/` = Implementations of core traits (OpenAI moderation, comment stores)
// - `http/` = The callable HTTP endpoint
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Start the HTTP server

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "http/http_layer.rs"]
mod http;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::{GatewayConfig, StoreBackend};
use crate::core::comments::{CommentStore, SubmissionPipeline};
use crate::core::moderation::ModerationClient;
use crate::http::SharedPipeline;
use crate::infra::comments::{InMemoryCommentStore, SqliteCommentStore};
use crate::infra::moderation::OpenAiModerationClient;
use anyhow::Context;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = GatewayConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Both clients are created once per process and shared by every request.

    let moderation: Box<dyn ModerationClient> = Box::new(OpenAiModerationClient::with_base_url(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.moderation_model.clone(),
    ));

    let store: Box<dyn CommentStore> = match &config.store {
        StoreBackend::Sqlite { path } => {
            tracing::info!(path = %path, "Using SQLite comment store");
            Box::new(
                SqliteCommentStore::new(path)
                    .await
                    .context("Failed to initialize SQLite comment store")?,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory comment store; comments will not survive a restart");
            Box::new(InMemoryCommentStore::new())
        }
    };

    let pipeline: SharedPipeline = Arc::new(SubmissionPipeline::new(moderation, store));

    http::start_server(pipeline, config.port).await
}
