use super::callable::{parse_request, success_response, CallableError};
use crate::core::comments::{CommentStore, SubmissionPipeline};
use crate::core::moderation::ModerationClient;
use axum::{
    body::Bytes,
    http::{header::AUTHORIZATION, HeaderMap, Method},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// The pipeline as shared by every request handler.
pub type SharedPipeline =
    Arc<SubmissionPipeline<Box<dyn ModerationClient>, Box<dyn CommentStore>>>;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "announcement-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `moderateAndAddComment` callable.
async fn moderate_and_add_comment(
    Extension(pipeline): Extension<SharedPipeline>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    // Caller identity is the transport's concern; it is only noted here.
    tracing::debug!(
        authenticated = headers.contains_key(AUTHORIZATION),
        "moderateAndAddComment invoked"
    );

    match pipeline.submit(request).await {
        Ok(result) => success_response(result),
        Err(err) => {
            tracing::info!(kind = err.kind(), "moderateAndAddComment failed");
            CallableError::from(err).into_response()
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(pipeline: SharedPipeline) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/moderateAndAddComment", post(moderate_and_add_comment))
        .layer(Extension(pipeline))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(pipeline: SharedPipeline, port: u16) -> anyhow::Result<()> {
    let app = create_router(pipeline);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("HTTP server listening on http://{addr}");
    tracing::info!("Callable endpoint: POST http://{addr}/moderateAndAddComment");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
