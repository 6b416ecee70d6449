use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::MySqlPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::mail::Mailer;

pub mod contact;
pub mod extractors;

/// Shared application state
///
/// The pool is the only long-lived shared resource; it is constructed once
/// at startup and injected here rather than held as a global.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/contact", post(contact::submit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
