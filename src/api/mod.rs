mod handlers;
pub mod models;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::AppState;

pub use handlers::{chat, not_found, preflight};

pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.allowed_origin);
    Router::new()
        .route("/api/chat", post(chat).options(preflight))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!(origin, "invalid ALLOWED_ORIGIN value, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}
