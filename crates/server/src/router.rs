use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/query-news", post(handlers::query_news))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
