pub mod documents;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate-pdf", post(documents::handle_generate_pdf))
        .route("/api/export/:format", post(documents::handle_export))
        .route("/api/preview", post(documents::handle_preview))
        .route("/api/layout", post(documents::handle_layout))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    match static_dir {
        // Unknown paths get the client's index.html so its own router can take over.
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router,
    }
}
