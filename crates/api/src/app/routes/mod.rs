use axum::{routing::get, Router};

pub mod comments;
pub mod frontend;
pub mod system;
pub mod todos;

/// Router for the full API surface plus the embedded frontend.
pub fn router() -> Router {
    Router::new()
        .route("/", get(frontend::index))
        .route("/health", get(system::health))
        .nest("/todos", todos::router())
}
