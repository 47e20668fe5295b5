pub mod health;
pub mod page;
pub mod play_ws;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

/// All routes with shared state attached.
pub fn router(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health::health_check))
        .route("/ws", get(play_ws::ws_handler))
        .layer(Extension(config))
        .layer(cors)
}
