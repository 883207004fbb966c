//! Route table

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::middleware::logging::log_request;
use crate::protocol::handlers;
use crate::server::AppState;

/// Builds the router for every page and API endpoint.
pub fn build_router(state: AppState) -> Router {
    let files = Router::new()
        .route("/api/files/{scope}", get(handlers::list_files))
        .route(
            "/api/files/{scope}/{name}",
            put(handlers::upload_file)
                .get(handlers::download_file)
                .delete(handlers::delete_file),
        )
        // Uploads are bounded by the configured file size limit instead
        .layer(DefaultBodyLimit::disable());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::get_view))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .merge(files)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
