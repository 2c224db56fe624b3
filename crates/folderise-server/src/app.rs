//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::middleware::{hidden, middleman, security};
use crate::state::AppState;

/// Create the application router.
///
/// Regular files under the served folder are returned as static assets.
/// Every other path is handed to the folder page handler, behind the plugin
/// middleman hooks.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let pages = Router::new()
        .route("/", get(handlers::pages::get_page))
        .route("/{*path}", get(handlers::pages::get_page))
        .layer(from_fn_with_state(
            Arc::clone(&state),
            middleman::run_middlemen,
        ))
        .with_state(Arc::clone(&state));

    let files = ServeDir::new(state.site.root())
        .append_index_html_on_directories(false)
        .fallback(pages);

    Router::new().fallback_service(files).layer(
        security::security_headers().layer(from_fn(hidden::reject_hidden)),
    )
}
