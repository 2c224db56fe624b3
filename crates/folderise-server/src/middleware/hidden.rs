//! Hide private entries from HTTP clients.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use folderise_storage::is_hidden_name;
use percent_encoding::percent_decode_str;

/// Whether any segment of a raw URL path is hidden or private.
fn is_hidden_url(path: &str) -> bool {
    path.split('/').any(|segment| {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        is_hidden_name(&decoded)
    })
}

/// Answer 404 for dot- and underscore-prefixed paths, including cache artifacts.
pub(crate) async fn reject_hidden(request: Request, next: Next) -> Response {
    if is_hidden_url(request.uri().path()) {
        tracing::debug!(path = %request.uri().path(), "Refusing hidden path");
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}
