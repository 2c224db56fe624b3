//! Plugin middleman hooks.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use folderise_plugins::PluginRequest;
use percent_encoding::percent_decode_str;

use crate::state::AppState;

/// Run every plugin's middleman hook before a page request is handled.
///
/// Hook failures are logged by the registry and never block the request.
pub(crate) async fn run_middlemen(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let plugins = state.site.plugins();
    if plugins.is_empty() {
        return next.run(request).await;
    }

    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();
    let plugin_request = PluginRequest::new(request.method().as_str(), path);
    let adjustments = plugins.run_middlemen(&plugin_request).await;

    let mut response = next.run(request).await;
    for (name, value) in adjustments.headers() {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().append(name, value);
            }
            _ => tracing::warn!(header = %name, "Ignoring invalid plugin header"),
        }
    }
    response
}
