//! Folder page endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use folderise_site::RenderError;
use percent_encoding::percent_decode_str;

use crate::state::AppState;

/// Decode a raw URL path into the folder path handed to the site.
fn decode_path(raw: &str) -> Result<String, RenderError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| RenderError::InvalidPath(raw.to_owned()))
}

/// HTTP status for a failed page.
fn status_for(error: &RenderError) -> StatusCode {
    match error {
        RenderError::NotFound(_) | RenderError::NotADirectory(_) => StatusCode::NOT_FOUND,
        RenderError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The error text is the response body.
fn error_response(error: &RenderError) -> Response {
    (
        status_for(error),
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        error.to_string(),
    )
        .into_response()
}

/// Handle GET for any folder.
pub(crate) async fn get_page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = match decode_path(uri.path()) {
        Ok(path) => path,
        Err(e) => return error_response(&e),
    };

    match state.site.serve(&path).await {
        Ok(page) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            page.html,
        )
            .into_response(),
        Err(e) => {
            if e.is_not_found() {
                tracing::debug!(path = %path, error = %e, "Page not found");
            } else {
                tracing::warn!(path = %path, error = %e, "Page render failed");
            }
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/my%20photos/2024").unwrap(), "/my photos/2024");
        assert!(matches!(
            decode_path("/%FF%FE"),
            Err(RenderError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&RenderError::NotFound(PathBuf::from("/x"))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&RenderError::NotADirectory(PathBuf::from("/x.md"))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&RenderError::InvalidPath("/..".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&RenderError::TemplateLoad {
                path: PathBuf::from("/t.html"),
                source: std::io::Error::other("gone"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
