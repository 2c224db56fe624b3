//! Response headers applied to everything the server sends.

use axum::http::HeaderValue;
use axum::http::header::{self, HeaderName};
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::set_header::SetResponseHeaderLayer;

/// Pages are plain HTML with an inline stylesheet and same-origin media.
const CSP: &str = "default-src 'self'; \
                   script-src 'none'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data:; \
                   object-src 'none'; \
                   frame-ancestors 'none'";

/// Plugin output differs per request even when the page itself is cached.
const NO_STORE: &str = "no-store, no-cache, must-revalidate";

const HEADERS: [(HeaderName, &str); 4] = [
    (header::CONTENT_SECURITY_POLICY, CSP),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::CACHE_CONTROL, NO_STORE),
];

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;
type SecurityStack =
    Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Identity>>>>;

fn overriding((name, value): (HeaderName, &'static str)) -> HeaderLayer {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Layers that set CSP, `nosniff`, `DENY` framing and `no-store` on every response.
pub(crate) fn security_headers() -> ServiceBuilder<SecurityStack> {
    let [csp, nosniff, frame, cache] = HEADERS;
    ServiceBuilder::new()
        .layer(overriding(csp))
        .layer(overriding(nosniff))
        .layer(overriding(frame))
        .layer(overriding(cache))
}
