use common_utils::consts;
use http::request::Request;

/// Span wrapping one HTTP request; carries the request id set by the request-id layer.
pub fn request_span<B>(request: &Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(consts::X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}
