#![allow(dead_code)]

use axum::{body::Body, Router};
use checkout_server::{app::Service, configs};
use http::{Request, StatusCode};
use tower::ServiceExt;

pub fn router(enabled: &[&str]) -> Router {
    Service::new(&configs::Gateways {
        enabled: enabled.iter().map(|id| (*id).to_string()).collect(),
    })
    .router()
}

/// # Panics
///
/// Will panic if the request cannot be built or the body is not JSON
#[allow(clippy::expect_used)]
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}
