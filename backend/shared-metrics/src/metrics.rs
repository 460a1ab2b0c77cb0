use error_stack::ResultExt;
use lazy_static::lazy_static;
use prometheus::{
    self, register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    pub static ref gateway_lookups_total: IntCounterVec = register_int_counter_vec!(
        "gateway_lookups_total",
        "Total number of gateway registry lookups",
        &["operation", "outcome"]
    )
    .unwrap();

    pub static ref connectivity_transitions_total: IntCounterVec = register_int_counter_vec!(
        "connectivity_transitions_total",
        "Total number of observed connectivity transitions",
        &["state"]
    )
    .unwrap();

    pub static ref offline_navigation_redirects_total: IntCounter = register_int_counter!(
        "offline_navigation_redirects_total",
        "Total number of navigations redirected to the error page while offline"
    )
    .unwrap();

    pub static ref http_requests_total: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests received",
        &["path"]
    )
    .unwrap();
}

/// Outcome label for registry lookups.
pub const HIT: &str = "hit";
/// Outcome label for lookups that fell back to the raw identifier.
pub const MISS: &str = "miss";

pub async fn metrics_handler() -> error_stack::Result<String, MetricsError> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .change_context(MetricsError::EncodingError)?;
    String::from_utf8(buffer).change_context(MetricsError::Utf8Error)
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Error encoding metrics")]
    EncodingError,
    #[error("Error converting metrics to utf8")]
    Utf8Error,
}
