use std::sync::Arc;

use axum::{extract::State, Json};
use domain_types::checkout::CheckoutOptions;

/// Options computed once from `gateways.enabled` at start-up.
pub async fn options(State(options): State<Arc<CheckoutOptions>>) -> Json<CheckoutOptions> {
    Json(CheckoutOptions::clone(&options))
}
