use axum::{extract::Path, Json};
use common_enums::PaymentGateway;
use domain_types::{
    gateway::{GatewayDescriptor, GatewayRegistry},
    utils::{ForeignFrom, ForeignTryFrom},
};

use crate::{error::ApiErrorResponse, logger};

/// Every known gateway with its category and display name.
pub async fn list() -> Json<Vec<GatewayDescriptor>> {
    Json(
        GatewayRegistry::all()
            .map(GatewayDescriptor::foreign_from)
            .collect(),
    )
}

/// Describes any identifier; unknown identifiers come back without a category.
#[logger::instrument(skip_all, fields(gateway_id = %gateway_id))]
pub async fn describe(Path(gateway_id): Path<String>) -> Json<GatewayDescriptor> {
    Json(GatewayRegistry::describe(&gateway_id))
}

#[derive(Debug, serde::Serialize)]
pub struct ResolvedGateway {
    pub gateway: PaymentGateway,
}

/// Strict variant of [`describe`], rejecting identifiers that do not name a known gateway.
#[logger::instrument(skip_all, fields(gateway_id = %gateway_id))]
pub async fn resolve(
    Path(gateway_id): Path<String>,
) -> Result<Json<ResolvedGateway>, ApiErrorResponse> {
    let gateway = PaymentGateway::foreign_try_from(gateway_id.as_str())?;
    Ok(Json(ResolvedGateway { gateway }))
}
