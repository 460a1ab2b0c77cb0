//! Classification, display names and synonym normalization for payment gateway identifiers.
//!
//! Every lookup works on the raw identifier string as received from the client or the
//! configuration. Unknown identifiers are tolerated: classification answers `false`, the
//! display name is the identifier itself and normalization passes it through.

use std::str::FromStr;

use common_enums::{GatewayCategory, PaymentGateway};
use common_utils::CustomResult;
use shared_metrics as metrics;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

use crate::{
    errors::{ApiError, ApplicationErrorResponse},
    utils::{ForeignFrom, ForeignTryFrom},
};

/// Alternate spellings and the canonical gateway each one stands for.
const GATEWAY_SYNONYMS: &[(&str, PaymentGateway)] = &[("dodo", PaymentGateway::Dodopay)];

/// Read-only view over the static gateway tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayRegistry;

impl GatewayRegistry {
    /// Canonical identifiers only; synonyms are not classified until normalized.
    fn lookup(id: &str) -> Option<PaymentGateway> {
        PaymentGateway::from_str(id).ok()
    }

    pub fn is_card_gateway(id: &str) -> bool {
        Self::category(id) == Some(GatewayCategory::Card)
    }

    pub fn is_always_visible_gateway(id: &str) -> bool {
        Self::category(id) == Some(GatewayCategory::AlwaysVisible)
    }

    pub fn category(id: &str) -> Option<GatewayCategory> {
        Self::lookup(id).map(PaymentGateway::category)
    }

    /// Human readable label, or the identifier itself when no label is known.
    pub fn display_name(id: &str) -> &str {
        match Self::lookup(id) {
            Some(gateway) => {
                record_lookup("display_name", metrics::HIT);
                gateway.display_name()
            }
            None => {
                tracing::debug!(gateway_id = %id, "no display name for gateway, echoing identifier");
                record_lookup("display_name", metrics::MISS);
                id
            }
        }
    }

    pub fn normalize(id: &str) -> &str {
        GATEWAY_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == id)
            .map_or(id, |(_, canonical)| canonical.id())
    }

    /// Normalizes and then parses into a known gateway.
    pub fn resolve(id: &str) -> Option<PaymentGateway> {
        let resolved = Self::lookup(Self::normalize(id));
        record_lookup(
            "resolve",
            if resolved.is_some() {
                metrics::HIT
            } else {
                metrics::MISS
            },
        );
        resolved
    }

    pub fn describe(id: &str) -> GatewayDescriptor {
        match Self::resolve(id) {
            Some(gateway) => GatewayDescriptor {
                id: id.to_owned(),
                ..GatewayDescriptor::foreign_from(gateway)
            },
            None => GatewayDescriptor {
                id: id.to_owned(),
                canonical_id: id.to_owned(),
                category: None,
                display_name: id.to_owned(),
            },
        }
    }

    /// Every known gateway in table order.
    pub fn all() -> impl Iterator<Item = PaymentGateway> {
        PaymentGateway::iter()
    }
}

fn record_lookup(operation: &str, outcome: &str) {
    metrics::gateway_lookups_total
        .with_label_values(&[operation, outcome])
        .inc();
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, ToSchema)]
pub struct GatewayDescriptor {
    /// Identifier as it was asked for
    pub id: String,
    pub canonical_id: String,
    /// `None` when the identifier is not a known gateway
    pub category: Option<GatewayCategory>,
    pub display_name: String,
}

impl ForeignFrom<PaymentGateway> for GatewayDescriptor {
    fn foreign_from(gateway: PaymentGateway) -> Self {
        Self {
            id: gateway.id().to_owned(),
            canonical_id: gateway.id().to_owned(),
            category: Some(gateway.category()),
            display_name: gateway.display_name().to_owned(),
        }
    }
}

impl ForeignTryFrom<&str> for PaymentGateway {
    type Error = ApplicationErrorResponse;

    fn foreign_try_from(gateway_id: &str) -> CustomResult<Self, Self::Error> {
        GatewayRegistry::resolve(gateway_id).ok_or_else(|| {
            ApplicationErrorResponse::BadRequest(ApiError {
                sub_code: "INVALID_GATEWAY".to_owned(),
                error_identifier: 400,
                error_message: format!("Invalid value for gateway: {gateway_id}"),
                error_object: None,
            })
            .into()
        })
    }
}
