use common_enums::{GatewayCategory, PaymentGateway};
use utoipa::ToSchema;

use crate::gateway::GatewayRegistry;

/// A payment option as presented on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, ToSchema)]
pub struct CheckoutOption {
    pub gateway: PaymentGateway,
    pub category: GatewayCategory,
    pub label: String,
}

impl From<PaymentGateway> for CheckoutOption {
    fn from(gateway: PaymentGateway) -> Self {
        Self {
            gateway,
            category: gateway.category(),
            label: gateway.display_name().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, ToSchema)]
pub struct CheckoutOptions {
    pub options: Vec<CheckoutOption>,
}

impl CheckoutOptions {
    /// Builds the options shown for a merchant with the given gateways enabled.
    ///
    /// Card gateways collapse into a single "Card" option backed by the first enabled one.
    /// Always-visible gateways are offered whether or not they were listed.
    pub fn from_enabled<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut card_gateway = None;

        for raw_id in enabled {
            let raw_id = raw_id.as_ref();
            match GatewayRegistry::resolve(raw_id) {
                Some(gateway) if gateway.is_card() => {
                    card_gateway.get_or_insert(gateway);
                }
                Some(_) => {}
                None => {
                    tracing::warn!(gateway_id = %raw_id, "skipping unknown gateway in checkout options");
                }
            }
        }

        let options = card_gateway
            .into_iter()
            .chain(
                GatewayRegistry::all()
                    .filter(|gateway| gateway.category() == GatewayCategory::AlwaysVisible),
            )
            .map(CheckoutOption::from)
            .collect();

        Self { options }
    }

    pub fn card_gateway(&self) -> Option<PaymentGateway> {
        self.options
            .iter()
            .find(|option| option.category == GatewayCategory::Card)
            .map(|option| option.gateway)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|option| option.label.as_str())
            .collect()
    }
}
