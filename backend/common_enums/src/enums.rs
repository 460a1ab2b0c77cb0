use utoipa::ToSchema;

/// Payment gateways known to the checkout.
///
/// The set is closed: adding a gateway means adding a variant here and giving
/// it a category and a display name below.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentGateway {
    Stripe,
    Razorpay,
    Dodopay,
    Paddle,
    Paypal,
    Upi,
    Crypto,
}

impl PaymentGateway {
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub const fn category(self) -> GatewayCategory {
        match self {
            Self::Stripe | Self::Razorpay | Self::Dodopay | Self::Paddle => GatewayCategory::Card,
            Self::Paypal | Self::Upi | Self::Crypto => GatewayCategory::AlwaysVisible,
        }
    }

    /// Label shown to the payer. Card gateways all share the unified "Card" label.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Stripe | Self::Razorpay | Self::Dodopay | Self::Paddle => "Card",
            Self::Paypal => "PayPal",
            Self::Upi => "UPI",
            Self::Crypto => "Crypto",
        }
    }

    pub const fn is_card(self) -> bool {
        matches!(self.category(), GatewayCategory::Card)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GatewayCategory {
    /// Collected through the unified card-entry form.
    Card,
    /// Offered regardless of which card gateway is configured.
    AlwaysVisible,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NetworkState {
    #[default]
    Online,
    Offline,
}

impl NetworkState {
    pub const fn from_reachable(reachable: bool) -> Self {
        if reachable {
            Self::Online
        } else {
            Self::Offline
        }
    }

    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Connectivity signals pushed by the host runtime.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
pub enum ConnectivityEvent {
    #[serde(rename = "online")]
    #[strum(serialize = "online")]
    BecameReachable,
    #[serde(rename = "offline")]
    #[strum(serialize = "offline")]
    BecameUnreachable,
}

impl ConnectivityEvent {
    /// State the monitor moves to when this event fires.
    pub const fn target_state(self) -> NetworkState {
        match self {
            Self::BecameReachable => NetworkState::Online,
            Self::BecameUnreachable => NetworkState::Offline,
        }
    }
}

/// Classification handed to the error-navigation callback.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClassification {
    Network,
}
