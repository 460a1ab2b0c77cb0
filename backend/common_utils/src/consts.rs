//! Consolidated constants for the checkout services

// =============================================================================
// HTTP Headers
// =============================================================================

/// Header key for request ID
pub const X_REQUEST_ID: &str = "x-request-id";

// =============================================================================
// Navigation
// =============================================================================

/// Page the client is sent to when an operation cannot proceed
pub const ERROR_PAGE_PATH: &str = "/error";
/// Query parameter carrying the error classification on the error page
pub const ERROR_TYPE_QUERY_PARAM: &str = "type";

// =============================================================================
// Service identity
// =============================================================================

/// Constant variable for name
pub const NAME: &str = "PAYGATE";
/// Prefix for environment variables overriding configuration
pub const CONFIG_ENV_PREFIX: &str = NAME;

// =============================================================================
// Environment and Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Development,
    Release,
}

impl Env {
    pub const fn current_env() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Release
        }
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Release => "production.toml",
        }
    }
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Release => write!(f, "release"),
        }
    }
}
