//! Tracing setup for the checkout service, and the macros its modules log with.

pub mod config;
mod env;
mod setup;

pub use setup::{setup, LoggerError, TelemetryGuard};
pub use tracing::{info, warn};
pub use tracing_attributes::instrument;
