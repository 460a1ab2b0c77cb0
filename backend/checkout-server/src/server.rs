pub mod checkout;
pub mod gateways;
pub mod health_check;
