pub mod checkout;
pub mod errors;
pub mod gateway;
pub mod utils;
