pub mod models;
pub mod services;

pub use models::{TaxPolicy, TaxTier};
pub use services::TaxCalculator;
