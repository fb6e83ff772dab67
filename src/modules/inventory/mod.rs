// Inventory module

pub mod models;
pub mod services;

pub use models::{AdjustmentState, StockAdjustment, StockLevel};
pub use services::StockLedger;
