mod stock_adjustment;

pub use stock_adjustment::{AdjustmentState, StockAdjustment, StockLevel};
