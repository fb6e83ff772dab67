use serde::{Deserialize, Serialize};

use crate::modules::catalog::ProductId;

/// Stock confirmed by the bookkeeping service after an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub stock: i64,
}

/// A committed stock change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub delta: i64,
    /// Stock the caller saw before adjusting
    pub previous_stock: i64,
    /// Stock reported by the service; may differ from `previous_stock + delta`
    /// when another adjustment landed in between
    pub new_stock: i64,
}

/// Where a product's latest adjustment request stands.
///
/// `Idle -> Requesting -> {Committed | Rejected}`; a new request starts over
/// from whichever terminal state the previous one reached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdjustmentState {
    #[default]
    Idle,
    Requesting { delta: i64 },
    Committed { new_stock: i64 },
    Rejected { reason: String },
}

impl AdjustmentState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, AdjustmentState::Requesting { .. })
    }
}
