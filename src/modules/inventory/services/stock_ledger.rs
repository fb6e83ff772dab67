use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info, warn};

use crate::core::error::{AppError, Result};
use crate::modules::api::BookkeepingApi;
use crate::modules::catalog::{Product, ProductId};
use crate::modules::inventory::models::{AdjustmentState, StockAdjustment};

/// Applies signed quantity deltas to product stock.
///
/// Stock must never go below zero. The ledger refuses deltas it can already
/// see would break that, but the bookkeeping service decides the committed
/// value: a concurrent adjustment can make the local check stale, in which
/// case the service's rejection is passed on unchanged. Adjustments are
/// never retried automatically.
pub struct StockLedger {
    api: Arc<dyn BookkeepingApi>,
    states: Mutex<HashMap<ProductId, AdjustmentState>>,
}

impl StockLedger {
    pub fn new(api: Arc<dyn BookkeepingApi>) -> Self {
        Self {
            api,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Stock `adjust` would request, for "current -> new" displays
    pub fn preview(product: &Product, delta: i64) -> i64 {
        product.stock.saturating_add(delta)
    }

    /// Latest request state for a product
    pub fn state(&self, product_id: &ProductId) -> AdjustmentState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_state(&self, product_id: &ProductId, state: AdjustmentState) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product_id.clone(), state);
    }

    /// Request `product.stock + delta` from the service.
    ///
    /// # Errors
    /// * `Validation` - zero delta
    /// * `InvalidAdjustment` - result would be negative (locally known or
    ///   reported by the service, with the service's reason verbatim)
    /// * `Rejected` - any other 4xx reply, e.g. an unknown product
    /// * `Transport` - the service could not be reached or failed; nothing
    ///   was committed and the same request may be re-issued
    pub async fn adjust(&self, product: &Product, delta: i64) -> Result<StockAdjustment> {
        if delta == 0 {
            return Err(AppError::validation("Stock adjustment delta cannot be zero"));
        }

        let expected = Self::preview(product, delta);
        if expected < 0 {
            warn!(
                product_id = %product.id,
                current_stock = product.stock,
                delta,
                "Refusing stock adjustment below zero"
            );
            return Err(AppError::InvalidAdjustment {
                product_id: product.id.to_string(),
                current_stock: product.stock,
                delta,
                reason: "stock cannot go negative".to_string(),
            });
        }

        self.set_state(&product.id, AdjustmentState::Requesting { delta });

        match self.api.adjust_stock(&product.id, delta).await {
            Ok(level) if level.stock < 0 => {
                let reason = format!("service reported negative stock {}", level.stock);
                error!(product_id = %product.id, delta, stock = level.stock, "Service confirmed negative stock");
                self.set_state(&product.id, AdjustmentState::Rejected { reason: reason.clone() });
                Err(AppError::InvalidAdjustment {
                    product_id: product.id.to_string(),
                    current_stock: product.stock,
                    delta,
                    reason,
                })
            }
            Ok(level) => {
                if level.stock != expected {
                    warn!(
                        product_id = %product.id,
                        expected,
                        confirmed = level.stock,
                        "Confirmed stock differs from preview; another adjustment landed first"
                    );
                }
                info!(
                    product_id = %product.id,
                    delta,
                    previous_stock = product.stock,
                    new_stock = level.stock,
                    "Stock adjustment committed"
                );
                self.set_state(&product.id, AdjustmentState::Committed { new_stock: level.stock });
                Ok(StockAdjustment {
                    product_id: product.id.clone(),
                    delta,
                    previous_stock: product.stock,
                    new_stock: level.stock,
                })
            }
            Err(AppError::Rejected { status, message }) if is_stock_refusal(status) => {
                warn!(product_id = %product.id, delta, status, reason = %message, "Stock adjustment rejected");
                self.set_state(&product.id, AdjustmentState::Rejected { reason: message.clone() });
                Err(AppError::InvalidAdjustment {
                    product_id: product.id.to_string(),
                    current_stock: product.stock,
                    delta,
                    reason: message,
                })
            }
            Err(AppError::Rejected { status, message }) if status < 500 => {
                // Not a stock refusal (unknown product, auth, ...): keep the service's reply
                warn!(product_id = %product.id, delta, status, reason = %message, "Stock request refused");
                self.set_state(&product.id, AdjustmentState::Rejected { reason: message.clone() });
                Err(AppError::Rejected { status, message })
            }
            Err(AppError::Rejected { status, message }) => {
                error!(product_id = %product.id, delta, status, reason = %message, "Stock service failure");
                self.set_state(&product.id, AdjustmentState::Rejected { reason: message.clone() });
                Err(AppError::Transport(format!("stock service error {}: {}", status, message)))
            }
            Err(e) => {
                error!(product_id = %product.id, delta, error = %e, "Stock adjustment failed");
                self.set_state(&product.id, AdjustmentState::Rejected { reason: e.to_string() });
                Err(e)
            }
        }
    }
}

/// Statuses the service uses to refuse a delta on stock grounds
fn is_stock_refusal(status: u16) -> bool {
    matches!(status, 400 | 409 | 422)
}
