// Stock adjustments against an in-memory bookkeeping service

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use billbook::inventory::{AdjustmentState, StockLedger};
use billbook::AppError;
use helpers::*;
use rust_decimal_macros::dec;

fn ledger_with(stock: &[(&str, i64)]) -> (Arc<FakeBookkeepingApi>, StockLedger) {
    let products = stock
        .iter()
        .map(|(id, qty)| product(id, dec!(10), *qty))
        .collect();
    let api = Arc::new(FakeBookkeepingApi::new(Vec::new(), products));
    let ledger = StockLedger::new(api.clone());
    (api, ledger)
}

#[tokio::test]
async fn test_adjust_down_to_zero() {
    let (api, ledger) = ledger_with(&[("a", 5)]);
    let p = product("a", dec!(10), 5);

    assert_eq!(StockLedger::preview(&p, -5), 0);
    let adjustment = ledger.adjust(&p, -5).await.unwrap();

    assert_eq!(adjustment.previous_stock, 5);
    assert_eq!(adjustment.new_stock, 0);
    assert_eq!(api.stock_of("a"), Some(0));
    assert_eq!(ledger.state(&p.id), AdjustmentState::Committed { new_stock: 0 });
}

#[tokio::test]
async fn test_adjust_below_zero_fails_without_request() {
    let (api, ledger) = ledger_with(&[("a", 0)]);
    let p = product("a", dec!(10), 0);

    let err = ledger.adjust(&p, -6).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAdjustment { .. }));
    assert!(err.to_string().contains("would result in -6"));
    assert_eq!(api.stock_requests(), 0);
    assert_eq!(api.stock_of("a"), Some(0));
}

#[tokio::test]
async fn test_one_past_available_always_fails() {
    for stock in [0, 1, 7, 250] {
        let (api, ledger) = ledger_with(&[("a", stock)]);
        let p = product("a", dec!(10), stock);

        assert!(ledger.adjust(&p, -(stock + 1)).await.is_err());
        assert_eq!(api.stock_of("a"), Some(stock));
    }
}

#[tokio::test]
async fn test_service_rejection_is_surfaced_verbatim() {
    let (api, ledger) = ledger_with(&[("a", 5)]);
    // Someone else sold four units since the product list was loaded
    api.set_stock("a", 1);
    let stale = product("a", dec!(10), 5);

    match ledger.adjust(&stale, -3).await {
        Err(AppError::InvalidAdjustment { reason, .. }) => {
            assert_eq!(reason, "Insufficient stock: only 1 available");
        }
        other => panic!("Expected InvalidAdjustment, got {:?}", other),
    }
    assert_eq!(api.stock_of("a"), Some(1));
    assert_eq!(
        ledger.state(&stale.id),
        AdjustmentState::Rejected {
            reason: "Insufficient stock: only 1 available".to_string()
        }
    );
}

#[tokio::test]
async fn test_confirmed_stock_wins_over_preview() {
    let (api, ledger) = ledger_with(&[("a", 5)]);
    api.set_stock("a", 9);
    let stale = product("a", dec!(10), 5);

    let adjustment = ledger.adjust(&stale, 2).await.unwrap();
    assert_eq!(adjustment.new_stock, 11);
}

#[tokio::test]
async fn test_transport_failure_leaves_stock_unchanged() {
    let (api, ledger) = ledger_with(&[("a", 5)]);
    api.set_offline(true);
    let p = product("a", dec!(10), 5);

    let err = ledger.adjust(&p, 3).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(api.stock_of("a"), Some(5));
    assert!(matches!(ledger.state(&p.id), AdjustmentState::Rejected { .. }));

    // Caller may re-issue once the service is back
    api.set_offline(false);
    assert_eq!(ledger.adjust(&p, 3).await.unwrap().new_stock, 8);
}

#[tokio::test]
async fn test_adjustments_to_different_products_run_concurrently() {
    let (api, ledger) = ledger_with(&[("a", 5), ("b", 2)]);
    let a = product("a", dec!(10), 5);
    let b = product("b", dec!(10), 2);

    let (ra, rb) = tokio::join!(ledger.adjust(&a, 10), ledger.adjust(&b, -2));

    assert_eq!(ra.unwrap().new_stock, 15);
    assert_eq!(rb.unwrap().new_stock, 0);
    assert_eq!(api.stock_of("a"), Some(15));
    assert_eq!(api.stock_of("b"), Some(0));
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let (_api, ledger) = ledger_with(&[]);
    let ghost = product("ghost", dec!(1), 3);

    match ledger.adjust(&ghost, 1).await {
        Err(AppError::Rejected { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Product not found");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
    assert!(!ledger.state(&ghost.id).is_in_flight());
}
