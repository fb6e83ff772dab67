// Property-based tests for removing line items by position

use billbook::catalog::Product;
use billbook::invoices::models::{remove_line, LineItem};
use billbook::taxes::TaxTier;
use billbook::AppError;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn items(count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|i| {
            let product = Product::new(format!("p-{}", i), format!("Item {}", i), Decimal::from(i + 1), 1)
                .unwrap();
            LineItem::new(Some(&product), Decimal::ONE, TaxTier::Central18).unwrap()
        })
        .collect()
}

proptest! {
    #[test]
    fn test_removal_drops_exactly_one_and_keeps_order(
        (count, index) in (1usize..30).prop_flat_map(|n| (Just(n), 0..n))
    ) {
        let before = items(count);
        let after = remove_line(&before, index).unwrap();

        prop_assert_eq!(after.len(), count - 1);

        let mut expected = before.clone();
        expected.remove(index);
        prop_assert_eq!(&after, &expected);

        // Input is untouched
        prop_assert_eq!(before.len(), count);
    }

    #[test]
    fn test_removal_out_of_range_fails(
        count in 0usize..20,
        overshoot in 0usize..5
    ) {
        let before = items(count);
        let index = count + overshoot;

        match remove_line(&before, index) {
            Err(AppError::IndexOutOfRange { index: i, len }) => {
                prop_assert_eq!(i, index);
                prop_assert_eq!(len, count);
            }
            other => prop_assert!(false, "Expected IndexOutOfRange, got {:?}", other),
        }
    }
}

#[test]
fn test_remove_only_line_leaves_empty_draft() {
    let after = remove_line(&items(1), 0).unwrap();
    assert!(after.is_empty());
}
