//! Fixed-precision money helpers.
//!
//! All arithmetic stays in `Decimal` and is unrounded until a value is shown
//! or, for the per-invoice policy, aggregated. Rounding to currency precision
//! uses round-half-away-from-zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Result};

/// Decimal places of the invoicing currency (INR)
pub const CURRENCY_SCALE: u32 = 2;

/// Currency sign used for display
pub const CURRENCY_SYMBOL: &str = "₹";

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn too_large() -> AppError {
    AppError::validation("amount too large")
}

/// Pre-tax amount of a line: `unit_price × quantity`, unrounded
pub fn line_amount(unit_price: Decimal, quantity: Decimal) -> Result<Decimal> {
    unit_price.checked_mul(quantity).ok_or_else(too_large)
}

/// `amount × rate_percent / 100`, unrounded
pub fn percentage_of(amount: Decimal, rate_percent: Decimal) -> Result<Decimal> {
    amount
        .checked_mul(rate_percent)
        .and_then(|scaled| scaled.checked_div(ONE_HUNDRED))
        .ok_or_else(too_large)
}

/// Overflow-checked `a + b`
pub fn add_amounts(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(too_large)
}

/// Overflow-checked sum of amounts
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, add_amounts)
}

/// Rounds to currency precision, half away from zero (2.345 -> 2.35, -2.345 -> -2.35)
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display, always with two decimal places
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_currency(amount);
    rounded.rescale(CURRENCY_SCALE);
    format!("{}{}", CURRENCY_SYMBOL, rounded)
}
