use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::money::{add_amounts, percentage_of, round_currency, sum_amounts};
use crate::modules::invoices::models::{InvoiceTotals, LineItem};
use crate::modules::taxes::{TaxPolicy, TaxTier};

/// Folds priced lines into invoice totals.
///
/// Pure: the result depends only on the arguments, so it is recomputed after
/// every add/remove instead of being kept in sync incrementally.
pub struct InvoiceAggregator;

impl InvoiceAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn totals(
        &self,
        items: &[LineItem],
        policy: TaxPolicy,
        invoice_tier: Option<TaxTier>,
    ) -> Result<InvoiceTotals, AppError> {
        let subtotal = sum_amounts(items.iter().map(|item| item.amount))?;

        match policy {
            TaxPolicy::PerLine => {
                // Exact sum of the per-line taxes, nothing rounded
                let total_tax = sum_amounts(items.iter().map(|item| item.tax_amount))?;
                Ok(InvoiceTotals {
                    subtotal,
                    total_tax,
                    total: add_amounts(subtotal, total_tax)?,
                    rounding_gap: Decimal::ZERO,
                })
            }
            TaxPolicy::PerInvoice => {
                let tier = invoice_tier.ok_or_else(|| {
                    AppError::Validation("No invoice tax rate selected".to_string())
                })?;
                let raw_tax = percentage_of(subtotal, tier.rate())?;

                // Subtotal and tax are rounded independently and the total is
                // their sum, so it can differ from round(subtotal + tax) by a cent.
                let rounded_subtotal = round_currency(subtotal);
                let rounded_tax = round_currency(raw_tax);
                let total = add_amounts(rounded_subtotal, rounded_tax)?;
                let rounding_gap = total - round_currency(add_amounts(subtotal, raw_tax)?);

                Ok(InvoiceTotals {
                    subtotal: rounded_subtotal,
                    total_tax: rounded_tax,
                    total,
                    rounding_gap,
                })
            }
        }
    }
}

impl Default for InvoiceAggregator {
    fn default() -> Self {
        Self::new()
    }
}
