use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::money::percentage_of;
use crate::modules::catalog::Product;
use crate::modules::taxes::models::{TaxPolicy, TaxTier};

/// TaxCalculator picks the tier that applies to a line and computes its tax
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Tax on a pre-tax amount: `amount × tier.rate() / 100`, unrounded
    pub fn calculate_tax(&self, amount: Decimal, tier: TaxTier) -> Result<Decimal, AppError> {
        percentage_of(amount, tier.rate())
    }

    /// Tier a new line is priced with.
    ///
    /// Per-invoice: always the invoice tier, which must already be selected.
    /// Per-line: the tier chosen for this line, falling back to the product's
    /// own tier.
    pub fn resolve_tier(
        &self,
        policy: TaxPolicy,
        line_tier: Option<TaxTier>,
        invoice_tier: Option<TaxTier>,
        product: &Product,
    ) -> Result<TaxTier, AppError> {
        match policy {
            TaxPolicy::PerInvoice => invoice_tier.ok_or_else(|| {
                AppError::Validation(
                    "Select an invoice tax rate before adding items".to_string(),
                )
            }),
            TaxPolicy::PerLine => match line_tier {
                Some(tier) => Ok(tier),
                None => product.tax_tier()?.ok_or_else(|| {
                    AppError::Validation(format!(
                        "No tax rate selected for {} and the product has none",
                        product.name
                    ))
                }),
            },
        }
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
