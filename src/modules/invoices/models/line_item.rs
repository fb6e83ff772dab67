// Priced invoice line
//
// A line item snapshots the product's unit price at the moment it is added,
// so later catalog price changes never alter an existing draft. Amounts stay
// unrounded; rounding happens at display time or in per-invoice aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{add_amounts, line_amount};
use crate::core::{AppError, Result};
use crate::modules::catalog::{Product, ProductId};
use crate::modules::taxes::{TaxCalculator, TaxTier};

/// Represents a single priced line in an invoice draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,

    /// Product name at add time, for display
    pub product_name: String,

    pub quantity: Decimal,

    /// Unit price snapshotted from the product
    pub unit_price: Decimal,

    pub tax_tier: TaxTier,

    /// Pre-tax amount (quantity × unit_price)
    pub amount: Decimal,

    /// amount × rate / 100
    pub tax_amount: Decimal,

    /// amount + tax_amount
    pub line_total: Decimal,
}

impl LineItem {
    /// Price a product at the given quantity and tier
    ///
    /// # Arguments
    /// * `product` - Selected product; `None` means nothing is selected yet
    /// * `quantity` - Must be positive
    /// * `tier` - Tier supplied by the caller (the line's own tier under the
    ///   per-line policy, the invoice tier under the per-invoice policy)
    pub fn new(product: Option<&Product>, quantity: Decimal, tier: TaxTier) -> Result<Self> {
        let product = product.ok_or_else(|| AppError::validation("Select a product to add"))?;
        Self::validate_quantity(quantity)?;
        Self::validate_unit_price(product.price)?;

        let amount = line_amount(product.price, quantity)?;
        let tax_amount = TaxCalculator::new().calculate_tax(amount, tier)?;
        let line_total = add_amounts(amount, tax_amount)?;

        Ok(Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price: product.price,
            tax_tier: tier,
            amount,
            tax_amount,
            line_total,
        })
    }

    /// Rate in percent applied to this line
    pub fn tax_rate(&self) -> Decimal {
        self.tax_tier.rate()
    }

    /// Validate quantity (must be positive)
    pub fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(())
    }
}

/// Remove the line at `index`, keeping the relative order of the others.
///
/// Returns a new sequence; `items` is left untouched.
pub fn remove_line(items: &[LineItem], index: usize) -> Result<Vec<LineItem>> {
    if index >= items.len() {
        return Err(AppError::IndexOutOfRange {
            index,
            len: items.len(),
        });
    }

    Ok(items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect())
}
