// Inventory product as read from the bookkeeping service
//
// Price is a non-negative decimal, stock a non-negative integer. The tax rate
// is optional and only meaningful under the per-line tax policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};
use crate::modules::taxes::TaxTier;

/// Product identifier assigned by the bookkeeping service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    #[default]
    Pcs,
    Kg,
    Mtr,
    #[serde(rename = "BOX")]
    Carton,
    Ltr,
}

/// A stocked product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub hsn_code: String,

    #[serde(default)]
    pub unit: Unit,

    /// Price per unit
    pub price: Decimal,

    /// Quantity on hand
    #[serde(default)]
    pub stock: i64,

    /// Own tax rate in percent, if the product carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
}

impl Product {
    /// Create a product with validation
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        stock: i64,
    ) -> Result<Self> {
        let product = Self {
            id: ProductId::new(id),
            name: name.into(),
            description: String::new(),
            hsn_code: String::new(),
            unit: Unit::default(),
            price,
            stock,
            tax_rate: None,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn with_tax_tier(mut self, tier: TaxTier) -> Self {
        self.tax_rate = Some(tier.rate());
        self
    }

    /// Check price and stock invariants on data received from the service
    pub fn validate(&self) -> Result<()> {
        if self.price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Product {} price must be non-negative, got: {}",
                self.id, self.price
            )));
        }

        if self.stock < 0 {
            return Err(AppError::validation(format!(
                "Product {} stock must be non-negative, got: {}",
                self.id, self.stock
            )));
        }

        Ok(())
    }

    /// The product's own tier; an unknown rate is a configuration error
    pub fn tax_tier(&self) -> Result<Option<TaxTier>> {
        self.tax_rate.map(TaxTier::from_rate).transpose()
    }

    /// Label used in selection lists, e.g. `Steel Bolt (₹12.50)`
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, crate::core::money::format_amount(self.price))
    }
}
