// Invoice draft, submission payload and the service's reply
//
// The draft is a plain caller-owned value: every operation takes it
// explicitly, so there is no hidden shared state and totals can always be
// recomputed from the lines alone.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::line_item::{self, LineItem};
use crate::core::{AppError, Result};
use crate::modules::catalog::{ClientId, Product, ProductId};
use crate::modules::invoices::services::aggregator::InvoiceAggregator;
use crate::modules::taxes::{TaxCalculator, TaxPolicy, TaxTier};

/// Invoice identifier assigned by the bookkeeping service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Invoice status lifecycle.
///
/// Only `Draft` is ever assigned here; the other states are set by the
/// bookkeeping service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Sent => write!(f, "sent"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Subtotal, tax and grand total of a set of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub total: Decimal,

    /// `total` minus the rounded unrounded total. Non-zero only under the
    /// per-invoice policy, where subtotal and tax are rounded separately;
    /// never larger than 0.01 in magnitude.
    pub rounding_gap: Decimal,
}

/// An invoice being composed, not yet known to the bookkeeping service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Local identity, only used to detect duplicate submissions
    id: Uuid,
    client_id: Option<ClientId>,
    policy: TaxPolicy,
    invoice_tier: Option<TaxTier>,
    line_items: Vec<LineItem>,
}

impl InvoiceDraft {
    /// Empty draft under the given policy
    pub fn new(policy: TaxPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: None,
            policy,
            invoice_tier: None,
            line_items: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    pub fn policy(&self) -> TaxPolicy {
        self.policy
    }

    pub fn invoice_tier(&self) -> Option<TaxTier> {
        self.invoice_tier
    }

    /// Lines in insertion order
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn select_client(&mut self, client_id: ClientId) {
        self.client_id = Some(client_id);
    }

    pub fn clear_client(&mut self) {
        self.client_id = None;
    }

    /// Choose the invoice-wide tier (per-invoice policy only).
    ///
    /// Lines already on the draft keep the tier they were priced with; only
    /// lines added afterwards use the new one.
    pub fn select_invoice_tier(&mut self, tier: TaxTier) -> Result<()> {
        if self.policy != TaxPolicy::PerInvoice {
            return Err(AppError::validation(
                "Invoice-level tax rate only applies to the per-invoice policy",
            ));
        }

        if !self.line_items.is_empty() && self.invoice_tier != Some(tier) {
            tracing::debug!(
                draft_id = %self.id,
                lines = self.line_items.len(),
                tier = %tier,
                "Invoice tier changed; existing lines keep their priced tier"
            );
        }

        self.invoice_tier = Some(tier);
        Ok(())
    }

    /// Price `product` and append it.
    ///
    /// `line_tier` is the tier chosen for this line under the per-line
    /// policy; it is ignored under the per-invoice policy.
    pub fn add_line(
        &mut self,
        product: Option<&Product>,
        quantity: Decimal,
        line_tier: Option<TaxTier>,
    ) -> Result<&LineItem> {
        let product = product.ok_or_else(|| AppError::validation("Select a product to add"))?;
        let tier = TaxCalculator::new().resolve_tier(
            self.policy,
            line_tier,
            self.invoice_tier,
            product,
        )?;
        let item = LineItem::new(Some(product), quantity, tier)?;

        tracing::debug!(
            draft_id = %self.id,
            product_id = %item.product_id,
            quantity = %item.quantity,
            line_total = %item.line_total,
            "Line item added"
        );

        self.line_items.push(item);
        let last = self.line_items.len() - 1;
        Ok(&self.line_items[last])
    }

    /// Remove the line at `index`; the draft is unchanged on error
    pub fn remove_line(&mut self, index: usize) -> Result<()> {
        self.line_items = line_item::remove_line(&self.line_items, index)?;
        Ok(())
    }

    /// Running totals under the draft's policy
    pub fn totals(&self) -> Result<InvoiceTotals> {
        InvoiceAggregator::new().totals(&self.line_items, self.policy, self.invoice_tier)
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new(TaxPolicy::default())
    }
}

/// Line as submitted to the bookkeeping service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLineItem {
    pub product: ProductId,
    pub quantity: Decimal,
    pub price: Decimal,
    pub sale_type: TaxTier,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl From<&LineItem> for PayloadLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            product: item.product_id.clone(),
            quantity: item.quantity,
            price: item.unit_price,
            sale_type: item.tax_tier,
            tax_rate: item.tax_rate(),
            tax_amount: item.tax_amount,
            total: item.line_total,
        }
    }
}

/// Body of `POST invoices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub client: ClientId,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub items: Vec<PayloadLineItem>,
    pub tax_policy: TaxPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_rate: Option<TaxTier>,
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
}

/// Identity assigned by the bookkeeping service on creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    #[serde(rename = "_id", alias = "id")]
    pub id: InvoiceId,
    pub invoice_number: String,
}
