use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::config::InvoicingConfig;
use crate::core::error::{AppError, DraftField, ValidationError};
use crate::modules::invoices::models::{
    InvoiceDraft, InvoicePayload, InvoiceStatus, PayloadLineItem,
};
use crate::modules::taxes::TaxPolicy;

/// Validates drafts and turns them into submission payloads
#[derive(Debug, Clone)]
pub struct InvoiceDraftBuilder {
    due_days: u32,
}

impl InvoiceDraftBuilder {
    pub fn new(config: &InvoicingConfig) -> Self {
        Self {
            due_days: config.due_days,
        }
    }

    /// Every reason the draft cannot be submitted yet; empty means submittable
    pub fn validate(&self, draft: &InvoiceDraft) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if draft.client_id().is_none() {
            errors.push(ValidationError::new(DraftField::Client, "No client selected"));
        }

        if draft.line_items().is_empty() {
            errors.push(ValidationError::new(DraftField::LineItems, "No line items"));
        }

        for (idx, item) in draft.line_items().iter().enumerate() {
            if item.quantity <= Decimal::ZERO {
                errors.push(ValidationError::at_line(
                    DraftField::Quantity,
                    idx,
                    format!("Quantity must be positive, got: {}", item.quantity),
                ));
            }
        }

        if draft.policy() == TaxPolicy::PerInvoice && draft.invoice_tier().is_none() {
            errors.push(ValidationError::new(
                DraftField::TaxRate,
                "No invoice tax rate selected",
            ));
        }

        errors
    }

    /// Materialize the payload for `POST invoices`.
    ///
    /// Refuses with [`AppError::InvalidDraft`] while `validate` reports
    /// anything.
    pub fn build(&self, draft: &InvoiceDraft, now: DateTime<Utc>) -> Result<InvoicePayload, AppError> {
        let errors = self.validate(draft);
        if !errors.is_empty() {
            return Err(AppError::InvalidDraft(errors));
        }

        let client = draft
            .client_id()
            .cloned()
            .ok_or_else(|| AppError::validation("No client selected"))?;
        let totals = draft.totals()?;

        let invoice_rate = match draft.policy() {
            TaxPolicy::PerInvoice => draft.invoice_tier(),
            TaxPolicy::PerLine => None,
        };

        Ok(InvoicePayload {
            client,
            date: now,
            due_date: now + Duration::days(i64::from(self.due_days)),
            items: draft.line_items().iter().map(PayloadLineItem::from).collect(),
            tax_policy: draft.policy(),
            invoice_rate,
            subtotal: totals.subtotal,
            total_tax: totals.total_tax,
            total: totals.total,
            status: InvoiceStatus::Draft,
        })
    }

    /// Fresh empty draft under the same policy
    pub fn reset(&self, draft: InvoiceDraft) -> InvoiceDraft {
        InvoiceDraft::new(draft.policy())
    }
}

impl Default for InvoiceDraftBuilder {
    fn default() -> Self {
        Self::new(&InvoicingConfig::default())
    }
}
