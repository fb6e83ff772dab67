use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::error::AppError;
use crate::modules::api::BookkeepingApi;
use crate::modules::invoices::models::{CreatedInvoice, InvoiceDraft, InvoiceId};
use crate::modules::invoices::services::draft_builder::InvoiceDraftBuilder;

/// Service for submitting drafts to the bookkeeping service
pub struct InvoiceService {
    api: Arc<dyn BookkeepingApi>,
    builder: InvoiceDraftBuilder,
    in_flight: Mutex<HashSet<Uuid>>,
}

/// Marks a draft as in flight until dropped
struct InFlight<'a> {
    drafts: &'a Mutex<HashSet<Uuid>>,
    id: Uuid,
}

impl<'a> InFlight<'a> {
    fn acquire(drafts: &'a Mutex<HashSet<Uuid>>, id: Uuid) -> Result<Self, AppError> {
        let inserted = drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);

        if !inserted {
            return Err(AppError::SubmissionInProgress(id.to_string()));
        }

        Ok(Self { drafts, id })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.drafts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl InvoiceService {
    pub fn new(api: Arc<dyn BookkeepingApi>, builder: InvoiceDraftBuilder) -> Self {
        Self {
            api,
            builder,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn builder(&self) -> &InvoiceDraftBuilder {
        &self.builder
    }

    /// Whether a submission for this draft is outstanding
    pub fn is_submitting(&self, draft: &InvoiceDraft) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&draft.id())
    }

    /// Validate, build and submit the draft.
    ///
    /// On success the draft is replaced by a fresh empty one under the same
    /// policy. On any error it is left exactly as it was, so the caller can
    /// correct it or re-submit after a transport failure.
    pub async fn submit(&self, draft: &mut InvoiceDraft) -> Result<CreatedInvoice, AppError> {
        let payload = self.builder.build(draft, Utc::now())?;
        let _guard = InFlight::acquire(&self.in_flight, draft.id())?;

        let created = match self.api.submit_invoice(&payload).await {
            Ok(created) => created,
            Err(AppError::Rejected { status, message }) => {
                warn!(
                    draft_id = %draft.id(),
                    status,
                    reason = %message,
                    "Invoice submission rejected"
                );
                return Err(AppError::Submission(message));
            }
            Err(e) => {
                error!(draft_id = %draft.id(), error = %e, "Invoice submission failed");
                return Err(e);
            }
        };

        info!(
            draft_id = %draft.id(),
            invoice_id = %created.id,
            invoice_number = %created.invoice_number,
            client_id = %payload.client,
            lines = payload.items.len(),
            total = %payload.total,
            "Invoice created"
        );

        let submitted = std::mem::take(draft);
        *draft = self.builder.reset(submitted);

        Ok(created)
    }

    /// Rendered PDF of a submitted invoice, as returned by the service
    pub async fn invoice_pdf(&self, invoice_id: &InvoiceId) -> Result<Vec<u8>, AppError> {
        self.api.invoice_pdf(invoice_id).await.map_err(|e| {
            error!(invoice_id = %invoice_id, error = %e, "Failed to fetch invoice PDF");
            e
        })
    }
}
