use crate::core::Result;
use crate::modules::catalog::{Client, Product, ProductId};
use crate::modules::inventory::models::StockLevel;
use crate::modules::invoices::models::{CreatedInvoice, InvoiceId, InvoicePayload};
use async_trait::async_trait;

/// Capabilities the invoicing core needs from the bookkeeping service.
///
/// The service owns durable state and has the final word on every invariant.
/// Implementations report a non-success reply as [`AppError::Rejected`] with
/// the service's message verbatim, and network or decoding failures as
/// [`AppError::Transport`].
///
/// [`AppError::Rejected`]: crate::core::AppError::Rejected
/// [`AppError::Transport`]: crate::core::AppError::Transport
#[async_trait]
pub trait BookkeepingApi: Send + Sync {
    /// `GET clients`
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// `GET products`
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// `POST invoices`
    async fn submit_invoice(&self, payload: &InvoicePayload) -> Result<CreatedInvoice>;

    /// `PATCH products/{id}/stock` with a signed delta; returns the committed stock
    async fn adjust_stock(&self, product_id: &ProductId, delta: i64) -> Result<StockLevel>;

    /// `GET invoices/{id}/pdf`, passed through uninterpreted
    async fn invoice_pdf(&self, invoice_id: &InvoiceId) -> Result<Vec<u8>>;

    /// Name used in logs
    fn name(&self) -> &str;
}
