// Invoices module

pub mod models;
pub mod services;

pub use models::{
    CreatedInvoice, InvoiceDraft, InvoiceId, InvoicePayload, InvoiceStatus, InvoiceTotals,
    LineItem,
};
pub use services::{InvoiceAggregator, InvoiceDraftBuilder, InvoiceService};
