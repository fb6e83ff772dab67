mod invoice;
mod line_item;

pub use invoice::{
    CreatedInvoice, InvoiceDraft, InvoiceId, InvoicePayload, InvoiceStatus, InvoiceTotals,
    PayloadLineItem,
};
pub use line_item::{remove_line, LineItem};
