pub mod aggregator;
pub mod draft_builder;
pub mod invoice_service;

pub use aggregator::InvoiceAggregator;
pub use draft_builder::InvoiceDraftBuilder;
pub use invoice_service::InvoiceService;
