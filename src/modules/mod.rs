pub mod api;
pub mod catalog;
pub mod inventory;
pub mod invoices;
pub mod taxes;
