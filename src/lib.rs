//! billbook invoicing library
//!
//! Composes invoices from catalog products, computes tax under a per-line or
//! per-invoice policy, and keeps product stock from going negative. Durable
//! state lives in a remote bookkeeping service reached through
//! [`modules::api::BookkeepingApi`].

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{AppError, Result};
pub use modules::api;
pub use modules::catalog;
pub use modules::inventory;
pub use modules::invoices;
pub use modules::taxes;
