pub mod models;
pub mod services;

pub use models::{Address, CatalogSnapshot, Client, ClientId, Product, ProductId, Unit};
pub use services::CatalogService;
