mod client;
mod product;
mod snapshot;

pub use client::{Address, Client, ClientId};
pub use product::{Product, ProductId, Unit};
pub use snapshot::CatalogSnapshot;
