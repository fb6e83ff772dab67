use chrono::{DateTime, Utc};

use super::client::{Client, ClientId};
use super::product::{Product, ProductId};

/// Clients and products as fetched at the start of an invoicing session.
///
/// Treated as immutable for the session; line items snapshot prices at add
/// time, so later catalog reloads never change an existing draft.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    clients: Vec<Client>,
    products: Vec<Product>,
    fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(clients: Vec<Client>, products: Vec<Product>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            clients,
            products,
            fetched_at,
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.id == id)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}
