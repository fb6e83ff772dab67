use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::core::error::AppError;
use crate::modules::api::BookkeepingApi;
use crate::modules::catalog::models::CatalogSnapshot;

/// Loads the client and product lists an invoicing session works from
pub struct CatalogService {
    api: Arc<dyn BookkeepingApi>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn BookkeepingApi>) -> Self {
        Self { api }
    }

    /// Fetch clients and products together.
    ///
    /// Products violating the price/stock invariants are left out of the
    /// snapshot rather than offered for selection.
    pub async fn load(&self) -> Result<CatalogSnapshot, AppError> {
        let (clients, products) =
            tokio::try_join!(self.api.list_clients(), self.api.list_products())?;

        let total = products.len();
        let products: Vec<_> = products
            .into_iter()
            .filter(|product| match product.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(product_id = %product.id, error = %e, "Skipping invalid product");
                    false
                }
            })
            .collect();

        info!(
            api = %self.api.name(),
            clients = clients.len(),
            products = products.len(),
            skipped = total - products.len(),
            "Catalog loaded"
        );

        Ok(CatalogSnapshot::new(clients, products, Utc::now()))
    }
}
