use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::api_trait::BookkeepingApi;
use crate::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::modules::catalog::{Client, Product, ProductId};
use crate::modules::inventory::models::StockLevel;
use crate::modules::invoices::models::{CreatedInvoice, InvoiceId, InvoicePayload};

/// reqwest client for the bookkeeping REST service
pub struct HttpBookkeepingApi {
    client: HttpClient,
    base_url: Url,
}

#[derive(Serialize)]
struct StockAdjustmentRequest {
    delta: i64,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpBookkeepingApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url()).map_err(|e| {
            AppError::configuration(format!("Invalid API_URL {}: {}", config.base_url(), e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "API_URL cannot be used as a base: {}",
                config.base_url()
            )));
        }

        Ok(Self {
            client: config.create_client()?,
            base_url,
        })
    }

    /// Endpoint under the base URL; each segment is percent-encoded, so ids
    /// containing `/` or `?` stay a single segment
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Turn a non-success reply into `Rejected`, keeping the service's message
    async fn check(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => err.message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => body,
        };

        Err(AppError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(&[path]);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("GET {} failed: {}", url, e)))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to parse response from {}: {}", url, e)))
    }
}

#[async_trait]
impl BookkeepingApi for HttpBookkeepingApi {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        self.get_json("clients").await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.get_json("products").await
    }

    async fn submit_invoice(&self, payload: &InvoicePayload) -> Result<CreatedInvoice> {
        let url = self.url(&["invoices"]);
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("POST {} failed: {}", url, e)))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to parse created invoice: {}", e)))
    }

    async fn adjust_stock(&self, product_id: &ProductId, delta: i64) -> Result<StockLevel> {
        let url = self.url(&["products", product_id.as_str(), "stock"]);
        let response = self
            .client
            .patch(url.clone())
            .json(&StockAdjustmentRequest { delta })
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("PATCH {} failed: {}", url, e)))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to parse stock response: {}", e)))
    }

    async fn invoice_pdf(&self, invoice_id: &InvoiceId) -> Result<Vec<u8>> {
        let url = self.url(&["invoices", invoice_id.as_str(), "pdf"]);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("GET {} failed: {}", url, e)))?;

        let bytes = Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read PDF body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}
