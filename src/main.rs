use std::sync::Arc;

use billbook::api::HttpBookkeepingApi;
use billbook::catalog::CatalogService;
use billbook::config::Config;
use billbook::core::telemetry;

#[tokio::main]
async fn main() -> billbook::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    telemetry::init_tracing(&config.app.log_level)?;

    tracing::info!("Starting billbook");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Bookkeeping service: {}", config.api.base_url());

    let api = Arc::new(HttpBookkeepingApi::new(&config.api)?);
    let catalog = CatalogService::new(api).load().await?;

    tracing::info!(
        clients = catalog.clients().len(),
        products = catalog.products().len(),
        due_days = config.invoicing.due_days,
        "Bookkeeping service reachable"
    );

    Ok(())
}
