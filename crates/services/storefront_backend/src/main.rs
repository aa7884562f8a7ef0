// File: services/storefront_backend/src/main.rs
use std::sync::Arc;
use storefront_common::init_from_config;
use storefront_config::load_config;
use tokio::net::TcpListener;
use tracing::info;

mod app;
mod service_factory;

use service_factory::StorefrontServiceFactory;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    // Keeps the file writer alive until shutdown
    let _log_guard = init_from_config(config.logging.as_ref());

    let factory = Arc::new(StorefrontServiceFactory::new(config.clone()));
    let app = app::build_app(config.clone(), factory);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
