// --- File: crates/storefront_catalog/src/routes.rs ---

use axum::{routing::get, Router};
use std::sync::Arc;
use storefront_config::AppConfig;
use tracing::warn;

use crate::client::ProductApi;
use crate::handlers::{
    get_lists_handler, get_product_handler, list_products_handler, search_products_handler,
    CatalogState,
};
use crate::search::SearchCoordinator;

pub fn build_state(config: Arc<AppConfig>, api: ProductApi) -> Arc<CatalogState> {
    let api = Arc::new(api);
    Arc::new(CatalogState {
        config,
        search: SearchCoordinator::new(api.clone()),
        api,
    })
}

/// Creates a router containing all catalog routes (paths relative to /api).
/// Returns an empty router when the API section is missing.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let Some(api_config) = config.api.as_ref() else {
        warn!("[Catalog] API configuration missing, catalog routes not mounted");
        return Router::new();
    };
    let currency = config.payment.as_ref().and_then(|p| p.currency.as_deref());
    let api = ProductApi::from_config(api_config, currency);
    routes_with_state(build_state(config.clone(), api))
}

pub fn routes_with_state(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/products", get(list_products_handler))
        .route("/products/search", get(search_products_handler))
        .route("/products/{id}", get(get_product_handler))
        .route("/lists", get(get_lists_handler))
        .with_state(state)
}
