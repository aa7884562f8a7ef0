// --- File: crates/storefront_cart/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use storefront_config::AppConfig;

use crate::handlers::{
    apply_action_handler, create_cart_handler, delete_cart_handler, get_cart_handler, CartStore,
};

/// Creates a router containing all cart routes (paths relative to /api).
pub fn routes(config: Arc<AppConfig>) -> Router {
    routes_with_store(Arc::new(CartStore::new(config)))
}

pub fn routes_with_store(store: Arc<CartStore>) -> Router {
    Router::new()
        .route("/cart", post(create_cart_handler))
        .route("/cart/{id}", get(get_cart_handler).delete(delete_cart_handler))
        .route("/cart/{id}/actions", post(apply_action_handler))
        .with_state(store)
}
