// --- File: crates/storefront_payment/src/routes.rs ---

use axum::{routing::post, Router};
use std::sync::Arc;
use storefront_common::services::PaymentService;
use storefront_config::AppConfig;

use crate::handlers::{checkout_handler, validate_card_handler, PaymentState};
use crate::service::SimulatedPaymentService;

/// Creates a router containing all payment routes (paths relative to /api).
pub fn routes(config: Arc<AppConfig>) -> Router {
    let service = Arc::new(SimulatedPaymentService::from_config(config.payment.as_ref()));
    routes_with_service(config, service)
}

pub fn routes_with_service(config: Arc<AppConfig>, service: Arc<dyn PaymentService>) -> Router {
    let state = Arc::new(PaymentState { config, service });
    Router::new()
        .route("/payment/validate-card", post(validate_card_handler))
        .route("/payment/checkout", post(checkout_handler))
        .with_state(state)
}
