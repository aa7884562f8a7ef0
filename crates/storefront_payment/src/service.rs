// --- File: crates/storefront_payment/src/service.rs ---
use chrono::Utc;
use std::time::Duration;
use storefront_common::services::{
    BoxFuture, PaymentAuthorization, PaymentReceipt, PaymentService,
};
use storefront_common::StorefrontError;
use storefront_config::PaymentConfig;
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_LATENCY_MS: u64 = 800;

/// Authorizes every well-formed request after a short delay. No money moves.
pub struct SimulatedPaymentService {
    latency: Duration,
}

impl SimulatedPaymentService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_config(config: Option<&PaymentConfig>) -> Self {
        let ms = config
            .and_then(|c| c.simulated_latency_ms)
            .unwrap_or(DEFAULT_LATENCY_MS);
        Self::new(Duration::from_millis(ms))
    }
}

impl Default for SimulatedPaymentService {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_LATENCY_MS))
    }
}

impl PaymentService for SimulatedPaymentService {
    fn authorize(
        &self,
        request: PaymentAuthorization,
    ) -> BoxFuture<'_, PaymentReceipt, StorefrontError> {
        Box::pin(async move {
            if request.amount_cents <= 0 {
                return Err(StorefrontError::ValidationError(
                    "amount must be positive".to_string(),
                ));
            }
            tokio::time::sleep(self.latency).await;

            let status = if request.method == "card" {
                "authorized"
            } else {
                "pending"
            };
            let receipt = PaymentReceipt {
                id: format!("pay_{}", Uuid::new_v4().simple()),
                status: status.to_string(),
                order_reference: request.order_reference,
                amount_cents: request.amount_cents,
                currency: request.currency,
                method: request.method,
                card_last4: request.card_last4,
                created_at: Utc::now(),
            };
            info!(
                "[Payment] {} {} for order {} ({} {}, card ****{})",
                receipt.status,
                receipt.id,
                receipt.order_reference,
                receipt.amount_cents,
                receipt.currency,
                receipt.card_last4.as_deref().unwrap_or("----")
            );
            Ok(receipt)
        })
    }
}
