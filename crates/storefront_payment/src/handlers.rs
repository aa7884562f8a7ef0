// --- File: crates/storefront_payment/src/handlers.rs ---
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_common::services::{PaymentAuthorization, PaymentReceipt, PaymentService};
use storefront_config::AppConfig;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::PaymentError;
use crate::logic::{detect_brand, validate_card, CardBrand, CardDetails, FieldErrors, PaymentMethod};

pub const DEFAULT_CURRENCY: &str = "EUR";

pub struct PaymentState {
    pub config: Arc<AppConfig>,
    pub service: Arc<dyn PaymentService>,
}

impl PaymentState {
    fn ensure_enabled(&self) -> Result<(), PaymentError> {
        if self.config.use_payment {
            Ok(())
        } else {
            Err(PaymentError::Disabled)
        }
    }

    /// An empty list in the configuration accepts every method.
    fn ensure_accepted(&self, method: &PaymentMethod) -> Result<(), PaymentError> {
        let accepted = self
            .config
            .payment
            .as_ref()
            .map(|p| p.accepted_methods.as_slice())
            .unwrap_or_default();
        if accepted.is_empty() || accepted.iter().any(|m| m == method.as_str()) {
            Ok(())
        } else {
            Err(PaymentError::MethodNotAccepted(method.as_str().to_string()))
        }
    }

    fn currency(&self) -> String {
        self.config
            .payment
            .as_ref()
            .and_then(|p| p.currency.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CardValidationResponse {
    pub valid: bool,
    pub brand: CardBrand,
    pub errors: FieldErrors,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CheckoutRequest {
    /// Cart id or any caller reference.
    #[cfg_attr(feature = "openapi", schema(example = "5f0c3e1a-9d1b-4a4e-8d4c-3c2f1b0a9e8d"))]
    pub order_reference: String,
    #[cfg_attr(feature = "openapi", schema(example = 2500))]
    pub amount_cents: i64,
    /// Defaults to the configured currency.
    pub currency: Option<String>,
    pub method: PaymentMethod,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CheckoutResponse {
    pub id: String,
    pub status: String,
    pub order_reference: String,
    pub amount_cents: i64,
    pub currency: String,
    pub method: String,
    pub card_last4: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentReceipt> for CheckoutResponse {
    fn from(r: PaymentReceipt) -> Self {
        Self {
            id: r.id,
            status: r.status,
            order_reference: r.order_reference,
            amount_cents: r.amount_cents,
            currency: r.currency,
            method: r.method,
            card_last4: r.card_last4,
            created_at: r.created_at,
        }
    }
}

/// Reports per-field problems without charging anything.
pub async fn validate_card_handler(
    State(state): State<Arc<PaymentState>>,
    Json(details): Json<CardDetails>,
) -> Result<Json<CardValidationResponse>, PaymentError> {
    state.ensure_enabled()?;
    let today = Utc::now().date_naive();
    let response = match validate_card(&details, today) {
        Ok(brand) => CardValidationResponse {
            valid: true,
            brand,
            errors: FieldErrors::new(),
        },
        Err(errors) => CardValidationResponse {
            valid: false,
            brand: detect_brand(&details.number),
            errors,
        },
    };
    Ok(Json(response))
}

pub async fn checkout_handler(
    State(state): State<Arc<PaymentState>>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), PaymentError> {
    state.ensure_enabled()?;
    if payload.amount_cents <= 0 {
        return Err(PaymentError::InvalidAmount(
            "amount_cents must be positive".to_string(),
        ));
    }
    state.ensure_accepted(&payload.method)?;

    let card_last4 = match &payload.method {
        PaymentMethod::Card(card) => {
            validate_card(card, Utc::now().date_naive()).map_err(PaymentError::InvalidCard)?;
            card.last4()
        }
        PaymentMethod::CashOnPickup | PaymentMethod::BankTransfer => None,
    };

    let authorization = PaymentAuthorization {
        order_reference: payload.order_reference,
        amount_cents: payload.amount_cents,
        currency: payload.currency.unwrap_or_else(|| state.currency()),
        method: payload.method.as_str().to_string(),
        card_last4,
    };
    info!(
        "[Payment] Checkout for order {} via {}",
        authorization.order_reference, authorization.method
    );

    let receipt = state
        .service
        .authorize(authorization)
        .await
        .map_err(|e| {
            warn!("[Payment] Authorization failed: {}", e);
            PaymentError::Processor(e.to_string())
        })?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}
