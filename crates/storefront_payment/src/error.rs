// --- File: crates/storefront_payment/src/error.rs ---
use axum::response::{IntoResponse, Response};
use storefront_common::{error_response, HttpStatusCode};
use thiserror::Error;

use crate::logic::FieldErrors;

/// Payment-specific error types.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// One or more card fields failed validation
    #[error("Card details are invalid")]
    InvalidCard(FieldErrors),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Method not enabled in the payment configuration
    #[error("Payment method not accepted: {0}")]
    MethodNotAccepted(String),

    /// The payment service failed to authorize
    #[error("Payment processing failed: {0}")]
    Processor(String),

    #[error("Payments are disabled")]
    Disabled,
}

impl HttpStatusCode for PaymentError {
    fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidCard(_) => 422,
            PaymentError::InvalidAmount(_) => 400,
            PaymentError::MethodNotAccepted(_) => 400,
            PaymentError::Processor(_) => 502,
            PaymentError::Disabled => 503,
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let fields = match &self {
            PaymentError::InvalidCard(fields) => serde_json::to_value(fields).ok(),
            _ => None,
        };
        error_response(self.status_code(), &self.to_string(), fields)
    }
}
