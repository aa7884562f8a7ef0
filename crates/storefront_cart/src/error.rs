// --- File: crates/storefront_cart/src/error.rs ---
use axum::response::{IntoResponse, Response};
use storefront_common::{error_response, HttpStatusCode, SessionLimitReached};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone)]
pub enum CartError {
    #[error("Cart {0} not found")]
    NotFound(Uuid),

    #[error("Invalid cart item: {0}")]
    InvalidItem(String),

    #[error("Too many open carts ({0}), try again later")]
    TooManyCarts(usize),

    #[error("Cart is disabled")]
    Disabled,
}

impl HttpStatusCode for CartError {
    fn status_code(&self) -> u16 {
        match self {
            CartError::NotFound(_) => 404,
            CartError::InvalidItem(_) => 400,
            CartError::TooManyCarts(_) => 503,
            CartError::Disabled => 503,
        }
    }
}

impl From<SessionLimitReached> for CartError {
    fn from(err: SessionLimitReached) -> Self {
        CartError::TooManyCarts(err.0)
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.to_string(), None)
    }
}
