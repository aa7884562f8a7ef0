// --- File: crates/storefront_catalog/src/error.rs ---
use axum::response::{IntoResponse, Response};
use storefront_common::{error_response, HttpStatusCode};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Products API request failed: {0}")]
    Upstream(String),

    #[error("Products API returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Products API returned an unexpected payload: {0}")]
    InvalidPayload(String),

    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Invalid product data: {0}")]
    InvalidProduct(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A newer search from the same session replaced this one.
    #[error("Search superseded by a newer query")]
    Cancelled,

    #[error("Catalog is disabled")]
    Disabled,
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::InvalidPayload(err.to_string())
        } else {
            CatalogError::Upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidPayload(err.to_string())
    }
}

impl HttpStatusCode for CatalogError {
    fn status_code(&self) -> u16 {
        match self {
            CatalogError::Upstream(_) => 502,
            CatalogError::UpstreamStatus { .. } => 502,
            CatalogError::InvalidPayload(_) => 502,
            CatalogError::NotFound(_) => 404,
            CatalogError::InvalidProduct(_) => 502,
            CatalogError::InvalidQuery(_) => 400,
            CatalogError::Cancelled => 409,
            CatalogError::Disabled => 503,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.to_string(), None)
    }
}
