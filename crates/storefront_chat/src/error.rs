// --- File: crates/storefront_chat/src/error.rs ---
use axum::response::{IntoResponse, Response};
use storefront_common::{error_response, HttpStatusCode, StorefrontError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid room name: {0}")]
    InvalidRoom(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Message {0} not found")]
    NotFound(String),

    /// Any failure reported by the realtime store
    #[error("Realtime database error: {0}")]
    Store(#[from] StorefrontError),

    #[error("Chat is disabled")]
    Disabled,
}

impl HttpStatusCode for ChatError {
    fn status_code(&self) -> u16 {
        match self {
            ChatError::InvalidRoom(_) | ChatError::InvalidMessage(_) => 400,
            ChatError::NotFound(_) => 404,
            ChatError::Store(_) => 502,
            ChatError::Disabled => 503,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.to_string(), None)
    }
}
