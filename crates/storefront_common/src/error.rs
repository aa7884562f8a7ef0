// --- File: crates/storefront_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Errors crossing the service traits in [`crate::services`].
///
/// Feature crates keep their own error enums for HTTP handlers; this type is
/// what payment services and realtime stores report back to them.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// A payload from an upstream could not be decoded
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Credentials were rejected or revoked
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The caller passed an invalid value
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },
}

/// A trait for converting errors to HTTP status codes.
///
/// Implemented by every feature crate error so handlers can build the
/// shared JSON envelope with [`crate::error_response`].
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for StorefrontError {
    fn status_code(&self) -> u16 {
        match self {
            StorefrontError::ParseError(_) => 502,
            StorefrontError::AuthError(_) => 401,
            StorefrontError::ValidationError(_) => 400,
            StorefrontError::ExternalServiceError { .. } => 502,
        }
    }
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> StorefrontError {
    StorefrontError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StorefrontError::ValidationError("bad".into()).status_code(), 400);
        assert_eq!(StorefrontError::AuthError("revoked".into()).status_code(), 401);
        assert_eq!(StorefrontError::ParseError("not json".into()).status_code(), 502);
        assert_eq!(external_service_error("products", "down").status_code(), 502);
    }

    #[test]
    fn test_external_service_error_message() {
        let err = external_service_error("Realtime DB", "timeout");
        assert_eq!(
            err.to_string(),
            "External service error: Realtime DB - timeout"
        );
    }
}
