// --- File: crates/storefront_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod routes; // Route definitions
pub mod services; // Service abstractions
pub mod sessions; // Expiring in-memory session maps

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{external_service_error, HttpStatusCode, StorefrontError};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, create_streaming_client, join_url, HTTP_CLIENT},
    error_response,
};

// Re-export logging utilities for easier access
pub use logging::{init_from_config, init_with_level};

pub use sessions::{SessionLimitReached, SessionMap};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

// Conditionally re-export feature-specific functions
#[cfg(feature = "appointments")]
pub use features::is_appointments_enabled;

#[cfg(feature = "catalog")]
pub use features::is_catalog_enabled;

#[cfg(feature = "cart")]
pub use features::is_cart_enabled;

#[cfg(feature = "payment")]
pub use features::is_payment_enabled;

#[cfg(feature = "chat")]
pub use features::is_chat_enabled;
