//! Realtime chat for the storefront
//!
//! This crate stores chat rooms in a realtime key-value database reached
//! through its REST interface, and exposes them over HTTP.
//!
//! # Features
//!
//! - `PUT`/`POST`/`PATCH`/`DELETE`/`GET` on any database path
//! - Change subscriptions decoded from the database's event stream
//! - Message validation (trimmed, non-empty, bounded length)
//! - Integration with Axum for HTTP API endpoints
//! - OpenAPI/Swagger documentation (with the `openapi` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_config::AppConfig;
//! use storefront_chat::routes;
//! use std::sync::Arc;
//!
//! async fn setup_app() {
//!     let config = Arc::new(AppConfig::default());
//!     let app = routes(config);
//!     // Use the app with your Axum server
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /chat/rooms/{room}/messages` - List messages
//! - `POST /chat/rooms/{room}/messages` - Post a message
//! - `DELETE /chat/rooms/{room}/messages/{id}` - Delete a message
//! - `GET /chat/rooms/{room}/events` - Stream changes as server-sent events

pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
#[cfg(test)]
mod service_test;
#[cfg(test)]
mod test_store;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
pub use client::{RealtimeDatabaseClient, RealtimeError};
pub use error::ChatError;
pub use service::ChatService;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::ChatApiDoc;
}
