// --- File: crates/storefront_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! These traits decouple the feature crates from concrete backends (the
//! realtime database, the payment processor) so handlers can be exercised
//! against in-memory implementations.

use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::StorefrontError;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for realtime key-value database operations.
///
/// Paths are slash separated (`chats/general/messages`). Values are JSON.
pub trait RealtimeStore: Send + Sync {
    /// Replace the value at `path`.
    fn write(&self, path: &str, value: Value) -> BoxFuture<'_, (), StorefrontError>;

    /// Append `value` under `path` with a generated, time-ordered key. Returns the key.
    fn push(&self, path: &str, value: Value) -> BoxFuture<'_, String, StorefrontError>;

    /// Merge the fields of `value` into the object at `path`.
    fn update(&self, path: &str, value: Value) -> BoxFuture<'_, (), StorefrontError>;

    /// Remove the value at `path`.
    fn delete(&self, path: &str) -> BoxFuture<'_, (), StorefrontError>;

    /// Read the value at `path`; `Value::Null` when absent.
    fn get(&self, path: &str) -> BoxFuture<'_, Value, StorefrontError>;

    /// Subscribe to changes below `path`.
    fn subscribe(&self, path: &str) -> BoxStream<'static, Result<RealtimeEvent, StorefrontError>>;
}

/// A change notification from the realtime database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// "put" replaces the data at `path`, "patch" merges into it.
    pub kind: RealtimeEventKind,
    /// Path relative to the subscribed location ("/" for the location itself).
    pub path: String,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealtimeEventKind {
    Put,
    Patch,
}

/// A trait for payment service operations.
///
/// Implementations never move real money; see the payment crate.
pub trait PaymentService: Send + Sync {
    /// Authorize a payment for an order.
    fn authorize(
        &self,
        request: PaymentAuthorization,
    ) -> BoxFuture<'_, PaymentReceipt, StorefrontError>;
}

/// A factory for creating service instances.
///
/// Returns `None` for services that are disabled or unconfigured.
pub trait ServiceFactory: Send + Sync {
    fn payment_service(&self) -> Option<Arc<dyn PaymentService>>;

    fn realtime_store(&self) -> Option<Arc<dyn RealtimeStore>>;
}

/// Data passed to [`PaymentService::authorize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// Caller supplied order reference (e.g. the cart id).
    pub order_reference: String,
    /// Amount in the smallest currency unit.
    pub amount_cents: i64,
    pub currency: String,
    /// "card", "cash_on_pickup" or "bank_transfer".
    pub method: String,
    /// Last four digits when paying by card.
    pub card_last4: Option<String>,
}

/// Represents the result of a payment authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: String,
    /// "authorized" for cards, "pending" for pay-later methods.
    pub status: String,
    pub order_reference: String,
    pub amount_cents: i64,
    pub currency: String,
    pub method: String,
    pub card_last4: Option<String>,
    pub created_at: DateTime<Utc>,
}
