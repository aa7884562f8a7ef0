//! Feature flag handling for the storefront services.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `appointments`: Pickup appointment scheduling
//! - `catalog`: Product listing and search
//! - `cart`: Cart sessions
//! - `payment`: Payment step (simulated)
//! - `chat`: Realtime chat
//!
//! ## Usage
//!
//! Feature flags are used in two ways:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values (`use_*`)
//!
//! A feature is only served when both are on and, where the feature needs
//! one, its configuration section is present.

#[allow(unused_imports)] // only used by the feature-gated helpers
use {std::sync::Arc, storefront_config::AppConfig};

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Appointments fall back to built-in scheduling defaults, so no section is required.
#[cfg(feature = "appointments")]
pub fn is_appointments_enabled(config: &Arc<AppConfig>) -> bool {
    config.use_appointments
}

/// The catalog needs the upstream `[api]` section.
#[cfg(feature = "catalog")]
pub fn is_catalog_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_catalog, config.api.as_ref())
}

#[cfg(feature = "cart")]
pub fn is_cart_enabled(config: &Arc<AppConfig>) -> bool {
    config.use_cart
}

#[cfg(feature = "payment")]
pub fn is_payment_enabled(config: &Arc<AppConfig>) -> bool {
    config.use_payment
}

/// Chat needs the `[chat]` section with the realtime database URL.
#[cfg(feature = "chat")]
pub fn is_chat_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config.use_chat, config.chat.as_ref())
}
