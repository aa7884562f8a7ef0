// --- File: crates/storefront_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,   // "trace" | "debug" | "info" | "warn" | "error"
    pub log_dir: Option<String>, // Daily rolling file output when set
}

// --- Upstream REST API Config ---
// Products, appointments ("citas") and lists ("listas") live behind the same base URL.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String, // Mandatory
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub products_resource: Option<String>,
    pub appointments_resource: Option<String>,
    pub lists_resource: Option<String>,
    pub api_key: Option<String>, // "secret_from_env" -> STOREFRONT_SECRET_API_API_KEY
}

// --- Service Catalog entry for appointments ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServiceTypeConfig {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
}

// --- Appointment Scheduling Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SchedulingConfig {
    pub time_zone: Option<String>,       // IANA name, e.g. "Europe/Madrid"
    pub opening_time: Option<String>,    // "HH:MM"
    pub closing_time: Option<String>,    // "HH:MM"
    pub afternoon_start: Option<String>, // "HH:MM", splits morning/afternoon slots
    pub slot_minutes: Option<u32>,
    pub closed_weekday: Option<String>, // "Mon" .. "Sun"
    pub horizon_days: Option<u32>,
    /// Days after today that are blocked (e.g. [3, 10]).
    pub blocked_day_offsets: Option<Vec<u32>>,
    /// Explicit blocked dates in YYYY-MM-DD format.
    #[serde(default)]
    pub blocked_dates: Vec<String>,
    pub availability_threshold: Option<f64>,
    pub booking_latency_ms: Option<u64>,
    pub simulated_failure_rate: Option<f64>,
    /// When true, bookings are posted to the appointments REST resource.
    #[serde(default)]
    pub persist_bookings: bool,
    #[serde(default)]
    pub services: Vec<ServiceTypeConfig>,
}

// --- In-memory Session Limits ---
// Applies to booking wizard sessions and carts alike.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionConfig {
    pub ttl_minutes: Option<i64>,      // Idle time before a session is dropped
    pub max_sessions: Option<usize>,   // Per store; new sessions are refused beyond it
}

// --- Payment Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PaymentConfig {
    pub currency: Option<String>,
    /// Enabled methods: "card", "cash_on_pickup", "bank_transfer". Empty enables all.
    #[serde(default)]
    pub accepted_methods: Vec<String>,
    pub simulated_latency_ms: Option<u64>,
}

// --- Realtime Chat Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatConfig {
    pub database_url: String,       // Mandatory, e.g. https://<project>.firebaseio.com
    pub auth_token: Option<String>, // "secret_from_env" -> STOREFRONT_SECRET_CHAT_AUTH_TOKEN
    pub rooms_path: Option<String>,
    pub max_message_length: Option<usize>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: Option<LoggingConfig>,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_appointments: bool,
    #[serde(default)]
    pub use_catalog: bool,
    #[serde(default)]
    pub use_cart: bool,
    #[serde(default)]
    pub use_payment: bool,
    #[serde(default)]
    pub use_chat: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub sessions: Option<SessionConfig>,
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub scheduling: Option<SchedulingConfig>,
    #[serde(default)]
    pub payment: Option<PaymentConfig>,
    #[serde(default)]
    pub chat: Option<ChatConfig>,
}

/// Marker value replaced from the environment by [`crate::apply_env_overrides_from_marker`].
pub const SECRET_FROM_ENV: &str = "secret_from_env";

/// Returns the secret unless it is missing, empty or still the unresolved marker.
pub fn resolved_secret(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty() && *v != SECRET_FROM_ENV)
}

impl ApiConfig {
    pub fn api_key(&self) -> Option<&str> {
        resolved_secret(self.api_key.as_ref())
    }
}

impl ChatConfig {
    pub fn auth_token(&self) -> Option<&str> {
        resolved_secret(self.auth_token.as_ref())
    }
}
