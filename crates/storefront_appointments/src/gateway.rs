// --- File: crates/storefront_appointments/src/gateway.rs ---
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use storefront_common::{join_url, HTTP_CLIENT};
use storefront_config::{ApiConfig, SchedulingConfig};
use tracing::{info, warn};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::catalog::ServiceType;
use crate::error::AppointmentError;
use crate::validation::AppointmentDetails;
use crate::wizard::BookingWizard;

pub const DEFAULT_BOOKING_LATENCY_MS: u64 = 1500;
pub const DEFAULT_APPOINTMENTS_RESOURCE: &str = "citas";

// --- Data Structures ---

/// Everything needed to commit an appointment, produced by the wizard.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-06-10"))]
    pub date: NaiveDate,
    pub slot_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub start: DateTime<FixedOffset>,
    /// Slot start plus the service duration.
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub end: DateTime<FixedOffset>,
    pub service: ServiceType,
    pub details: AppointmentDetails,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingConfirmation {
    #[cfg_attr(feature = "openapi", schema(example = "0b6f1c1e-8f0e-4a57-9c3a-6c1f3d1b9a11"))]
    pub reference: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date"))]
    pub date: NaiveDate,
    pub slot_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub start: DateTime<FixedOffset>,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub end: DateTime<FixedOffset>,
    pub service_id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Consulta general"))]
    pub service_name: String,
    pub customer_name: String,
    pub customer_email: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub created_at: DateTime<Utc>,
}

impl BookingConfirmation {
    pub fn from_request(request: &BookingRequest, reference: String, created_at: DateTime<Utc>) -> Self {
        Self {
            reference,
            date: request.date,
            slot_id: request.slot_id.clone(),
            start: request.start,
            end: request.end,
            service_id: request.service.id.clone(),
            service_name: request.service.name.clone(),
            customer_name: request.details.name.trim().to_string(),
            customer_email: request.details.email.trim().to_string(),
            created_at,
        }
    }

    /// "09:30 - 10:00"
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

// --- Gateways ---

/// Commits a booking somewhere. Implementations must be object safe.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn commit(&self, request: BookingRequest) -> Result<BookingConfirmation, AppointmentError>;
}

/// Stands in for a booking backend: waits a fixed latency, then confirms.
/// Fails with probability `failure_rate` (0 by default) for demos.
#[derive(Debug, Clone)]
pub struct SimulatedBookingGateway {
    latency: Duration,
    failure_rate: f64,
}

impl Default for SimulatedBookingGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_BOOKING_LATENCY_MS), 0.0)
    }
}

impl SimulatedBookingGateway {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: Option<&SchedulingConfig>) -> Self {
        let latency_ms = config
            .and_then(|cfg| cfg.booking_latency_ms)
            .unwrap_or(DEFAULT_BOOKING_LATENCY_MS);
        let failure_rate = config
            .and_then(|cfg| cfg.simulated_failure_rate)
            .unwrap_or(0.0);
        Self::new(Duration::from_millis(latency_ms), failure_rate)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

/// Uniform value in [0, 1) from the random bits of a v4 UUID.
fn random_unit() -> f64 {
    let bits = Uuid::new_v4().as_u128() as u64 & ((1u64 << 53) - 1);
    bits as f64 / (1u64 << 53) as f64
}

#[async_trait]
impl BookingGateway for SimulatedBookingGateway {
    async fn commit(&self, request: BookingRequest) -> Result<BookingConfirmation, AppointmentError> {
        tokio::time::sleep(self.latency).await;

        if random_unit() < self.failure_rate {
            warn!(
                "[Appointments] Simulated booking failure for {} {}",
                request.date, request.slot_id
            );
            return Err(AppointmentError::BookingRejected(
                "the appointment could not be confirmed, please try again".to_string(),
            ));
        }

        let confirmation =
            BookingConfirmation::from_request(&request, Uuid::new_v4().to_string(), Utc::now());
        info!(
            "[Appointments] Booked {} on {} at {} (ref {})",
            confirmation.service_name, confirmation.date, confirmation.slot_id, confirmation.reference
        );
        Ok(confirmation)
    }
}

/// Body posted to the appointments resource.
#[derive(Serialize, Debug)]
struct AppointmentRecord<'a> {
    date: String,
    time: &'a str,
    start: String,
    end: String,
    service_id: &'a str,
    service_name: &'a str,
    duration_minutes: u32,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    notes: &'a str,
}

/// Posts appointments to the REST API's appointments resource.
#[derive(Debug, Clone)]
pub struct RestBookingGateway {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl RestBookingGateway {
    pub fn new(client: Client, api: &ApiConfig) -> Self {
        let resource = api
            .appointments_resource
            .as_deref()
            .unwrap_or(DEFAULT_APPOINTMENTS_RESOURCE);
        Self {
            client,
            url: join_url(&api.base_url, resource),
            api_key: api.api_key().map(str::to_string),
        }
    }

    /// Uses the shared HTTP client.
    pub fn from_config(api: &ApiConfig) -> Self {
        Self::new(HTTP_CLIENT.clone(), api)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BookingGateway for RestBookingGateway {
    async fn commit(&self, request: BookingRequest) -> Result<BookingConfirmation, AppointmentError> {
        let record = AppointmentRecord {
            date: request.date.format("%Y-%m-%d").to_string(),
            time: &request.slot_id,
            start: request.start.to_rfc3339(),
            end: request.end.to_rfc3339(),
            service_id: &request.service.id,
            service_name: &request.service.name,
            duration_minutes: request.service.duration_minutes,
            name: request.details.name.trim(),
            email: request.details.email.trim(),
            phone: request.details.phone.trim(),
            notes: &request.details.notes,
        };

        info!("[Appointments] Posting appointment to {}", self.url);
        let mut builder = self.client.post(&self.url).json(&record);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            warn!(
                "[Appointments] Appointments API rejected booking with HTTP {}: {}",
                status, body_text
            );
            return Err(AppointmentError::BookingRejected(format!(
                "appointments API returned HTTP {}",
                status.as_u16()
            )));
        }

        // Prefer the id assigned upstream; fall back to a local reference.
        let reference = serde_json::from_str::<Value>(&body_text)
            .ok()
            .and_then(|body| match body.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(BookingConfirmation::from_request(&request, reference, Utc::now()))
    }
}

/// Drives a wizard through a gateway commit.
pub struct BookingFlow<G: BookingGateway> {
    gateway: G,
}

impl<G: BookingGateway> BookingFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Begins the submission, commits it and records the outcome on the wizard.
    /// Validation and selection errors are returned before anything is sent.
    /// A gateway failure leaves the wizard in its failed step and is returned too.
    pub async fn submit(
        &self,
        wizard: &mut BookingWizard,
    ) -> Result<BookingConfirmation, AppointmentError> {
        let request = wizard.begin_submission()?;
        let ticket = wizard.pending_submission().unwrap_or_default();
        let outcome = self.gateway.commit(request).await;
        wizard.complete_submission(ticket, outcome.clone())?;
        outcome
    }
}
