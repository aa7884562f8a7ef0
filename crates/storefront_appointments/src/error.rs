// --- File: crates/storefront_appointments/src/error.rs ---
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use storefront_common::{error_response, HttpStatusCode, SessionLimitReached};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Appointment-specific error types.
#[derive(Error, Debug, Clone)]
pub enum AppointmentError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {0} is not available for appointments")]
    DateUnavailable(NaiveDate),

    #[error("Select a date first")]
    NoDateSelected,

    #[error("Select a time slot first")]
    NoSlotSelected,

    #[error("Time slot {0} is not available")]
    SlotUnavailable(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Service {service} does not end before closing when starting at {slot}")]
    ServiceDoesNotFit { service: String, slot: String },

    #[error("Date, time slot and service must be selected before booking")]
    IncompleteSelection,

    #[error("Please correct the highlighted fields")]
    ValidationFailed(ValidationErrors),

    #[error("A booking is already being processed")]
    BookingInProgress,

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The booking backend refused or failed to confirm the appointment.
    #[error("Booking could not be confirmed: {0}")]
    BookingRejected(String),

    #[error("Appointment service request failed: {0}")]
    Upstream(String),

    #[error("Booking session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Too many open booking sessions ({0}), try again later")]
    TooManySessions(usize),

    #[error("Appointments are disabled")]
    Disabled,
}

impl From<reqwest::Error> for AppointmentError {
    fn from(err: reqwest::Error) -> Self {
        AppointmentError::Upstream(err.to_string())
    }
}

impl From<SessionLimitReached> for AppointmentError {
    fn from(err: SessionLimitReached) -> Self {
        AppointmentError::TooManySessions(err.0)
    }
}

impl HttpStatusCode for AppointmentError {
    fn status_code(&self) -> u16 {
        match self {
            AppointmentError::InvalidDate(_) => 400,
            AppointmentError::DateUnavailable(_) => 409,
            AppointmentError::NoDateSelected => 409,
            AppointmentError::NoSlotSelected => 409,
            AppointmentError::SlotUnavailable(_) => 409,
            AppointmentError::UnknownService(_) => 400,
            AppointmentError::ServiceDoesNotFit { .. } => 409,
            AppointmentError::IncompleteSelection => 409,
            AppointmentError::ValidationFailed(_) => 422,
            AppointmentError::BookingInProgress => 409,
            AppointmentError::InvalidTransition(_) => 409,
            AppointmentError::BookingRejected(_) => 502,
            AppointmentError::Upstream(_) => 502,
            AppointmentError::SessionNotFound(_) => 404,
            AppointmentError::TooManySessions(_) => 503,
            AppointmentError::Disabled => 503,
        }
    }
}

impl IntoResponse for AppointmentError {
    fn into_response(self) -> Response {
        let fields = match &self {
            AppointmentError::ValidationFailed(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };
        error_response(self.status_code(), &self.to_string(), fields)
    }
}
