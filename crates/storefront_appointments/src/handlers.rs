// File: crates/storefront_appointments/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_common::SessionMap;
use storefront_config::AppConfig;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::availability::{AvailabilityCalendar, AvailabilityRules, Clock, TimeSlot};
use crate::catalog::{ServiceCatalog, ServiceType};
use crate::error::AppointmentError;
use crate::gateway::BookingGateway;
use crate::validation::AppointmentDetails;
use crate::wizard::{BookingWizard, WizardAction, WizardContext, WizardView};

// Shared state for the appointment handlers
pub struct AppointmentsState {
    pub config: Arc<AppConfig>,
    pub rules: Arc<AvailabilityRules>,
    pub catalog: ServiceCatalog,
    pub gateway: Arc<dyn BookingGateway>,
    pub clock: Arc<dyn Clock>,
    /// Wizards idle past the session TTL are dropped.
    pub sessions: Mutex<SessionMap<Uuid, BookingWizard>>,
}

impl AppointmentsState {
    /// The calendar is rebuilt from the current instant on every request.
    fn calendar(&self) -> (AvailabilityCalendar, DateTime<Utc>) {
        let now = self.clock.now();
        (AvailabilityCalendar::for_instant(self.rules.clone(), now), now)
    }

    fn ensure_enabled(&self) -> Result<(), AppointmentError> {
        if self.config.use_appointments {
            Ok(())
        } else {
            Err(AppointmentError::Disabled)
        }
    }
}

// --- Request / Response types ---

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DatesResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date"))]
    pub today: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub available_dates: Vec<NaiveDate>,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub blocked_dates: Vec<NaiveDate>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-06-10"))]
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotsResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date"))]
    pub date: NaiveDate,
    /// False when the date is blocked, closed or outside the horizon; both lists are then empty.
    pub date_available: bool,
    pub morning: Vec<TimeSlot>,
    pub afternoon: Vec<TimeSlot>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServicesResponse {
    pub services: Vec<ServiceType>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub wizard: WizardView,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectDateRequest {
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-06-10"))]
    pub date: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectSlotRequest {
    #[cfg_attr(feature = "openapi", schema(example = "09:30"))]
    pub slot_id: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectServiceRequest {
    #[cfg_attr(feature = "openapi", schema(example = "consulta-general"))]
    pub service_id: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppointmentError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppointmentError::InvalidDate(raw.to_string()))
}

// --- Catalog handlers ---

/// Available and blocked dates from today.
pub async fn get_dates_handler(
    State(state): State<Arc<AppointmentsState>>,
) -> Result<Json<DatesResponse>, AppointmentError> {
    state.ensure_enabled()?;
    let (calendar, _) = state.calendar();
    Ok(Json(DatesResponse {
        today: calendar.today(),
        available_dates: calendar.available_dates(),
        blocked_dates: calendar.blocked_dates(),
    }))
}

/// Morning and afternoon slots of a date.
pub async fn get_slots_handler(
    State(state): State<Arc<AppointmentsState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppointmentError> {
    state.ensure_enabled()?;
    let date = parse_date(&query.date)?;
    let (calendar, now) = state.calendar();

    if !calendar.is_date_available(date) {
        return Ok(Json(SlotsResponse {
            date,
            date_available: false,
            morning: Vec::new(),
            afternoon: Vec::new(),
        }));
    }

    let slots = calendar.generate_time_slots(date, now);
    Ok(Json(SlotsResponse {
        date,
        date_available: true,
        morning: slots.morning,
        afternoon: slots.afternoon,
    }))
}

pub async fn get_services_handler(
    State(state): State<Arc<AppointmentsState>>,
) -> Result<Json<ServicesResponse>, AppointmentError> {
    state.ensure_enabled()?;
    Ok(Json(ServicesResponse {
        services: state.catalog.all().to_vec(),
    }))
}

// --- Wizard session handlers ---

pub async fn create_session_handler(
    State(state): State<Arc<AppointmentsState>>,
) -> Result<(StatusCode, Json<SessionResponse>), AppointmentError> {
    state.ensure_enabled()?;
    let session_id = Uuid::new_v4();
    let wizard = BookingWizard::new();
    let view = wizard.view();
    state
        .sessions
        .lock()
        .await
        .insert(session_id, wizard, state.clock.now())?;
    info!("[Appointments] Created booking session {}", session_id);
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            wizard: view,
        }),
    ))
}

pub async fn get_session_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    state.ensure_enabled()?;
    let mut sessions = state.sessions.lock().await;
    let wizard = sessions
        .get(&session_id, state.clock.now())
        .ok_or(AppointmentError::SessionNotFound(session_id))?;
    Ok(Json(SessionResponse {
        session_id,
        wizard: wizard.view(),
    }))
}

pub async fn delete_session_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppointmentError> {
    state.ensure_enabled()?;
    state
        .sessions
        .lock()
        .await
        .remove(&session_id, state.clock.now())
        .ok_or(AppointmentError::SessionNotFound(session_id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_action(
    state: &AppointmentsState,
    session_id: Uuid,
    action: WizardAction,
) -> Result<Json<SessionResponse>, AppointmentError> {
    state.ensure_enabled()?;
    let (calendar, now) = state.calendar();
    let ctx = WizardContext {
        calendar: &calendar,
        catalog: &state.catalog,
        now,
    };

    let mut sessions = state.sessions.lock().await;
    let wizard = sessions
        .get_mut(&session_id, now)
        .ok_or(AppointmentError::SessionNotFound(session_id))?;
    wizard.apply(action, &ctx)?;
    Ok(Json(SessionResponse {
        session_id,
        wizard: wizard.view(),
    }))
}

pub async fn select_date_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SelectDateRequest>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    let date = parse_date(&payload.date)?;
    apply_action(&state, session_id, WizardAction::SelectDate { date }).await
}

pub async fn select_slot_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SelectSlotRequest>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    apply_action(
        &state,
        session_id,
        WizardAction::SelectSlot {
            slot_id: payload.slot_id,
        },
    )
    .await
}

pub async fn select_service_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SelectServiceRequest>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    apply_action(
        &state,
        session_id,
        WizardAction::SelectService {
            service_id: payload.service_id,
        },
    )
    .await
}

pub async fn update_details_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
    Json(details): Json<AppointmentDetails>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    apply_action(&state, session_id, WizardAction::UpdateDetails { details }).await
}

pub async fn back_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    apply_action(&state, session_id, WizardAction::Back).await
}

pub async fn reset_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    apply_action(&state, session_id, WizardAction::Reset).await
}

/// Submits the booking. The session lock is released while the gateway
/// commit is in flight; a failed commit is reported through the wizard view.
pub async fn submit_handler(
    State(state): State<Arc<AppointmentsState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppointmentError> {
    state.ensure_enabled()?;

    let (ticket, request) = {
        let mut sessions = state.sessions.lock().await;
        let wizard = sessions
            .get_mut(&session_id, state.clock.now())
            .ok_or(AppointmentError::SessionNotFound(session_id))?;
        let request = wizard.begin_submission()?;
        (wizard.pending_submission().unwrap_or_default(), request)
    };

    info!(
        "[Appointments] Session {} submitting {} on {} at {}",
        session_id, request.service.id, request.date, request.slot_id
    );
    let outcome = state.gateway.commit(request).await;
    if let Err(e) = &outcome {
        warn!("[Appointments] Booking for session {} failed: {}", session_id, e);
    }

    let mut sessions = state.sessions.lock().await;
    let wizard = sessions
        .get_mut(&session_id, state.clock.now())
        .ok_or(AppointmentError::SessionNotFound(session_id))?;
    wizard.complete_submission(ticket, outcome)?;
    Ok(Json(SessionResponse {
        session_id,
        wizard: wizard.view(),
    }))
}
