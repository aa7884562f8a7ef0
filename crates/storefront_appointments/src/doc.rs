// File: crates/storefront_appointments/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::availability::{DaySlots, TimeSlot};
use crate::catalog::ServiceType;
use crate::gateway::BookingConfirmation;
use crate::handlers::{
    DatesResponse, SelectDateRequest, SelectServiceRequest, SelectSlotRequest, ServicesResponse,
    SessionResponse, SlotsQuery, SlotsResponse,
};
use crate::validation::{AppointmentDetails, ValidationErrors};
use crate::wizard::{WizardStep, WizardView};

#[utoipa::path(
    get,
    path = "/appointments/dates",
    responses(
        (status = 200, description = "Available and blocked dates from today", body = DatesResponse),
        (status = 503, description = "Appointments disabled")
    ),
    tag = "Appointments"
)]
fn doc_get_dates_handler() {}

#[utoipa::path(
    get,
    path = "/appointments/slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Morning and afternoon slots of the date", body = SlotsResponse),
        (status = 400, description = "Invalid date format")
    ),
    tag = "Appointments"
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    get,
    path = "/appointments/services",
    responses((status = 200, description = "Service catalog", body = ServicesResponse)),
    tag = "Appointments"
)]
fn doc_get_services_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions",
    responses(
        (status = 201, description = "New booking session", body = SessionResponse),
        (status = 503, description = "Session limit reached")
    ),
    tag = "Appointments"
)]
fn doc_create_session_handler() {}

#[utoipa::path(
    get,
    path = "/appointments/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Current wizard state", body = SessionResponse),
        (status = 404, description = "Unknown session")
    ),
    tag = "Appointments"
)]
fn doc_get_session_handler() {}

#[utoipa::path(
    delete,
    path = "/appointments/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Unknown session")
    ),
    tag = "Appointments"
)]
fn doc_delete_session_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/date",
    params(("id" = String, Path, description = "Session id")),
    request_body(content = SelectDateRequest, example = json!({ "date": "2025-06-10" })),
    responses(
        (status = 200, description = "Date selected, slots regenerated", body = SessionResponse),
        (status = 409, description = "Date not available")
    ),
    tag = "Appointments"
)]
fn doc_select_date_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/slot",
    params(("id" = String, Path, description = "Session id")),
    request_body(content = SelectSlotRequest, example = json!({ "slot_id": "09:30" })),
    responses(
        (status = 200, description = "Slot selected", body = SessionResponse),
        (status = 409, description = "No date selected or slot unavailable")
    ),
    tag = "Appointments"
)]
fn doc_select_slot_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/service",
    params(("id" = String, Path, description = "Session id")),
    request_body(content = SelectServiceRequest, example = json!({ "service_id": "consulta-general" })),
    responses(
        (status = 200, description = "Service selected", body = SessionResponse),
        (status = 400, description = "Unknown service"),
        (status = 409, description = "Service would end after closing time")
    ),
    tag = "Appointments"
)]
fn doc_select_service_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/details",
    params(("id" = String, Path, description = "Session id")),
    request_body = AppointmentDetails,
    responses((status = 200, description = "Contact details stored", body = SessionResponse)),
    tag = "Appointments"
)]
fn doc_update_details_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/submit",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Booking outcome, step is booked or booking_failed", body = SessionResponse),
        (status = 409, description = "Incomplete selection or booking already in progress"),
        (status = 422, description = "Contact details invalid, see error.fields",
         example = json!({
             "error": {
                 "message": "Please correct the highlighted fields",
                 "code": 422,
                 "fields": { "email": "Enter a valid email address" }
             }
         })
        )
    ),
    tag = "Appointments"
)]
fn doc_submit_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/back",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Moved one step back", body = SessionResponse),
        (status = 409, description = "Cannot go back from the current step")
    ),
    tag = "Appointments"
)]
fn doc_back_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/sessions/{id}/reset",
    params(("id" = String, Path, description = "Session id")),
    responses((status = 200, description = "Wizard cleared", body = SessionResponse)),
    tag = "Appointments"
)]
fn doc_reset_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_dates_handler,
        doc_get_slots_handler,
        doc_get_services_handler,
        doc_create_session_handler,
        doc_get_session_handler,
        doc_delete_session_handler,
        doc_select_date_handler,
        doc_select_slot_handler,
        doc_select_service_handler,
        doc_update_details_handler,
        doc_submit_handler,
        doc_back_handler,
        doc_reset_handler
    ),
    components(
        schemas(
            DatesResponse,
            SlotsQuery,
            SlotsResponse,
            ServicesResponse,
            SessionResponse,
            SelectDateRequest,
            SelectSlotRequest,
            SelectServiceRequest,
            AppointmentDetails,
            ValidationErrors,
            WizardStep,
            WizardView,
            TimeSlot,
            DaySlots,
            ServiceType,
            BookingConfirmation
        )
    ),
    tags(
        (name = "Appointments", description = "Pickup appointment booking API")
    ),
    servers(
        (url = "/api", description = "Storefront API server")
    )
)]
pub struct AppointmentsApiDoc;
