// --- File: crates/storefront_appointments/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use storefront_common::SessionMap;
use storefront_config::AppConfig;
use tokio::sync::Mutex;
use tracing::info;

use crate::availability::{AvailabilityRules, Clock, SystemClock};
use crate::catalog::ServiceCatalog;
use crate::gateway::{BookingGateway, RestBookingGateway, SimulatedBookingGateway};
use crate::handlers::{
    back_handler, create_session_handler, delete_session_handler, get_dates_handler,
    get_services_handler, get_session_handler, get_slots_handler, reset_handler,
    select_date_handler, select_service_handler, select_slot_handler, submit_handler,
    update_details_handler, AppointmentsState,
};

/// Picks the REST gateway when bookings are persisted and an API is configured.
fn select_gateway(config: &AppConfig) -> Arc<dyn BookingGateway> {
    let scheduling = config.scheduling.as_ref();
    match (scheduling.map(|s| s.persist_bookings), config.api.as_ref()) {
        (Some(true), Some(api)) => {
            let gateway = RestBookingGateway::from_config(api);
            info!("[Appointments] Persisting bookings to {}", gateway.url());
            Arc::new(gateway)
        }
        _ => {
            let gateway = SimulatedBookingGateway::from_config(scheduling);
            info!(
                "[Appointments] Using simulated bookings ({} ms latency)",
                gateway.latency().as_millis()
            );
            Arc::new(gateway)
        }
    }
}

/// Builds the shared state from config.
pub fn build_state(
    config: Arc<AppConfig>,
    gateway: Arc<dyn BookingGateway>,
    clock: Arc<dyn Clock>,
) -> Arc<AppointmentsState> {
    let scheduling = config.scheduling.as_ref();
    Arc::new(AppointmentsState {
        sessions: Mutex::new(SessionMap::from_config(config.sessions.as_ref())),
        rules: Arc::new(AvailabilityRules::from_config(scheduling)),
        catalog: ServiceCatalog::from_config(scheduling),
        config,
        gateway,
        clock,
    })
}

/// Creates a router containing all appointment routes (paths relative to /api).
pub fn routes(config: Arc<AppConfig>) -> Router {
    let gateway = select_gateway(&config);
    routes_with_state(build_state(config, gateway, Arc::new(SystemClock)))
}

pub fn routes_with_state(state: Arc<AppointmentsState>) -> Router {
    Router::new()
        .route("/appointments/dates", get(get_dates_handler))
        .route("/appointments/slots", get(get_slots_handler))
        .route("/appointments/services", get(get_services_handler))
        .route("/appointments/sessions", post(create_session_handler))
        .route(
            "/appointments/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/appointments/sessions/{id}/date", post(select_date_handler))
        .route("/appointments/sessions/{id}/slot", post(select_slot_handler))
        .route(
            "/appointments/sessions/{id}/service",
            post(select_service_handler),
        )
        .route(
            "/appointments/sessions/{id}/details",
            post(update_details_handler),
        )
        .route("/appointments/sessions/{id}/submit", post(submit_handler))
        .route("/appointments/sessions/{id}/back", post(back_handler))
        .route("/appointments/sessions/{id}/reset", post(reset_handler))
        .with_state(state)
}
