use std::sync::Arc;
use std::time::Duration;
use storefront_appointments::{
    AppointmentError, AvailabilityCalendar, AvailabilityRules, BookingFlow, BookingWizard,
    ServiceCatalog, SimulatedBookingGateway, WizardStep,
};
use tokio::time::Instant;

struct Setup {
    calendar: AvailabilityCalendar,
    catalog: ServiceCatalog,
}

fn setup() -> Setup {
    let scheduling = fixtures::scheduling_config();
    Setup {
        calendar: AvailabilityCalendar::for_instant(
            Arc::new(AvailabilityRules::from_config(Some(&scheduling))),
            fixtures::fixed_now(),
        ),
        catalog: ServiceCatalog::from_config(Some(&scheduling)),
    }
}

/// Picks the date, the first available morning slot and the general consultation.
fn choose_appointment(setup: &Setup, wizard: &mut BookingWizard) -> String {
    let now = fixtures::fixed_now();
    let tuesday = fixtures::future_open_tuesday(now);
    wizard.select_date(tuesday, &setup.calendar, now).unwrap();

    let slot_id = wizard
        .slots()
        .morning
        .iter()
        .find(|slot| slot.available)
        .map(|slot| slot.id.clone())
        .expect("an available morning slot");
    wizard.select_slot(&slot_id).unwrap();
    wizard.select_service("consulta-general", &setup.catalog).unwrap();
    wizard.update_details(fixtures::valid_details()).unwrap();
    assert_eq!(wizard.step(), WizardStep::DetailsEntered);
    slot_id
}

#[tokio::test(start_paused = true)]
async fn test_e2e_booking_flow() {
    let setup = setup();
    let mut wizard = BookingWizard::new();
    let slot_id = choose_appointment(&setup, &mut wizard);

    let flow = BookingFlow::new(SimulatedBookingGateway::from_config(Some(
        &fixtures::scheduling_config(),
    )));

    let started = Instant::now();
    let confirmation = flow.submit(&mut wizard).await.unwrap();
    // The simulated commit waits its configured latency
    assert!(started.elapsed() >= Duration::from_millis(1500));

    assert_eq!(wizard.step(), WizardStep::Booked);
    assert_eq!(confirmation.service_name, "Consulta general");
    assert_eq!(confirmation.slot_id, slot_id);
    assert_eq!(confirmation.customer_email, "ana@example.com");
    assert_eq!(confirmation.date, fixtures::future_open_tuesday(fixtures::fixed_now()));

    let start = &slot_id;
    let end = (confirmation.start + chrono::Duration::minutes(30))
        .format("%H:%M")
        .to_string();
    assert_eq!(confirmation.time_range(), format!("{} - {}", start, end));
    assert_eq!(wizard.confirmation(), Some(&confirmation));
    assert!(uuid::Uuid::parse_str(&confirmation.reference).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_e2e_reset_after_booking_clears_everything() {
    let setup = setup();
    let mut wizard = BookingWizard::new();
    choose_appointment(&setup, &mut wizard);

    let flow = BookingFlow::new(SimulatedBookingGateway::new(Duration::from_millis(10), 0.0));
    flow.submit(&mut wizard).await.unwrap();
    wizard.reset().unwrap();

    let view = wizard.view();
    assert_eq!(view.step, WizardStep::NoDate);
    assert!(view.selected_date.is_none());
    assert!(view.selected_slot.is_none());
    assert!(view.selected_service.is_none());
    assert!(view.slots.is_empty());
    assert!(view.details.name.is_empty());
    assert!(view.details.email.is_empty());
    assert!(view.details.phone.is_empty());
    assert!(view.details.notes.is_empty());
    assert!(view.errors.is_empty());
    assert!(view.confirmation.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_e2e_failed_booking_can_be_retried() {
    let setup = setup();
    let mut wizard = BookingWizard::new();
    choose_appointment(&setup, &mut wizard);

    let failing = BookingFlow::new(SimulatedBookingGateway::new(Duration::from_millis(10), 1.0));
    let err = failing.submit(&mut wizard).await.unwrap_err();
    assert!(matches!(err, AppointmentError::BookingRejected(_)));
    assert_eq!(wizard.step(), WizardStep::BookingFailed);

    let working = BookingFlow::new(SimulatedBookingGateway::new(Duration::from_millis(10), 0.0));
    working.submit(&mut wizard).await.unwrap();
    assert_eq!(wizard.step(), WizardStep::Booked);
}

#[test]
fn test_known_slot_availability_on_fixture_tuesday() {
    let setup = setup();
    let now = fixtures::fixed_now();
    let tuesday = fixtures::future_open_tuesday(now);
    assert_eq!(tuesday.to_string(), "2025-06-10");

    let mut wizard = BookingWizard::new();
    wizard.select_date(tuesday, &setup.calendar, now).unwrap();
    assert!(matches!(
        wizard.select_slot("09:00"),
        Err(AppointmentError::SlotUnavailable(_))
    ));
    wizard.select_slot("09:30").unwrap();
}
