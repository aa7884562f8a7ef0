// --- File: crates/storefront_appointments/src/lib.rs ---
// Declare modules within this crate
pub mod availability;
#[cfg(test)]
mod availability_proptest;
#[cfg(test)]
mod availability_test;
pub mod catalog;
pub mod doc;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod routes;
pub mod validation;
pub mod wizard;

pub use availability::{AvailabilityCalendar, AvailabilityRules, Clock, DaySlots, FixedClock, SystemClock, TimeSlot};
pub use catalog::{ServiceCatalog, ServiceType};
pub use error::AppointmentError;
pub use gateway::{
    BookingConfirmation, BookingFlow, BookingGateway, BookingRequest, RestBookingGateway,
    SimulatedBookingGateway,
};
pub use validation::{validate_details, AppointmentDetails, ValidationErrors};
pub use wizard::{BookingWizard, WizardAction, WizardContext, WizardStep, WizardView};
