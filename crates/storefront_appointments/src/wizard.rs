// --- File: crates/storefront_appointments/src/wizard.rs ---
//! The booking wizard: date, slot, service, contact details, confirmation.
//!
//! The wizard is a plain state struct. Every operation either moves it to a
//! new step or returns an error and leaves it untouched (validation errors are
//! the exception: they are recorded so the form can show them).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::availability::{AvailabilityCalendar, DaySlots, TimeSlot};
use crate::catalog::{ServiceCatalog, ServiceType};
use crate::error::AppointmentError;
use crate::gateway::{BookingConfirmation, BookingRequest};
use crate::validation::{validate_details, AppointmentDetails, ValidationErrors};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    NoDate,
    DateSelected,
    SlotSelected,
    ServiceSelected,
    DetailsEntered,
    Booking,
    Booked,
    BookingFailed,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Phase {
    #[default]
    Editing,
    /// Carries the ticket of the in-flight submission.
    Booking(u64),
    Booked(BookingConfirmation),
    Failed(String),
}

/// Actions accepted by [`BookingWizard::apply`]. Submission is separate
/// because it needs a gateway round trip.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    SelectDate {
        #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date"))]
        date: NaiveDate,
    },
    SelectSlot {
        slot_id: String,
    },
    SelectService {
        service_id: String,
    },
    UpdateDetails {
        details: AppointmentDetails,
    },
    Back,
    Reset,
}

/// What the wizard needs from the outside world to apply an action.
pub struct WizardContext<'a> {
    pub calendar: &'a AvailabilityCalendar,
    pub catalog: &'a ServiceCatalog,
    pub now: DateTime<Utc>,
}

/// Serializable snapshot of the wizard.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct WizardView {
    pub step: WizardStep,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date"))]
    pub selected_date: Option<NaiveDate>,
    pub selected_slot: Option<TimeSlot>,
    pub selected_service: Option<ServiceType>,
    pub slots: DaySlots,
    pub details: AppointmentDetails,
    pub errors: ValidationErrors,
    pub confirmation: Option<BookingConfirmation>,
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingWizard {
    selected_date: Option<NaiveDate>,
    slots: DaySlots,
    selected_slot: Option<TimeSlot>,
    selected_service: Option<ServiceType>,
    details: AppointmentDetails,
    errors: ValidationErrors,
    phase: Phase,
    /// Tickets handed out so far. Survives reset so tickets never repeat.
    submissions: u64,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        match &self.phase {
            Phase::Booking(_) => WizardStep::Booking,
            Phase::Booked(_) => WizardStep::Booked,
            Phase::Failed(_) => WizardStep::BookingFailed,
            Phase::Editing => {
                if self.selected_date.is_none() {
                    WizardStep::NoDate
                } else if self.selected_slot.is_none() {
                    WizardStep::DateSelected
                } else if self.selected_service.is_none() {
                    WizardStep::SlotSelected
                } else if self.details.is_filled() {
                    WizardStep::DetailsEntered
                } else {
                    WizardStep::ServiceSelected
                }
            }
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected_slot.as_ref()
    }

    pub fn selected_service(&self) -> Option<&ServiceType> {
        self.selected_service.as_ref()
    }

    pub fn slots(&self) -> &DaySlots {
        &self.slots
    }

    pub fn details(&self) -> &AppointmentDetails {
        &self.details
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match &self.phase {
            Phase::Booked(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Ticket of the submission currently awaiting its outcome.
    pub fn pending_submission(&self) -> Option<u64> {
        match self.phase {
            Phase::Booking(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// Edits are refused while a booking is in flight or after it is confirmed.
    fn check_editable(&self) -> Result<(), AppointmentError> {
        match self.phase {
            Phase::Booking(_) => Err(AppointmentError::BookingInProgress),
            Phase::Booked(_) => Err(AppointmentError::InvalidTransition(
                "booking already confirmed, reset to start over".to_string(),
            )),
            Phase::Editing | Phase::Failed(_) => Ok(()),
        }
    }

    /// Any accepted edit after a failed booking returns to editing.
    fn resume_editing(&mut self) {
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Editing;
        }
    }

    pub fn apply(&mut self, action: WizardAction, ctx: &WizardContext<'_>) -> Result<(), AppointmentError> {
        debug!("Applying wizard action {:?} at step {:?}", action, self.step());
        match action {
            WizardAction::SelectDate { date } => self.select_date(date, ctx.calendar, ctx.now),
            WizardAction::SelectSlot { slot_id } => self.select_slot(&slot_id),
            WizardAction::SelectService { service_id } => self.select_service(&service_id, ctx.catalog),
            WizardAction::UpdateDetails { details } => self.update_details(details),
            WizardAction::Back => self.back(),
            WizardAction::Reset => self.reset(),
        }
    }

    /// Selects a date from the available set and regenerates its slots.
    /// Clears the slot and service selections.
    pub fn select_date(
        &mut self,
        date: NaiveDate,
        calendar: &AvailabilityCalendar,
        now: DateTime<Utc>,
    ) -> Result<(), AppointmentError> {
        self.check_editable()?;
        if !calendar.is_date_available(date) {
            return Err(AppointmentError::DateUnavailable(date));
        }
        self.resume_editing();

        self.selected_date = Some(date);
        self.slots = calendar.generate_time_slots(date, now);
        self.selected_slot = None;
        self.selected_service = None;
        Ok(())
    }

    /// Selects an available slot of the current date. Clears the service.
    pub fn select_slot(&mut self, slot_id: &str) -> Result<(), AppointmentError> {
        self.check_editable()?;
        if self.selected_date.is_none() {
            return Err(AppointmentError::NoDateSelected);
        }
        let slot = self
            .slots
            .find(slot_id)
            .filter(|slot| slot.available)
            .cloned()
            .ok_or_else(|| AppointmentError::SlotUnavailable(slot_id.to_string()))?;
        self.resume_editing();

        self.selected_slot = Some(slot);
        self.selected_service = None;
        Ok(())
    }

    /// Selects a service for the chosen slot. The service must end by the
    /// close of the business day.
    pub fn select_service(
        &mut self,
        service_id: &str,
        catalog: &ServiceCatalog,
    ) -> Result<(), AppointmentError> {
        self.check_editable()?;
        let Some(slot) = self.selected_slot.as_ref() else {
            return Err(AppointmentError::NoSlotSelected);
        };
        let service = catalog
            .find(service_id)
            .cloned()
            .ok_or_else(|| AppointmentError::UnknownService(service_id.to_string()))?;

        let ends = slot.start + chrono::Duration::minutes(service.duration_minutes as i64);
        let closes = self.slots.iter().map(|s| s.end).max().unwrap_or(slot.end);
        if ends > closes {
            return Err(AppointmentError::ServiceDoesNotFit {
                service: service.id,
                slot: slot.id.clone(),
            });
        }
        self.resume_editing();

        self.selected_service = Some(service);
        Ok(())
    }

    /// Replaces the form fields. Errors of fields that changed are dropped.
    pub fn update_details(&mut self, details: AppointmentDetails) -> Result<(), AppointmentError> {
        self.check_editable()?;
        self.resume_editing();

        if details.name != self.details.name {
            self.errors.remove("name");
        }
        if details.email != self.details.email {
            self.errors.remove("email");
        }
        if details.phone != self.details.phone {
            self.errors.remove("phone");
        }
        self.details = details;
        Ok(())
    }

    /// Validates the selection and form. On success the wizard enters the
    /// booking step and returns the request to commit; its ticket is then
    /// available from [`Self::pending_submission`].
    pub fn begin_submission(&mut self) -> Result<BookingRequest, AppointmentError> {
        self.check_editable()?;

        let (Some(date), Some(slot), Some(service)) = (
            self.selected_date,
            self.selected_slot.as_ref(),
            self.selected_service.as_ref(),
        ) else {
            return Err(AppointmentError::IncompleteSelection);
        };

        if let Err(errors) = validate_details(&self.details) {
            self.errors = errors.clone();
            return Err(AppointmentError::ValidationFailed(errors));
        }

        let request = BookingRequest {
            date,
            slot_id: slot.id.clone(),
            start: slot.start,
            end: slot.start + chrono::Duration::minutes(service.duration_minutes as i64),
            service: service.clone(),
            details: self.details.clone(),
        };

        self.errors = ValidationErrors::new();
        self.submissions += 1;
        self.phase = Phase::Booking(self.submissions);
        Ok(request)
    }

    /// Records the outcome of the commit identified by `ticket`. Outcomes of
    /// any other submission are refused and leave the wizard untouched.
    pub fn complete_submission(
        &mut self,
        ticket: u64,
        result: Result<BookingConfirmation, AppointmentError>,
    ) -> Result<(), AppointmentError> {
        match self.phase {
            Phase::Booking(pending) if pending == ticket => {}
            Phase::Booking(_) => {
                return Err(AppointmentError::InvalidTransition(format!(
                    "booking outcome {} does not match the pending submission",
                    ticket
                )))
            }
            _ => {
                return Err(AppointmentError::InvalidTransition(
                    "no booking in progress".to_string(),
                ))
            }
        }
        self.phase = match result {
            Ok(confirmation) => Phase::Booked(confirmation),
            Err(err) => Phase::Failed(err.to_string()),
        };
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), AppointmentError> {
        match self.step() {
            WizardStep::Booking => Err(AppointmentError::BookingInProgress),
            WizardStep::Booked => Err(AppointmentError::InvalidTransition(
                "booking already confirmed, reset to start over".to_string(),
            )),
            WizardStep::NoDate => Err(AppointmentError::InvalidTransition(
                "already at the first step".to_string(),
            )),
            WizardStep::BookingFailed => {
                self.phase = Phase::Editing;
                Ok(())
            }
            WizardStep::DateSelected => {
                self.selected_date = None;
                self.slots = DaySlots::default();
                Ok(())
            }
            WizardStep::SlotSelected => {
                self.selected_slot = None;
                Ok(())
            }
            WizardStep::ServiceSelected | WizardStep::DetailsEntered => {
                self.selected_service = None;
                Ok(())
            }
        }
    }

    /// Back to a blank wizard: selections, slots, form, errors and outcome.
    /// Refused while a booking is in flight.
    pub fn reset(&mut self) -> Result<(), AppointmentError> {
        if matches!(self.phase, Phase::Booking(_)) {
            return Err(AppointmentError::BookingInProgress);
        }
        *self = Self {
            submissions: self.submissions,
            ..Self::default()
        };
        Ok(())
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            step: self.step(),
            selected_date: self.selected_date,
            selected_slot: self.selected_slot.clone(),
            selected_service: self.selected_service.clone(),
            slots: self.slots.clone(),
            details: self.details.clone(),
            errors: self.errors.clone(),
            confirmation: self.confirmation().cloned(),
            failure_reason: self.failure_reason().map(str::to_string),
        }
    }
}
