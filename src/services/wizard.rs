use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{
    AppointmentRequest, Catalogs, ContactField, PetType, ServiceType, Step, TimeSlot, Validation,
    WizardState,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("pet type is not offered: {0}")]
    PetNotOffered(PetType),

    #[error("service is not offered: {0}")]
    ServiceNotOffered(ServiceType),

    #[error("date cannot be booked: {0}")]
    DateUnavailable(NaiveDate),

    #[error("please select a date first")]
    NoDateSelected,

    #[error("unknown time slot: {0}")]
    UnknownSlot(String),

    #[error("time slot is not available: {0}")]
    SlotUnavailable(String),

    #[error("appointment already confirmed")]
    Completed,

    #[error("booking details are incomplete or invalid")]
    Incomplete,

    #[error("booking changed while it was being submitted, please confirm again")]
    Changed,
}

/// One booking flow. All mutation goes through the methods below; a rejected
/// operation never changes state.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    catalogs: Arc<Catalogs>,
    state: WizardState,
    // Slots already held by other appointments on `state.selected_date`.
    booked: HashSet<String>,
}

impl BookingWizard {
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self {
            catalogs,
            state: WizardState::default(),
            booked: HashSet::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.current_step
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    // ── Step control ──

    pub fn can_advance(&self, step: Step) -> bool {
        match step {
            Step::PetType => self.state.pet_type.is_some(),
            Step::Service => self.state.service_type.is_some(),
            Step::Details => {
                self.state.contact.required_filled() && self.state.contact.validate().valid
            }
            Step::Schedule => {
                self.state.selected_date.is_some() && self.state.selected_time.is_some()
            }
            Step::Confirmed => true,
        }
    }

    /// Moves forward one step when the current step is complete. Returns whether
    /// the step changed. On the details step this is the only place validation
    /// errors get recorded.
    pub fn next(&mut self) -> bool {
        let current = self.state.current_step;
        if current.is_terminal() {
            return false;
        }

        if current == Step::Details {
            let Validation { valid, errors } = self.state.contact.validate();
            self.state.validation_errors = errors;
            if !valid {
                tracing::debug!(
                    errors = self.state.validation_errors.len(),
                    "contact details rejected"
                );
                return false;
            }
        }

        // Step 5 is only entered through `complete`, with a confirmation id.
        if current == Step::Schedule || !self.can_advance(current) {
            return false;
        }

        self.state.current_step = current.next();
        true
    }

    pub fn back(&mut self) -> bool {
        let current = self.state.current_step;
        if current == Step::PetType {
            return false;
        }
        self.state.current_step = current.prev();
        true
    }

    fn go_to(&mut self, step: Step) {
        self.state.current_step = step;
    }

    /// Enters the confirmation step with the id issued for `submitted`. Fails
    /// with `Changed` unless the wizard still describes exactly that request.
    pub fn complete(
        &mut self,
        submitted: &AppointmentRequest,
        confirmation_id: String,
    ) -> Result<(), WizardError> {
        self.ensure_open()?;
        if self.appointment_request().as_ref() != Some(submitted) {
            return Err(WizardError::Changed);
        }
        self.state.confirmation_id = Some(confirmation_id);
        self.state.current_step = Step::Confirmed;
        Ok(())
    }

    /// "Book another appointment".
    pub fn reset(&mut self) {
        self.state = WizardState::default();
        self.booked.clear();
        self.go_to(Step::PetType);
    }

    // ── Selection ──

    pub fn set_pet_type(&mut self, pet: PetType) -> Result<(), WizardError> {
        self.ensure_open()?;
        if self.catalogs.pet(pet).is_none() {
            return Err(WizardError::PetNotOffered(pet));
        }
        self.state.pet_type = Some(pet);
        Ok(())
    }

    pub fn set_service_type(&mut self, service: ServiceType) -> Result<(), WizardError> {
        self.ensure_open()?;
        if self.catalogs.service(service).is_none() {
            return Err(WizardError::ServiceNotOffered(service));
        }
        self.state.service_type = Some(service);
        Ok(())
    }

    // ── Contact form ──

    pub fn update_field(&mut self, field: ContactField, value: String) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.state.contact.set(field, value);
        self.state.validation_errors.remove(&field);
        Ok(())
    }

    pub fn validate(&self) -> Validation {
        self.state.contact.validate()
    }

    // ── Schedule ──

    /// The clinic is closed on Sundays, and the picker only offers days after today.
    pub fn is_date_selectable(date: NaiveDate, today: NaiveDate) -> bool {
        date > today && date.weekday() != Weekday::Sun
    }

    /// `booked` lists slot labels already held for `date`. A previously chosen
    /// time survives the date change unless it is booked on the new date.
    pub fn set_date<I>(&mut self, date: NaiveDate, today: NaiveDate, booked: I) -> Result<(), WizardError>
    where
        I: IntoIterator<Item = String>,
    {
        self.ensure_open()?;
        if !Self::is_date_selectable(date, today) {
            return Err(WizardError::DateUnavailable(date));
        }

        self.booked = booked.into_iter().collect();
        self.state.selected_date = Some(date);

        if let Some(time) = &self.state.selected_time {
            if self.booked.contains(time) {
                tracing::debug!(%date, time = %time, "selected time is booked on new date, clearing");
                self.state.selected_time = None;
            }
        }
        Ok(())
    }

    pub fn set_time(&mut self, time: &str) -> Result<(), WizardError> {
        self.ensure_open()?;
        if self.state.selected_date.is_none() {
            return Err(WizardError::NoDateSelected);
        }
        let slot = self
            .catalogs
            .slot(time)
            .ok_or_else(|| WizardError::UnknownSlot(time.to_string()))?;
        if !slot.available || self.booked.contains(&slot.time) {
            return Err(WizardError::SlotUnavailable(time.to_string()));
        }
        self.state.selected_time = Some(slot.time.clone());
        Ok(())
    }

    /// Slot availability for the selected date, or `None` until a date is chosen.
    pub fn available_slots(&self) -> Option<Vec<TimeSlot>> {
        self.state.selected_date?;
        Some(
            self.catalogs
                .slots
                .iter()
                .map(|slot| TimeSlot {
                    time: slot.time.clone(),
                    available: slot.available && !self.booked.contains(&slot.time),
                })
                .collect(),
        )
    }

    // ── Submission ──

    /// The request to submit for the 4 -> 5 transition. The date is checked
    /// again against `today` since a session can outlive the day it was
    /// picked on. Invalid contact details are recorded as field errors.
    pub fn pending_request(&mut self, today: NaiveDate) -> Result<AppointmentRequest, WizardError> {
        self.ensure_open()?;
        if let Some(date) = self.state.selected_date {
            if !Self::is_date_selectable(date, today) {
                return Err(WizardError::DateUnavailable(date));
            }
        }

        let Validation { valid, errors } = self.state.contact.validate();
        if !valid {
            self.state.validation_errors = errors;
            return Err(WizardError::Incomplete);
        }

        self.appointment_request().ok_or(WizardError::Incomplete)
    }

    /// The payload for the submission boundary, available once every step up
    /// to and including the schedule is complete.
    pub fn appointment_request(&self) -> Option<AppointmentRequest> {
        if self.state.current_step != Step::Schedule
            || !self.can_advance(Step::Details)
            || !self.can_advance(Step::Schedule)
        {
            return None;
        }

        let contact = &self.state.contact;
        let notes = contact.notes.trim();
        Some(AppointmentRequest {
            pet_type: self.state.pet_type?,
            service_type: self.state.service_type?,
            owner_name: contact.owner_name.trim().to_string(),
            pet_name: contact.pet_name.trim().to_string(),
            email: contact.email.trim().to_string(),
            phone: contact.phone.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            date: self.state.selected_date?,
            time_slot: self.state.selected_time.clone()?,
        })
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.state.current_step.is_terminal() {
            return Err(WizardError::Completed);
        }
        Ok(())
    }
}
