use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::contact::{ContactForm, ValidationErrors};
use super::pet::PetType;
use super::service::ServiceType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PetType = 1,
    Service = 2,
    Details = 3,
    Schedule = 4,
    Confirmed = 5,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::PetType,
        Step::Service,
        Step::Details,
        Step::Schedule,
        Step::Confirmed,
    ];

    pub const TOTAL: u8 = 5;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Step::PetType),
            2 => Some(Step::Service),
            3 => Some(Step::Details),
            4 => Some(Step::Schedule),
            5 => Some(Step::Confirmed),
            _ => None,
        }
    }

    /// Following step, saturating at the terminal step.
    pub fn next(&self) -> Self {
        Step::from_number(self.number() + 1).unwrap_or(Step::Confirmed)
    }

    /// Previous step, saturating at the first step.
    pub fn prev(&self) -> Self {
        Step::from_number(self.number().saturating_sub(1)).unwrap_or(Step::PetType)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::PetType => "Pet Type",
            Step::Service => "Service",
            Step::Details => "Details",
            Step::Schedule => "Date & Time",
            Step::Confirmed => "Confirm",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == Step::Confirmed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardState {
    pub current_step: Step,
    pub pet_type: Option<PetType>,
    pub service_type: Option<ServiceType>,
    pub contact: ContactForm,
    pub validation_errors: ValidationErrors,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub confirmation_id: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: Step::PetType,
            pet_type: None,
            service_type: None,
            contact: ContactForm::default(),
            validation_errors: ValidationErrors::new(),
            selected_date: None,
            selected_time: None,
            confirmation_id: None,
        }
    }
}
