use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ContactForm, PetType, ServiceType, Step, TimeSlot, ValidationErrors};
use crate::services::summary::Summary;
use crate::services::wizard::BookingWizard;

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: u8,
    pub total_steps: u8,
    pub title: &'static str,
    pub progress_percent: u8,
    pub progress: Vec<ProgressMarker>,
    pub body: StepBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressMarker {
    pub step: u8,
    pub label: &'static str,
    pub status: MarkerStatus,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStatus {
    Complete,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub back_enabled: bool,
    pub next_enabled: bool,
    pub next_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepBody {
    PetType {
        options: Vec<PetChoice>,
    },
    Service {
        options: Vec<ServiceChoice>,
    },
    Details {
        form: ContactForm,
        errors: ValidationErrors,
    },
    Schedule {
        selected_date: Option<NaiveDate>,
        selected_time: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        slots: Option<Vec<SlotChoice>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<&'static str>,
    },
    Confirmed {
        heading: &'static str,
        message: &'static str,
        summary: Option<Summary>,
        /// Plain-text rendering of `summary`, ready for email or clipboard.
        #[serde(skip_serializing_if = "Option::is_none")]
        summary_text: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PetChoice {
    pub id: PetType,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceChoice {
    pub id: ServiceType,
    pub label: String,
    pub description: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotChoice {
    pub time: String,
    pub available: bool,
    pub selected: bool,
}

fn title(step: Step) -> &'static str {
    match step {
        Step::PetType => "Select Your Pet Type",
        Step::Service => "Choose a Service",
        Step::Details => "Your Information",
        Step::Schedule => "Choose Date & Time",
        Step::Confirmed => "Appointment Confirmed!",
    }
}

/// What a client needs to draw the current step.
pub fn render(wizard: &BookingWizard) -> StepView {
    let state = wizard.state();
    let catalogs = wizard.catalogs();
    let current = state.current_step;

    let progress = Step::ALL
        .iter()
        .map(|s| ProgressMarker {
            step: s.number(),
            label: s.label(),
            status: match s.cmp(&current) {
                std::cmp::Ordering::Less => MarkerStatus::Complete,
                std::cmp::Ordering::Equal => MarkerStatus::Current,
                std::cmp::Ordering::Greater => MarkerStatus::Upcoming,
            },
        })
        .collect();

    let body = match current {
        Step::PetType => StepBody::PetType {
            options: catalogs
                .pets
                .iter()
                .map(|p| PetChoice {
                    id: p.id,
                    label: p.label.clone(),
                    selected: state.pet_type == Some(p.id),
                })
                .collect(),
        },
        Step::Service => StepBody::Service {
            options: catalogs
                .services
                .iter()
                .map(|s| ServiceChoice {
                    id: s.id,
                    label: s.label.clone(),
                    description: s.description.clone(),
                    selected: state.service_type == Some(s.id),
                })
                .collect(),
        },
        Step::Details => StepBody::Details {
            form: state.contact.clone(),
            errors: state.validation_errors.clone(),
        },
        Step::Schedule => {
            let slots = wizard.available_slots().map(|slots| {
                slots
                    .into_iter()
                    .map(|TimeSlot { time, available }| SlotChoice {
                        selected: state.selected_time.as_deref() == Some(time.as_str()),
                        time,
                        available,
                    })
                    .collect::<Vec<_>>()
            });
            StepBody::Schedule {
                selected_date: state.selected_date,
                selected_time: state.selected_time.clone(),
                hint: slots.is_none().then_some("Please select a date first"),
                slots,
            }
        }
        Step::Confirmed => {
            let summary = Summary::from_state(state, catalogs);
            StepBody::Confirmed {
                heading: "Appointment Confirmed!",
                message: "Thank you for booking with us. We'll send a confirmation email shortly.",
                summary_text: summary.as_ref().map(Summary::render_text),
                summary,
            }
        }
    };

    // The confirmation screen only offers "book another".
    let navigation = (!current.is_terminal()).then(|| Navigation {
        back_enabled: current != Step::PetType,
        next_enabled: match current {
            // The button lights up once the fields are filled; format
            // problems surface when it is pressed.
            Step::Details => state.contact.required_filled(),
            _ => wizard.can_advance(current),
        },
        next_label: if current == Step::Schedule { "Confirm" } else { "Next" },
    });

    StepView {
        step: current.number(),
        total_steps: Step::TOTAL,
        title: title(current),
        progress_percent: (u16::from(current.number()) * 100 / u16::from(Step::TOTAL)) as u8,
        progress,
        body,
        navigation,
    }
}
