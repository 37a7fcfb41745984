use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Catalogs, PetType, WizardState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub pet_type: PetType,
    pub pet_type_label: String,
    pub service_label: String,
    pub pet_name: String,
    pub owner_name: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_id: Option<String>,
}

/// Formats like a US locale date string, e.g. `6/17/2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

impl Summary {
    /// Projects the accumulated wizard state. Returns `None` while any
    /// summarised field is still missing.
    pub fn from_state(state: &WizardState, catalogs: &Catalogs) -> Option<Self> {
        let pet_type = state.pet_type?;
        let service = catalogs.service(state.service_type?)?;
        let pet_type_label = catalogs
            .pet(pet_type)
            .map(|p| p.label.clone())
            .unwrap_or_else(|| pet_type.default_label().to_string());

        Some(Summary {
            pet_type,
            pet_type_label,
            service_label: service.label.clone(),
            pet_name: state.contact.pet_name.trim().to_string(),
            owner_name: state.contact.owner_name.trim().to_string(),
            date: format_date(state.selected_date?),
            time: state.selected_time.clone()?,
            confirmation_id: state.confirmation_id.clone(),
        })
    }

    pub fn render_text(&self) -> String {
        let mut lines = vec![
            "Appointment Details:".to_string(),
            format!("Pet Type: {}", self.pet_type_label),
            format!("Service: {}", self.service_label),
            format!("Pet Name: {}", self.pet_name),
            format!("Date: {}", self.date),
            format!("Time: {}", self.time),
        ];
        if let Some(id) = &self.confirmation_id {
            lines.push(format!("Confirmation: {id}"));
        }
        lines.join("\n")
    }
}
