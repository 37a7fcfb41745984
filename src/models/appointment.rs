use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::pet::PetType;
use super::service::ServiceType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub pet_type: PetType,
    pub service_type: ServiceType,
    pub owner_name: String,
    pub pet_name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Confirmed,
        }
    }
}

/// What the wizard hands to the submission boundary once step 4 is complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentRequest {
    pub pet_type: PetType,
    pub service_type: ServiceType,
    pub owner_name: String,
    pub pet_name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time_slot: String,
}
