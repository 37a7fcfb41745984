use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::pet::{default_pet_options, PetOption, PetType};
use super::service::{default_service_options, ServiceOption, ServiceType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

impl TimeSlot {
    fn new(time: &str, available: bool) -> Self {
        Self {
            time: time.to_string(),
            available,
        }
    }

    /// Slot labels are 12-hour clock strings such as `"02:00 PM"`.
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_slot_time(&self.time)
    }
}

pub fn parse_slot_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%I:%M %p").ok()
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog section is empty: {0}")]
    Empty(&'static str),

    #[error("duplicate {kind} entry: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("missing label for {0}")]
    MissingLabel(String),

    #[error("invalid time slot: {0}")]
    InvalidTime(String),
}

/// Everything the wizard offers for selection. Built once at startup and shared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalogs {
    pub pets: Vec<PetOption>,
    pub services: Vec<ServiceOption>,
    pub slots: Vec<TimeSlot>,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            pets: default_pet_options(),
            services: default_service_options(),
            slots: vec![
                TimeSlot::new("09:00 AM", true),
                TimeSlot::new("10:00 AM", true),
                TimeSlot::new("11:00 AM", false),
                TimeSlot::new("12:00 PM", true),
                TimeSlot::new("02:00 PM", true),
                TimeSlot::new("03:00 PM", true),
                TimeSlot::new("04:00 PM", false),
                TimeSlot::new("05:00 PM", true),
            ],
        }
    }
}

impl Catalogs {
    pub fn from_json(s: &str) -> Result<Self, CatalogError> {
        let catalogs: Catalogs = serde_json::from_str(s)?;
        catalogs.validate()?;
        Ok(catalogs)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.pets.is_empty() {
            return Err(CatalogError::Empty("pets"));
        }
        if self.services.is_empty() {
            return Err(CatalogError::Empty("services"));
        }
        if self.slots.is_empty() {
            return Err(CatalogError::Empty("slots"));
        }

        let mut seen = HashSet::new();
        for pet in &self.pets {
            if !seen.insert(pet.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "pet",
                    id: pet.id.to_string(),
                });
            }
            if pet.label.trim().is_empty() {
                return Err(CatalogError::MissingLabel(pet.id.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "service",
                    id: service.id.to_string(),
                });
            }
            if service.label.trim().is_empty() {
                return Err(CatalogError::MissingLabel(service.id.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for slot in &self.slots {
            if slot.start_time().is_none() {
                return Err(CatalogError::InvalidTime(slot.time.clone()));
            }
            if !seen.insert(slot.time.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "slot",
                    id: slot.time.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn pet(&self, id: PetType) -> Option<&PetOption> {
        self.pets.iter().find(|p| p.id == id)
    }

    pub fn service(&self, id: ServiceType) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn slot(&self, time: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.time == time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "pets": [{"id":"dog","label":"Dog"},{"id":"cat","label":"Cat"}],
        "services": [{"id":"checkup","label":"Checkup","description":"Routine"}],
        "slots": [{"time":"08:30 AM","available":true},{"time":"01:00 PM","available":false}]
    }"#;

    #[test]
    fn test_default_catalog() {
        let catalogs = Catalogs::default();
        assert_eq!(catalogs.pets.len(), 3);
        assert_eq!(catalogs.services.len(), 5);
        assert_eq!(catalogs.slots.len(), 8);
        assert!(!catalogs.slot("11:00 AM").unwrap().available);
        assert!(!catalogs.slot("04:00 PM").unwrap().available);
        assert!(catalogs.slot("09:00 AM").unwrap().available);
        assert!(catalogs.validate().is_ok());
    }

    #[test]
    fn test_parse_valid_json() {
        let catalogs = Catalogs::from_json(VALID).unwrap();
        assert_eq!(catalogs.pets.len(), 2);
        assert_eq!(catalogs.service(ServiceType::Checkup).unwrap().label, "Checkup");
        assert!(catalogs.service(ServiceType::Surgery).is_none());
    }

    #[test]
    fn test_unknown_pet_id_rejected() {
        let json = r#"{"pets":[{"id":"ferret","label":"Ferret"}],"services":[{"id":"checkup","label":"C","description":""}],"slots":[{"time":"09:00 AM","available":true}]}"#;
        assert!(matches!(Catalogs::from_json(json), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_invalid_slot_time_rejected() {
        let json = r#"{"pets":[{"id":"dog","label":"Dog"}],"services":[{"id":"checkup","label":"C","description":""}],"slots":[{"time":"25:00","available":true}]}"#;
        assert!(matches!(
            Catalogs::from_json(json),
            Err(CatalogError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let json = r#"{"pets":[{"id":"dog","label":"Dog"}],"services":[{"id":"checkup","label":"C","description":""}],"slots":[{"time":"09:00 AM","available":true},{"time":"09:00 AM","available":false}]}"#;
        assert!(matches!(
            Catalogs::from_json(json),
            Err(CatalogError::Duplicate { kind: "slot", .. })
        ));
    }

    #[test]
    fn test_empty_section_rejected() {
        let json = r#"{"pets":[],"services":[{"id":"checkup","label":"C","description":""}],"slots":[{"time":"09:00 AM","available":true}]}"#;
        assert!(matches!(Catalogs::from_json(json), Err(CatalogError::Empty("pets"))));
    }

    #[test]
    fn test_slot_start_time() {
        let slot = TimeSlot::new("02:00 PM", true);
        assert_eq!(slot.start_time(), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_slot_time("12:00 PM"), NaiveTime::from_hms_opt(12, 0, 0));
    }
}
