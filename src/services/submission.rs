use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::db::{self, queries, Db};
use crate::models::{Appointment, AppointmentRequest, AppointmentStatus};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("the {time_slot} slot on {date} has just been booked, please pick another time")]
    SlotTaken { date: NaiveDate, time_slot: String },

    #[error("failed to store appointment: {0}")]
    Storage(anyhow::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Where a completed wizard hands its appointment. Returns the confirmation id.
#[async_trait]
pub trait AppointmentSubmitter: Send + Sync {
    async fn submit(&self, request: &AppointmentRequest) -> Result<String, SubmitError>;
}

pub struct SqliteSubmitter {
    db: Db,
}

impl SqliteSubmitter {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentSubmitter for SqliteSubmitter {
    async fn submit(&self, request: &AppointmentRequest) -> Result<String, SubmitError> {
        let now = Utc::now().naive_utc();
        let appointment = Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            pet_type: request.pet_type,
            service_type: request.service_type,
            owner_name: request.owner_name.clone(),
            pet_name: request.pet_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            notes: request.notes.clone(),
            date: request.date,
            time_slot: request.time_slot.clone(),
            status: AppointmentStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        // Check and insert under one lock so two sessions cannot take the same slot.
        let db = db::lock(&self.db).map_err(SubmitError::Storage)?;

        let taken = queries::is_slot_booked(&db, &request.date, &request.time_slot)
            .map_err(SubmitError::Storage)?;
        if taken {
            return Err(SubmitError::SlotTaken {
                date: request.date,
                time_slot: request.time_slot.clone(),
            });
        }

        queries::create_appointment(&db, &appointment).map_err(SubmitError::Storage)?;

        tracing::info!(
            appointment_id = %appointment.id,
            date = %appointment.date,
            time = %appointment.time_slot,
            service = %appointment.service_type,
            "appointment booked"
        );

        Ok(appointment.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PetType, ServiceType};

    fn request(slot: &str) -> AppointmentRequest {
        AppointmentRequest {
            pet_type: PetType::Dog,
            service_type: ServiceType::Vaccination,
            owner_name: "John Doe".to_string(),
            pet_name: "Max".to_string(),
            email: "john@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            notes: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(),
            time_slot: slot.to_string(),
        }
    }

    fn submitter() -> (SqliteSubmitter, Db) {
        let conn = db::open_shared(":memory:").unwrap();
        (SqliteSubmitter::new(conn.clone()), conn)
    }

    #[tokio::test]
    async fn test_submit_persists_confirmed_appointment() {
        let (submitter, conn) = submitter();
        let id = submitter.submit(&request("09:00 AM")).await.unwrap();

        let db = conn.lock().unwrap();
        let stored = queries::get_appointment_by_id(&db, &id).unwrap().unwrap();
        assert_eq!(stored.status, AppointmentStatus::Confirmed);
        assert_eq!(stored.pet_name, "Max");
        assert_eq!(stored.time_slot, "09:00 AM");
    }

    #[tokio::test]
    async fn test_submit_rejects_taken_slot() {
        let (submitter, _conn) = submitter();
        submitter.submit(&request("09:00 AM")).await.unwrap();

        let err = submitter.submit(&request("09:00 AM")).await.unwrap_err();
        assert!(matches!(err, SubmitError::SlotTaken { .. }));

        assert!(submitter.submit(&request("10:00 AM")).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_slot_can_be_rebooked() {
        let (submitter, conn) = submitter();
        let id = submitter.submit(&request("02:00 PM")).await.unwrap();
        {
            let db = conn.lock().unwrap();
            queries::update_appointment_status(&db, &id, &AppointmentStatus::Cancelled).unwrap();
        }
        assert!(submitter.submit(&request("02:00 PM")).await.is_ok());
    }
}
