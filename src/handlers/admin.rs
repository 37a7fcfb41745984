use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::{self, queries};
use crate::errors::AppError;
use crate::models::{Appointment, AppointmentStatus};
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/appointments
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct AppointmentResponse {
    id: String,
    pet_type: String,
    service_type: String,
    owner_name: String,
    pet_name: String,
    email: String,
    phone: String,
    notes: Option<String>,
    date: String,
    time_slot: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            pet_type: a.pet_type.to_string(),
            service_type: a.service_type.to_string(),
            owner_name: a.owner_name,
            pet_name: a.pet_name,
            email: a.email,
            phone: a.phone,
            notes: a.notes,
            date: a.date.format("%Y-%m-%d").to_string(),
            time_slot: a.time_slot,
            status: a.status.as_str().to_string(),
            created_at: a.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: a.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let status_filter = match query.status.as_deref() {
        None => None,
        Some(s @ ("confirmed" | "cancelled")) => Some(s),
        Some(other) => {
            return Err(AppError::InvalidInput(format!("unknown status filter: {other}")));
        }
    };

    let appointments = {
        let db = db::lock(&state.db)?;
        queries::get_all_appointments(&db, status_filter, limit)?
    };

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

// POST /api/admin/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = db::lock(&state.db)?;
        queries::update_appointment_status(&db, &id, &AppointmentStatus::Cancelled)?
    };

    if !updated {
        return Err(AppError::NotFound("appointment not found".to_string()));
    }

    tracing::info!(appointment_id = %id, "appointment cancelled");
    Ok(Json(serde_json::json!({"ok": true})))
}
