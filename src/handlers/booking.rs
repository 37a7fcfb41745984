use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{self, queries};
use crate::errors::AppError;
use crate::models::{AppointmentStatus, ContactField, PetType, ServiceType, Step};
use crate::services::messaging::appointment_notice;
use crate::services::submission::SubmitError;
use crate::services::view::{self, StepView};
use crate::services::wizard::{BookingWizard, WizardError};
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingResponse {
    session_id: String,
    view: StepView,
}

fn respond(session_id: &str, view: StepView) -> Response {
    Json(BookingResponse {
        session_id: session_id.to_string(),
        view,
    })
    .into_response()
}

/// A rejected operation: state is unchanged, the client gets the current view back.
fn rejected(status: StatusCode, session_id: &str, error: String, view: StepView) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "session_id": session_id,
            "view": view,
        })),
    )
        .into_response()
}

fn session_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("booking session {id}"))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn apply<F>(state: &AppState, id: &str, op: F) -> Result<Response, AppError>
where
    F: FnOnce(&mut BookingWizard) -> Result<(), WizardError>,
{
    let (outcome, view) = state
        .sessions
        .with_session(id, |w| {
            let outcome = op(w);
            (outcome, view::render(w))
        })
        .ok_or_else(|| session_not_found(id))?;

    match outcome {
        Ok(()) => Ok(respond(id, view)),
        Err(e) => {
            tracing::debug!(session = %id, error = %e, "wizard operation rejected");
            let status = match e {
                WizardError::Completed => StatusCode::CONFLICT,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            Ok(rejected(status, id, e.to_string(), view))
        }
    }
}

fn booked_slots(state: &AppState, date: &NaiveDate) -> Result<Vec<String>, AppError> {
    let db = db::lock(&state.db)?;
    Ok(queries::get_booked_slots(&db, date)?)
}

// POST /api/booking
pub async fn start_booking(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let wizard = BookingWizard::new(Arc::clone(&state.catalogs));
    let view = view::render(&wizard);
    let id = state
        .sessions
        .create(wizard)
        .ok_or_else(|| AppError::Busy("too many open bookings, try again shortly".to_string()))?;
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            session_id: id,
            view,
        }),
    )
        .into_response())
}

// GET /api/booking/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let view = state
        .sessions
        .with_session(&id, |w| view::render(w))
        .ok_or_else(|| session_not_found(&id))?;
    Ok(respond(&id, view))
}

// POST /api/booking/:id/pet
#[derive(Deserialize)]
pub struct PetRequest {
    pub pet_type: String,
}

pub async fn select_pet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<PetRequest>,
) -> Result<Response, AppError> {
    let pet: PetType = body
        .pet_type
        .parse()
        .map_err(|e: crate::models::pet::UnknownPetType| AppError::InvalidInput(e.to_string()))?;
    apply(&state, &id, |w| w.set_pet_type(pet))
}

// POST /api/booking/:id/service
#[derive(Deserialize)]
pub struct ServiceRequest {
    pub service_type: String,
}

pub async fn select_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ServiceRequest>,
) -> Result<Response, AppError> {
    let service: ServiceType = body.service_type.parse().map_err(
        |e: crate::models::service::UnknownServiceType| AppError::InvalidInput(e.to_string()),
    )?;
    apply(&state, &id, |w| w.set_service_type(service))
}

// POST /api/booking/:id/contact
#[derive(Deserialize)]
pub struct ContactRequest {
    pub field: String,
    pub value: String,
}

pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ContactRequest>,
) -> Result<Response, AppError> {
    let field: ContactField = body.field.parse().map_err(
        |e: crate::models::contact::UnknownContactField| AppError::InvalidInput(e.to_string()),
    )?;
    apply(&state, &id, |w| w.update_field(field, body.value))
}

// POST /api/booking/:id/date
#[derive(Deserialize)]
pub struct DateRequest {
    pub date: NaiveDate,
}

pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<DateRequest>,
) -> Result<Response, AppError> {
    let booked = booked_slots(&state, &body.date)?;
    apply(&state, &id, |w| w.set_date(body.date, today(), booked))
}

// POST /api/booking/:id/time
#[derive(Deserialize)]
pub struct TimeRequest {
    pub time: String,
}

pub async fn select_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<TimeRequest>,
) -> Result<Response, AppError> {
    apply(&state, &id, |w| w.set_time(&body.time))
}

// POST /api/booking/:id/next
pub async fn next_step(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let pending = state
        .sessions
        .with_session(&id, |w| (w.step() == Step::Schedule).then(|| w.pending_request(today())))
        .ok_or_else(|| session_not_found(&id))?;

    // Every transition except 4 -> 5 is local to the wizard.
    let request = match pending {
        None => {
            return apply(&state, &id, |w| {
                w.next();
                Ok(())
            })
        }
        Some(Err(e)) => return apply(&state, &id, |_| Err(e)),
        Some(Ok(request)) => request,
    };

    let confirmation_id = match state.submitter.submit(&request).await {
        Ok(confirmation_id) => confirmation_id,
        Err(SubmitError::SlotTaken { date, time_slot }) => {
            tracing::info!(session = %id, %date, time = %time_slot, "slot taken before confirmation");
            // Refresh the date's bookings so the view shows the slot as gone.
            let booked = booked_slots(&state, &date)?;
            let view = state
                .sessions
                .with_session(&id, |w| {
                    let _ = w.set_date(date, today(), booked);
                    view::render(w)
                })
                .ok_or_else(|| session_not_found(&id))?;
            let message = SubmitError::SlotTaken { date, time_slot }.to_string();
            return Ok(rejected(StatusCode::CONFLICT, &id, message, view));
        }
        Err(e) => return Err(e.into()),
    };

    let completed = state.sessions.with_session(&id, |w| {
        let outcome = w.complete(&request, confirmation_id.clone());
        (outcome, view::render(w))
    });

    match completed {
        Some((Ok(()), view)) => {
            notify_clinic(&state, &confirmation_id).await;
            Ok(respond(&id, view))
        }
        Some((Err(e), view)) => {
            withdraw_appointment(&state, &confirmation_id)?;
            Ok(rejected(StatusCode::CONFLICT, &id, e.to_string(), view))
        }
        None => {
            withdraw_appointment(&state, &confirmation_id)?;
            Err(session_not_found(&id))
        }
    }
}

/// Cancels an appointment stored for a session that no longer matches it.
fn withdraw_appointment(state: &AppState, appointment_id: &str) -> Result<(), AppError> {
    let db = db::lock(&state.db)?;
    queries::update_appointment_status(&db, appointment_id, &AppointmentStatus::Cancelled)?;
    tracing::warn!(appointment_id, "booking changed during submission, appointment withdrawn");
    Ok(())
}

// POST /api/booking/:id/back
pub async fn previous_step(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    // Once submitted, the appointment exists; the only way on is a new booking.
    apply(&state, &id, |w| {
        if w.step().is_terminal() {
            return Err(WizardError::Completed);
        }
        w.back();
        Ok(())
    })
}

// POST /api/booking/:id/reset
pub async fn reset_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    apply(&state, &id, |w| {
        w.reset();
        Ok(())
    })
}

async fn notify_clinic(state: &AppState, appointment_id: &str) {
    if state.config.clinic_phone.is_empty() {
        return;
    }

    let appointment = {
        db::lock(&state.db).and_then(|db| queries::get_appointment_by_id(&db, appointment_id))
    };

    let appointment = match appointment {
        Ok(Some(a)) => a,
        Ok(None) => {
            tracing::warn!(appointment_id, "appointment missing, skipping clinic notification");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load appointment for notification");
            return;
        }
    };

    let body = appointment_notice(&appointment, &state.config.clinic_name);
    if let Err(e) = state
        .messaging
        .send_message(&state.config.clinic_phone, &body)
        .await
    {
        tracing::error!(error = %e, "failed to notify clinic");
    }
}
