pub mod admin;
pub mod booking;
pub mod calendar;
pub mod catalog;
pub mod content;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/content", get(content::get_content))
        .route("/api/booking", post(booking::start_booking))
        .route("/api/booking/:id", get(booking::get_booking))
        .route("/api/booking/:id/pet", post(booking::select_pet))
        .route("/api/booking/:id/service", post(booking::select_service))
        .route("/api/booking/:id/contact", post(booking::update_contact))
        .route("/api/booking/:id/date", post(booking::select_date))
        .route("/api/booking/:id/time", post(booking::select_time))
        .route("/api/booking/:id/next", post(booking::next_step))
        .route("/api/booking/:id/back", post(booking::previous_step))
        .route("/api/booking/:id/reset", post(booking::reset_booking))
        .route("/api/admin/appointments", get(admin::get_appointments))
        .route(
            "/api/admin/appointments/:id/cancel",
            post(admin::cancel_appointment),
        )
        .route(
            "/calendar/:appointment_id",
            get(calendar::download_ics),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
