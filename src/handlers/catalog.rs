use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::Catalogs;
use crate::state::AppState;

// GET /api/catalog
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<Catalogs> {
    Json(state.catalogs.as_ref().clone())
}
