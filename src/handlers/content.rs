use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Datelike;

use crate::models::SiteContent;
use crate::services::content::load_site_content;
use crate::state::AppState;

// GET /api/content
pub async fn get_content(State(state): State<Arc<AppState>>) -> Json<SiteContent> {
    let year = chrono::Local::now().year();
    Json(load_site_content(state.content.as_ref(), year).await)
}
