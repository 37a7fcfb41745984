use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Db;
use crate::models::Catalogs;
use crate::services::content::ContentSource;
use crate::services::messaging::MessagingProvider;
use crate::services::sessions::SessionStore;
use crate::services::submission::AppointmentSubmitter;

pub struct AppState {
    pub db: Db,
    pub config: AppConfig,
    pub catalogs: Arc<Catalogs>,
    pub sessions: SessionStore,
    pub submitter: Box<dyn AppointmentSubmitter>,
    pub messaging: Box<dyn MessagingProvider>,
    pub content: Box<dyn ContentSource>,
}
