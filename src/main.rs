use std::fs;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pawsandcare::config::AppConfig;
use pawsandcare::db;
use pawsandcare::handlers;
use pawsandcare::models::Catalogs;
use pawsandcare::services::content::sanity::SanityContentSource;
use pawsandcare::services::content::{ContentSource, StaticContentSource};
use pawsandcare::services::messaging::twilio::TwilioSmsProvider;
use pawsandcare::services::messaging::{LogOnlyMessaging, MessagingProvider};
use pawsandcare::services::sessions::SessionStore;
use pawsandcare::services::submission::SqliteSubmitter;
use pawsandcare::state::AppState;

fn load_catalogs(config: &AppConfig) -> anyhow::Result<Catalogs> {
    match &config.catalog_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog file: {path}"))?;
            let catalogs = Catalogs::from_json(&raw)
                .with_context(|| format!("invalid catalog file: {path}"))?;
            tracing::info!(path = %path, "loaded booking catalogs");
            Ok(catalogs)
        }
        None => Ok(Catalogs::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let db = db::open_shared(&config.database_url)?;

    let catalogs = Arc::new(load_catalogs(&config)?);

    let content: Box<dyn ContentSource> = if config.sanity_project_id.is_empty() {
        tracing::info!("no SANITY_PROJECT_ID set, serving built-in site content");
        Box::new(StaticContentSource)
    } else {
        tracing::info!(
            project = %config.sanity_project_id,
            dataset = %config.sanity_dataset,
            "using Sanity content source"
        );
        Box::new(SanityContentSource::new(
            &config.sanity_project_id,
            &config.sanity_dataset,
            &config.sanity_api_version,
        ))
    };

    let messaging: Box<dyn MessagingProvider> = match TwilioSmsProvider::from_config(&config) {
        Some(twilio) => Box::new(twilio),
        None => {
            if !config.clinic_phone.is_empty() {
                tracing::warn!("CLINIC_PHONE is set but Twilio is not configured, notifications will only be logged");
            }
            Box::new(LogOnlyMessaging)
        }
    };

    let state = Arc::new(AppState {
        db: Arc::clone(&db),
        config: config.clone(),
        catalogs,
        sessions: SessionStore::new(config.session_ttl_minutes, config.max_sessions),
        submitter: Box::new(SqliteSubmitter::new(db)),
        messaging,
        content,
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
