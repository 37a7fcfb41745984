use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub session_ttl_minutes: i64,
    pub max_sessions: usize,
    pub catalog_path: Option<String>,
    pub clinic_name: String,
    pub clinic_phone: String,
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "pawsandcare.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m| *m > 0)
                .unwrap_or(30),
            max_sessions: env::var("MAX_SESSIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10_000),
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            clinic_name: env::var("CLINIC_NAME").unwrap_or_else(|_| "Paws & Care".to_string()),
            clinic_phone: env::var("CLINIC_PHONE").unwrap_or_default(),
            sanity_project_id: env::var("SANITY_PROJECT_ID").unwrap_or_default(),
            sanity_dataset: env::var("SANITY_DATASET").unwrap_or_else(|_| "production".to_string()),
            sanity_api_version: env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| "2024-01-01".to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER").unwrap_or_default(),
        }
    }

    pub fn sms_configured(&self) -> bool {
        !self.twilio_account_sid.is_empty()
            && !self.twilio_auth_token.is_empty()
            && !self.twilio_phone_number.is_empty()
    }
}
