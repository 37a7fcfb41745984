use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::MessagingProvider;
use crate::config::AppConfig;

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioSmsProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

/// Error payload Twilio returns alongside 4xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<i64>,
    message: String,
}

impl ApiError {
    fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("Twilio error {code}: {}", self.message),
            None => format!("Twilio error: {}", self.message),
        }
    }
}

impl TwilioSmsProvider {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
            client: reqwest::Client::new(),
        }
    }

    /// `None` unless the account sid, token and sender number are all set.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.sms_configured().then(|| {
            Self::new(
                config.twilio_account_sid.clone(),
                config.twilio_auth_token.clone(),
                config.twilio_phone_number.clone(),
            )
        })
    }
}

#[async_trait]
impl MessagingProvider for TwilioSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("{API_BASE}/Accounts/{}/Messages.json", self.account_sid);

        let res = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", &self.from_number), ("Body", body)])
            .send()
            .await
            .context("failed to reach Twilio")?;

        let status = res.status();
        let text = res.text().await.context("failed to read Twilio response")?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.describe())
                .unwrap_or_else(|_| format!("Twilio returned {status}"));
            anyhow::bail!(reason);
        }

        let created: MessageCreated =
            serde_json::from_str(&text).context("unexpected Twilio response")?;
        tracing::debug!(to, sid = %created.sid, "appointment SMS queued");
        Ok(())
    }
}
