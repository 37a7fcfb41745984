pub mod twilio;

use async_trait::async_trait;

use crate::models::Appointment;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Stands in for SMS when no provider is configured.
pub struct LogOnlyMessaging;

#[async_trait]
impl MessagingProvider for LogOnlyMessaging {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(to, body, "SMS not configured, message logged only");
        Ok(())
    }
}

pub fn appointment_notice(appt: &Appointment, clinic_name: &str) -> String {
    let mut body = format!(
        "{clinic_name}: new appointment for {} ({}) on {} at {}. Service: {}. Owner: {}, {}, {}.",
        appt.pet_name,
        appt.pet_type,
        appt.date.format("%a %b %-d"),
        appt.time_slot,
        appt.service_type,
        appt.owner_name,
        appt.phone,
        appt.email,
    );
    if let Some(notes) = &appt.notes {
        body.push_str(&format!(" Notes: {notes}"));
    }
    body
}
