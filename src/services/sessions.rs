use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{Duration, NaiveDateTime, Utc};

use crate::services::wizard::BookingWizard;

struct Session {
    wizard: BookingWizard,
    expires_at: NaiveDateTime,
}

/// In-memory booking sessions with a sliding expiry and a cap on how many
/// may be live at once.
pub struct SessionStore {
    ttl: Duration,
    max_sessions: usize,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64, max_sessions: usize) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            max_sessions,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// `None` when the store is full even after expired sessions are swept.
    pub fn create(&self, wizard: BookingWizard) -> Option<String> {
        self.create_at(wizard, Utc::now().naive_utc())
    }

    /// Runs `f` against the session's wizard and extends its expiry. `None`
    /// when the session is unknown or has expired.
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut BookingWizard) -> R) -> Option<R> {
        self.with_session_at(id, Utc::now().naive_utc(), f)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        // Wizard operations never leave a session half-updated, so a poisoned
        // map is still usable.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create_at(&self, wizard: BookingWizard, now: NaiveDateTime) -> Option<String> {
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::debug!(swept, "expired booking sessions removed");
        }

        if sessions.len() >= self.max_sessions {
            tracing::warn!(limit = self.max_sessions, "booking session limit reached");
            return None;
        }

        let id = uuid::Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            Session {
                wizard,
                expires_at: now + self.ttl,
            },
        );
        tracing::info!(session = %id, active = sessions.len(), "booking session started");
        Some(id)
    }

    fn with_session_at<R>(
        &self,
        id: &str,
        now: NaiveDateTime,
        f: impl FnOnce(&mut BookingWizard) -> R,
    ) -> Option<R> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id)?;
        if session.expires_at <= now {
            sessions.remove(id);
            tracing::debug!(session = %id, "booking session expired");
            return None;
        }
        session.expires_at = now + self.ttl;
        Some(f(&mut session.wizard))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{Catalogs, PetType, Step};

    fn wizard() -> BookingWizard {
        BookingWizard::new(Arc::new(Catalogs::default()))
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_session_round_trip() {
        let store = SessionStore::new(30, 100);
        let id = store.create(wizard()).unwrap();
        store
            .with_session(&id, |w| w.set_pet_type(PetType::Dog))
            .unwrap()
            .unwrap();
        let step = store.with_session(&id, |w| {
            w.next();
            w.step()
        });
        assert_eq!(step, Some(Step::Service));
        assert!(store.with_session("unknown", |w| w.step()).is_none());
    }

    #[test]
    fn test_expiry_slides_with_activity() {
        let store = SessionStore::new(30, 100);
        let id = store.create_at(wizard(), dt("2025-06-16 10:00")).unwrap();

        assert!(store.with_session_at(&id, dt("2025-06-16 10:20"), |_| ()).is_some());
        // 10:45 is within 30 minutes of the last touch at 10:20
        assert!(store.with_session_at(&id, dt("2025-06-16 10:45"), |_| ()).is_some());
        assert!(store.with_session_at(&id, dt("2025-06-16 11:30"), |_| ()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_sweeps_expired() {
        let store = SessionStore::new(30, 100);
        store.create_at(wizard(), dt("2025-06-16 09:00"));
        store.create_at(wizard(), dt("2025-06-16 09:10"));
        assert_eq!(store.len(), 2);

        store.create_at(wizard(), dt("2025-06-16 10:00"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_refuses_when_full() {
        let store = SessionStore::new(30, 2);
        assert!(store.create_at(wizard(), dt("2025-06-16 09:00")).is_some());
        assert!(store.create_at(wizard(), dt("2025-06-16 09:05")).is_some());
        assert!(store.create_at(wizard(), dt("2025-06-16 09:10")).is_none());
        assert_eq!(store.len(), 2);

        // Once the first session lapses there is room again.
        assert!(store.create_at(wizard(), dt("2025-06-16 09:31")).is_some());
        assert_eq!(store.len(), 2);
    }
}
