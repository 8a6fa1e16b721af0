//! In-memory `SessionStore` with the same merge and expiry rules as Redis.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use banquet_session::session::new_session_id;
use banquet_session::{Session, SessionError, SessionPatch, SessionStore};

#[derive(Clone)]
pub struct InMemorySessionStore {
    pub ttl: Duration,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Push a stored session's expiry into the past, as if its TTL had elapsed
    /// without Redis having evicted the key yet.
    pub fn expire_now(&self, id: &str) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(session) = sessions.get_mut(id) {
            session.expire_at = Utc::now() - Duration::seconds(1);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}

impl SessionStore for InMemorySessionStore {
    async fn update(
        &self,
        id: Option<&str>,
        patch: SessionPatch,
    ) -> Result<Session, SessionError> {
        let id = id.map(str::to_owned).unwrap_or_else(new_session_id);
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let existing = sessions.get(&id).cloned();
        let session = Session::apply(existing, id.clone(), patch, Utc::now(), self.ttl)?;
        sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn find(&self, id: &str) -> Result<Option<Session>, SessionError> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sessions.get(id).cloned())
    }

    async fn remove(&self, id: &str) -> Result<Option<Session>, SessionError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        Ok(sessions.remove(id))
    }
}
