//! Server-side session state and the store abstraction behind it.
//!
//! Sessions are keyed by an opaque id carried in an encrypted cookie; the
//! store is injected into handlers through application state so a
//! different backend (a shared cache, a database table) can replace the
//! bundled in-memory map without touching the handlers.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error as ThisError;
use uuid::Uuid;

pub type SessionId = String;

/// Per-client authentication state. Empty (all false / none) until a
/// successful login mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub admin: bool,
    pub user_id: Option<i64>,
}

impl Session {
    /// Mark the session authenticated as a regular user, recording the
    /// profile id when one resolved.
    pub fn grant_user(&mut self, user_id: Option<i64>) {
        self.authenticated = true;
        self.user_id = user_id;
    }

    /// Mark the session as admin. Admin implies authenticated, so both
    /// flags are set together; there is no other way to set `admin`.
    pub fn grant_admin(&mut self) {
        self.authenticated = true;
        self.admin = true;
    }
}

#[derive(Debug, ThisError)]
#[error("session store failure: {0}")]
pub struct SessionStoreError(pub String);

/// Storage contract for sessions. Expiry policy belongs to the
/// implementation; the application never ages sessions itself.
pub trait SessionStore: Send + Sync + 'static {
    /// Allocate a new empty session and return its opaque id.
    fn create(&self) -> SessionId;

    fn get(&self, id: &str) -> Option<Session>;

    /// Replace the state of an existing session. Returns false when the
    /// id is unknown (expired or destroyed since lookup).
    fn update(&self, id: &str, session: Session) -> bool;

    /// Remove a session. Idempotent: destroying an unknown id succeeds.
    fn destroy(&self, id: &str) -> Result<(), SessionStoreError>;
}

/// Process-local session store.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Session>> {
        // Session state is recoverable; a poisoned map is still usable.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self) -> SessionId {
        let id = Uuid::new_v4().to_string();
        self.lock().insert(id.clone(), Session::default());
        id
    }

    fn get(&self, id: &str) -> Option<Session> {
        self.lock().get(id).cloned()
    }

    fn update(&self, id: &str, session: Session) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(id) {
            Some(slot) => {
                *slot = session;
                true
            }
            None => false,
        }
    }

    fn destroy(&self, id: &str) -> Result<(), SessionStoreError> {
        self.lock().remove(id);
        Ok(())
    }
}
