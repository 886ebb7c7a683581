//! Process-wide application state: the registry of live extraction
//! sessions. Sessions are in memory only and end with the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;

use crate::session::{ExtractionSession, RemovalPolicy, SessionError, SharedSession};

// ═══════════════════════════════════════════════════════════
// CoreState: shared by the HTTP API and the CLI
// ═══════════════════════════════════════════════════════════

/// Session registry. `RwLock` so snapshot reads of different sessions do
/// not block each other; each session has its own mutex.
pub struct CoreState {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
    /// Policy given to newly created sessions.
    pub removal_policy: RemovalPolicy,
}

impl CoreState {
    pub fn new(removal_policy: RemovalPolicy) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            removal_policy,
        }
    }

    /// Create and register an empty session.
    pub fn create_session(&self) -> Result<(Uuid, SharedSession), SessionError> {
        let session = ExtractionSession::new(self.removal_policy);
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .insert(id, shared.clone());
        tracing::info!(session_id = %id, policy = ?self.removal_policy, "Session created");
        Ok((id, shared))
    }

    pub fn session(&self, id: Uuid) -> Result<SharedSession, SessionError> {
        self.sessions
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(SessionError::SessionNotFound(id))
    }

    /// Drop a session. Extractions still in flight finish against their own
    /// handle and are then released.
    pub fn remove_session(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .remove(&id)
            .map(|_| tracing::info!(session_id = %id, "Session removed"))
            .ok_or(SessionError::SessionNotFound(id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new(RemovalPolicy::default())
    }
}
