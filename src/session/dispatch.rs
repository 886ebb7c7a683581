//! Bounded background extraction for a shared session.

use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{ExtractionSession, SessionError};
use crate::models::Category;
use crate::pipeline::extraction::{DocumentPayload, ExtractionClient};

pub type SharedSession = Arc<Mutex<ExtractionSession>>;

/// Default number of concurrent extraction requests.
pub const DEFAULT_WORKERS: usize = 4;

/// Runs extractions on the blocking pool, at most `workers` at a time, and
/// applies each result to its session as it arrives.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn ExtractionClient>,
    permits: Arc<Semaphore>,
}

/// A file accepted for background extraction.
pub struct Submission {
    pub file_id: Uuid,
    pub handle: JoinHandle<()>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn ExtractionClient>, workers: usize) -> Self {
        Self {
            client,
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub fn client(&self) -> Arc<dyn ExtractionClient> {
        self.client.clone()
    }

    /// Record the file as queued and start its extraction in the background.
    /// Must be called from within a tokio runtime.
    pub fn submit(
        &self,
        session: &SharedSession,
        payload: DocumentPayload,
        category: Category,
    ) -> Result<Submission, SessionError> {
        let file_id = session
            .lock()
            .map_err(|_| SessionError::LockPoisoned)?
            .enqueue(payload.file_name.clone(), category);

        let handle = tokio::spawn(self.clone().run(session.clone(), file_id, category, payload));
        Ok(Submission { file_id, handle })
    }

    async fn run(
        self,
        session: SharedSession,
        file_id: Uuid,
        category: Category,
        payload: DocumentPayload,
    ) {
        let Ok(_permit) = self.permits.clone().acquire_owned().await else {
            tracing::error!(file_id = %file_id, "Extraction worker pool closed");
            return;
        };

        // Removed while waiting for a slot: nothing to do.
        match session.lock() {
            Ok(mut guard) => {
                if let Err(e) = guard.begin(file_id, category) {
                    tracing::debug!(file_id = %file_id, error = %e, "Skipping extraction");
                    return;
                }
            }
            Err(_) => {
                tracing::error!(file_id = %file_id, "Session lock poisoned");
                return;
            }
        }

        let client = self.client.clone();
        let result = tokio::task::spawn_blocking(move || client.extract(&payload, category)).await;

        let Ok(mut guard) = session.lock() else {
            tracing::error!(file_id = %file_id, "Session lock poisoned");
            return;
        };
        let applied = match result {
            Ok(Ok(fragment)) => {
                tracing::info!(file_id = %file_id, category = %category, "Extraction finished");
                guard.on_extraction_succeeded(file_id, category, fragment)
            }
            Ok(Err(e)) => guard.on_extraction_failed(file_id, category, e.to_string()),
            Err(join) => guard.on_extraction_failed(file_id, category, format!("Extraction task failed: {join}")),
        };
        if let Err(e) = applied {
            tracing::warn!(file_id = %file_id, error = %e, "Extraction result not applied");
        }
    }
}
