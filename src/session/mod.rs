//! Per-operator extraction session: file records per category and the
//! running merged value of each category.
//!
//! Every mutation runs to completion on `&mut self`; callers that share a
//! session across tasks wrap it in a mutex (see `dispatch`). Results are
//! merged in the order they are delivered, not the order files were added.

pub mod dispatch;
pub mod types;

pub use dispatch::*;
pub use types::*;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::merge;
use crate::models::{Category, CategoryValue};

pub struct ExtractionSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    policy: RemovalPolicy,
    /// Records per category, in submission order.
    files: HashMap<Category, Vec<FileRecord>>,
    accumulators: HashMap<Category, CategoryValue>,
}

impl ExtractionSession {
    pub fn new(policy: RemovalPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            policy,
            files: HashMap::new(),
            accumulators: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    // ── Submission ──────────────────────────────────────────

    /// Register a document whose extraction starts right away.
    pub fn submit(&mut self, file_name: impl Into<String>, category: Category) -> Uuid {
        self.insert(file_name.into(), category, FileStatus::Extracting)
    }

    /// Register a document that waits for a worker slot.
    pub fn enqueue(&mut self, file_name: impl Into<String>, category: Category) -> Uuid {
        self.insert(file_name.into(), category, FileStatus::Queued)
    }

    fn insert(&mut self, file_name: String, category: Category, status: FileStatus) -> Uuid {
        let record = FileRecord::new(file_name, category, status);
        let id = record.id;
        tracing::info!(file_id = %id, category = %category, file = %record.file_name, "Document submitted");
        self.files.entry(category).or_default().push(record);
        id
    }

    /// `Queued → Extracting` once a worker picks the file up.
    pub fn begin(&mut self, file_id: Uuid, category: Category) -> Result<(), SessionError> {
        let record = self.record_mut(file_id, category)?;
        if record.status != FileStatus::Queued {
            return Err(SessionError::InvalidTransition {
                file_id,
                from: record.status,
                to: FileStatus::Extracting,
            });
        }
        record.status = FileStatus::Extracting;
        Ok(())
    }

    // ── Extraction results ──────────────────────────────────

    /// Store the fragment on the file and fold it into the category value.
    ///
    /// A result for a file that no longer exists is dropped.
    pub fn on_extraction_succeeded(
        &mut self,
        file_id: Uuid,
        category: Category,
        fragment: CategoryValue,
    ) -> Result<Delivery, SessionError> {
        if fragment.category() != category {
            return Err(SessionError::CategoryMismatch {
                expected: category,
                found: fragment.category(),
            });
        }
        let Some(record) = self.find_mut(file_id, category) else {
            tracing::warn!(file_id = %file_id, category = %category, "Discarding result for removed file");
            return Ok(Delivery::Discarded);
        };
        if record.status.is_terminal() {
            return Err(SessionError::InvalidTransition {
                file_id,
                from: record.status,
                to: FileStatus::Completed,
            });
        }

        record.status = FileStatus::Completed;
        record.error = None;
        record.fragment = Some(fragment.clone());

        let existing = self.accumulators.remove(&category);
        let merged = merge::merge(existing, fragment);
        tracing::debug!(category = %category, "Fragment merged into accumulator");
        self.accumulators.insert(category, merged);
        Ok(Delivery::Applied)
    }

    /// Mark the file failed. The category value is left untouched.
    pub fn on_extraction_failed(
        &mut self,
        file_id: Uuid,
        category: Category,
        message: impl Into<String>,
    ) -> Result<Delivery, SessionError> {
        let message = message.into();
        let Some(record) = self.find_mut(file_id, category) else {
            tracing::warn!(file_id = %file_id, category = %category, "Discarding failure for removed file");
            return Ok(Delivery::Discarded);
        };
        if record.status.is_terminal() {
            return Err(SessionError::InvalidTransition {
                file_id,
                from: record.status,
                to: FileStatus::Failed,
            });
        }

        tracing::warn!(file_id = %file_id, category = %category, error = %message, "Extraction failed");
        record.status = FileStatus::Failed;
        record.error = Some(message);
        Ok(Delivery::Applied)
    }

    // ── Removal ─────────────────────────────────────────────

    /// Remove a file. See `RemovalPolicy` for what happens to the
    /// category value.
    pub fn remove(&mut self, file_id: Uuid, category: Category) -> Result<(), SessionError> {
        let records = self
            .files
            .get_mut(&category)
            .ok_or(SessionError::FileNotFound { category, file_id })?;
        let index = records
            .iter()
            .position(|r| r.id == file_id)
            .ok_or(SessionError::FileNotFound { category, file_id })?;
        records.remove(index);

        let completed = records
            .iter()
            .filter(|r| r.status == FileStatus::Completed)
            .count();

        match self.policy {
            RemovalPolicy::ClearWhenEmpty => {
                if completed == 0 {
                    self.accumulators.remove(&category);
                }
            }
            RemovalPolicy::Replay => {
                let fragments = records.iter().filter_map(|r| r.fragment.clone());
                match merge::fold(fragments) {
                    Some(value) => {
                        self.accumulators.insert(category, value);
                    }
                    None => {
                        self.accumulators.remove(&category);
                    }
                }
            }
        }

        tracing::info!(file_id = %file_id, category = %category, remaining_completed = completed, "Document removed");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────

    /// True when at least one category holds merged data.
    pub fn has_any_data(&self) -> bool {
        !self.accumulators.is_empty()
    }

    pub fn accumulator(&self, category: Category) -> Option<&CategoryValue> {
        self.accumulators.get(&category)
    }

    pub fn accumulators(&self) -> &HashMap<Category, CategoryValue> {
        &self.accumulators
    }

    pub fn files(&self, category: Category) -> &[FileRecord] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn file(&self, file_id: Uuid, category: Category) -> Option<&FileRecord> {
        self.files(category).iter().find(|r| r.id == file_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let categories = Category::all()
            .iter()
            .map(|&category| CategorySnapshot {
                category,
                title: category.title(),
                files: self.files(category).iter().map(FileSnapshot::from).collect(),
                data: self.accumulator(category).cloned(),
            })
            .collect();

        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            removal_policy: self.policy,
            has_data: self.has_any_data(),
            categories,
        }
    }

    fn find_mut(&mut self, file_id: Uuid, category: Category) -> Option<&mut FileRecord> {
        self.files
            .get_mut(&category)
            .and_then(|records| records.iter_mut().find(|r| r.id == file_id))
    }

    fn record_mut(&mut self, file_id: Uuid, category: Category) -> Result<&mut FileRecord, SessionError> {
        self.find_mut(file_id, category)
            .ok_or(SessionError::FileNotFound { category, file_id })
    }
}

impl Default for ExtractionSession {
    fn default() -> Self {
        Self::new(RemovalPolicy::default())
    }
}
