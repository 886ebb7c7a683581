use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Category, CategoryValue};

// ═══════════════════════════════════════════
// File lifecycle
// ═══════════════════════════════════════════

/// `Queued → Extracting → {Completed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Queued,
    Extracting,
    Completed,
    Failed,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Extracting => "extracting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted document and where it stands.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: Uuid,
    pub file_name: String,
    pub category: Category,
    pub status: FileStatus,
    pub error: Option<String>,
    /// The extracted fragment, kept once completed.
    pub fragment: Option<CategoryValue>,
    pub submitted_at: DateTime<Utc>,
}

impl FileRecord {
    pub(crate) fn new(file_name: String, category: Category, status: FileStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            category,
            status,
            error: None,
            fragment: None,
            submitted_at: Utc::now(),
        }
    }
}

// ═══════════════════════════════════════════
// Removal policy
// ═══════════════════════════════════════════

/// What happens to a category's accumulated value when a file is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Clear the value once no completed file remains; otherwise leave it,
    /// removed file's contribution included.
    #[default]
    ClearWhenEmpty,
    /// Rebuild the value from the remaining completed fragments, in
    /// submission order.
    Replay,
}

impl std::str::FromStr for RemovalPolicy {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" | "clear_when_empty" => Ok(Self::ClearWhenEmpty),
            "replay" => Ok(Self::Replay),
            other => Err(SessionError::InvalidPolicy(other.to_string())),
        }
    }
}

/// Whether an extraction result changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// The file was removed before its result arrived.
    Discarded,
}

// ═══════════════════════════════════════════
// Snapshot (read model for the API)
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSnapshot {
    pub id: Uuid,
    pub file_name: String,
    pub status: FileStatus,
    pub error: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&FileRecord> for FileSnapshot {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id,
            file_name: record.file_name.clone(),
            status: record.status,
            error: record.error.clone(),
            submitted_at: record.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub category: Category,
    pub title: &'static str,
    pub files: Vec<FileSnapshot>,
    pub data: Option<CategoryValue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub removal_policy: RemovalPolicy,
    pub has_data: bool,
    pub categories: Vec<CategorySnapshot>,
}

// ═══════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("File {file_id} not found in category {category}")]
    FileNotFound { category: Category, file_id: Uuid },

    #[error("File {file_id} cannot move from {from} to {to}")]
    InvalidTransition {
        file_id: Uuid,
        from: FileStatus,
        to: FileStatus,
    },

    #[error("Fragment for {found} delivered to a {expected} file")]
    CategoryMismatch { expected: Category, found: Category },

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("No extracted data yet; add at least one document")]
    NoData,

    #[error("Unknown removal policy: {0}")]
    InvalidPolicy(String),

    #[error("Session lock poisoned")]
    LockPoisoned,
}
