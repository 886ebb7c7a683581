//! Shared types for the HTTP API layer.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::Multipart;

use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::core_state::CoreState;
use crate::models::Category;
use crate::pipeline::extraction::{DocumentPayload, ExtractionClient, ExtractionError};
use crate::session::Dispatcher;

/// Room for multipart framing on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub dispatcher: Dispatcher,
    pub config: Arc<AppConfig>,
}

impl ApiContext {
    pub fn new(config: AppConfig, client: Arc<dyn ExtractionClient>) -> Self {
        Self {
            core: Arc::new(CoreState::new(config.removal_policy)),
            dispatcher: Dispatcher::new(client, config.workers),
            config: Arc::new(config),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Document upload: `file` + `documentType` multipart form
// ═══════════════════════════════════════════════════════════

/// One uploaded document and the category the operator filed it under.
pub struct DocumentUpload {
    pub payload: DocumentPayload,
    pub category: Category,
}

impl DocumentUpload {
    /// Read the `file` and `documentType` fields. Missing parts and files
    /// over `max_file_bytes` are rejected before any extraction work.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_file_bytes: usize,
    ) -> Result<Self, ApiError> {
        let mut file: Option<DocumentPayload> = None;
        let mut document_type: Option<String> = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read multipart field: {e}");
                    return Err(ApiError::BadRequest(format!("Malformed upload: {e}")));
                }
            };
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or("document").to_string();
                    let declared = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
                    file = Some(DocumentPayload::new(file_name, declared.as_deref(), bytes.to_vec()));
                }
                "documentType" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read documentType: {e}")))?;
                    document_type = Some(text);
                }
                _ => {}
            }
        }

        let payload = file.ok_or_else(|| ApiError::BadRequest("No file provided".into()))?;
        let document_type = document_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Document type not specified".into()))?;
        let category = Category::from_str(&document_type)?;

        if payload.size() > max_file_bytes {
            return Err(ExtractionError::RequestTooLarge {
                size: payload.size(),
                limit: max_file_bytes,
            }
            .into());
        }

        Ok(Self { payload, category })
    }
}
