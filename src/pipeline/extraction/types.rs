use std::sync::Mutex;

use super::ExtractionError;
use crate::models::{Category, CategoryValue};

/// An uploaded document, held in memory until extraction finishes.
#[derive(Debug, Clone)]
pub struct DocumentPayload {
    pub file_name: String,
    /// Resolved MIME type (see `resolve_mime_type`).
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentPayload {
    pub fn new(file_name: impl Into<String>, declared_mime: Option<&str>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = super::resolve_mime_type(&file_name, declared_mime);
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Abstraction over the extraction service for testability.
pub trait ExtractionClient: Send + Sync {
    /// Extract one document into a fragment shaped for `category`.
    fn extract(
        &self,
        document: &DocumentPayload,
        category: Category,
    ) -> Result<CategoryValue, ExtractionError>;

    /// Extract several documents of one category in a single request,
    /// consolidated into one fragment.
    fn extract_many(
        &self,
        documents: &[DocumentPayload],
        category: Category,
    ) -> Result<CategoryValue, ExtractionError>;
}

/// Mock client returning canned JSON, or a canned failure.
pub struct MockExtractionClient {
    response: Result<serde_json::Value, String>,
    calls: Mutex<Vec<(String, Category)>>,
}

impl MockExtractionClient {
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with an upstream error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// File names and categories seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, Category)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn respond(&self, category: Category) -> Result<CategoryValue, ExtractionError> {
        match &self.response {
            Ok(value) => CategoryValue::from_json(category, value.clone())
                .map_err(|e| ExtractionError::UnparsableResponse(e.to_string())),
            Err(message) => Err(ExtractionError::Upstream {
                status: 500,
                body: message.clone(),
            }),
        }
    }
}

impl ExtractionClient for MockExtractionClient {
    fn extract(
        &self,
        document: &DocumentPayload,
        category: Category,
    ) -> Result<CategoryValue, ExtractionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((document.file_name.clone(), category));
        }
        self.respond(category)
    }

    fn extract_many(
        &self,
        documents: &[DocumentPayload],
        category: Category,
    ) -> Result<CategoryValue, ExtractionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.extend(documents.iter().map(|d| (d.file_name.clone(), category)));
        }
        self.respond(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mock_client_returns_configured_fragment() {
        let client = MockExtractionClient::new(json!({"certidoes": [{"tipo": "CNDT"}]}));
        let doc = DocumentPayload::new("cndt.pdf", None, vec![1, 2, 3]);
        let value = client.extract(&doc, Category::Certificates).unwrap();
        assert_eq!(value.category(), Category::Certificates);
        assert_eq!(client.calls(), vec![("cndt.pdf".to_string(), Category::Certificates)]);
    }

    #[test]
    fn mock_client_failure_is_upstream() {
        let client = MockExtractionClient::failing("quota exceeded");
        let doc = DocumentPayload::new("a.pdf", None, vec![]);
        let err = client.extract(&doc, Category::Legal).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn mock_client_rejects_non_object_response() {
        let client = MockExtractionClient::new(json!("texto livre"));
        let doc = DocumentPayload::new("a.pdf", None, vec![]);
        let err = client.extract(&doc, Category::Legal).unwrap_err();
        assert!(matches!(err, ExtractionError::UnparsableResponse(_)));
    }

    #[test]
    fn payload_resolves_mime_from_extension() {
        let doc = DocumentPayload::new("ata.pdf", Some("application/octet-stream"), vec![0; 4]);
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.size(), 4);
    }
}
