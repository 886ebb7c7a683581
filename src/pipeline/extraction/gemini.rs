use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::parser::parse_response_json;
use super::prompt::{build_consolidation_prompt, build_extraction_prompt};
use super::types::{DocumentPayload, ExtractionClient};
use super::ExtractionError;
use crate::models::{Category, CategoryValue};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Documents above this size go through the File API instead of inline data.
pub const INLINE_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Default upper bound for a single uploaded document.
pub const DEFAULT_MAX_FILE_BYTES: usize = 20 * 1024 * 1024;

const UPLOAD_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Give up on a remote file stuck in PROCESSING after this many polls.
const MAX_UPLOAD_POLLS: u32 = 300;

const TEMPERATURE: f32 = 0.1;
const TOP_K: u32 = 1;
const TOP_P: f32 = 1.0;
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Gemini `generateContent` client.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    max_file_bytes: usize,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, ExtractionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExtractionError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            client,
            timeout_secs,
        })
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: usize) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn check_size(&self, document: &DocumentPayload) -> Result<(), ExtractionError> {
        if document.size() > self.max_file_bytes {
            return Err(ExtractionError::RequestTooLarge {
                size: document.size(),
                limit: self.max_file_bytes,
            });
        }
        Ok(())
    }

    fn map_send_error(&self, e: reqwest::Error) -> ExtractionError {
        if e.is_connect() {
            ExtractionError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ExtractionError::HttpClient(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            ExtractionError::HttpClient(e.to_string())
        }
    }

    /// Inline part for small documents, File API reference for large ones.
    fn document_part(&self, document: &DocumentPayload) -> Result<Part, ExtractionError> {
        if document.size() <= INLINE_LIMIT_BYTES {
            return Ok(Part::inline(document));
        }
        tracing::info!(
            file = %document.file_name,
            size_mb = %format!("{:.2}", document.size() as f64 / (1024.0 * 1024.0)),
            "Large document, using File API upload"
        );
        let file_uri = self.upload(document)?;
        Ok(Part::File {
            file_data: FileData {
                mime_type: document.mime_type.clone(),
                file_uri,
            },
        })
    }

    fn generate(&self, parts: Vec<Part>) -> Result<serde_json::Value, ExtractionError> {
        let body = GenerateRequest::new(parts);

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ExtractionError::HttpClient(format!("Malformed response envelope: {e}")))?;

        let text = response_text(parsed)?;
        parse_response_json(&text)
    }

    // ── File API ────────────────────────────────────────────

    fn upload(&self, document: &DocumentPayload) -> Result<String, ExtractionError> {
        let start = self
            .client
            .post(format!("{}/upload/v1beta/files?key={}", self.base_url, self.api_key))
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", document.size().to_string())
            .header("X-Goog-Upload-Header-Content-Type", document.mime_type.as_str())
            .json(&serde_json::json!({ "file": { "display_name": document.file_name } }))
            .send()
            .map_err(|e| self.map_send_error(e))?;

        if !start.status().is_success() {
            let status = start.status().as_u16();
            let body = start.text().unwrap_or_default();
            return Err(ExtractionError::UploadFailed(format!(
                "init returned {status}: {body}"
            )));
        }

        let upload_url = start
            .headers()
            .get("X-Goog-Upload-URL")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ExtractionError::UploadFailed("no upload URL returned".into()))?;

        let uploaded = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(document.bytes.clone())
            .send()
            .map_err(|e| self.map_send_error(e))?;

        if !uploaded.status().is_success() {
            let status = uploaded.status().as_u16();
            let body = uploaded.text().unwrap_or_default();
            return Err(ExtractionError::UploadFailed(format!(
                "upload returned {status}: {body}"
            )));
        }

        let envelope: UploadEnvelope = uploaded
            .json()
            .map_err(|e| ExtractionError::UploadFailed(format!("malformed upload response: {e}")))?;

        self.wait_until_active(envelope.file)
    }

    fn wait_until_active(&self, mut file: RemoteFile) -> Result<String, ExtractionError> {
        let mut polls = 0;
        while file.state.as_deref() == Some("PROCESSING") {
            if polls >= MAX_UPLOAD_POLLS {
                return Err(ExtractionError::UploadFailed(format!(
                    "{} still processing after {polls} checks",
                    file.name
                )));
            }
            polls += 1;
            std::thread::sleep(UPLOAD_POLL_INTERVAL);

            let status = self
                .client
                .get(format!("{}/v1beta/{}?key={}", self.base_url, file.name, self.api_key))
                .send()
                .map_err(|e| self.map_send_error(e))?;

            // A failed status check is retried on the next tick.
            if status.status().is_success() {
                if let Ok(latest) = status.json::<RemoteFile>() {
                    file = RemoteFile {
                        name: file.name,
                        ..latest
                    };
                }
            }
        }

        if file.state.as_deref() == Some("FAILED") {
            return Err(ExtractionError::UploadFailed(format!(
                "{} failed remote processing",
                file.name
            )));
        }
        tracing::debug!(name = %file.name, polls, "Uploaded file ready");
        Ok(file.uri)
    }
}

impl ExtractionClient for GeminiClient {
    fn extract(
        &self,
        document: &DocumentPayload,
        category: Category,
    ) -> Result<CategoryValue, ExtractionError> {
        self.check_size(document)?;

        let parts = vec![
            Part::Text {
                text: build_extraction_prompt(category),
            },
            self.document_part(document)?,
        ];
        let json = self.generate(parts)?;
        to_fragment(category, json)
    }

    fn extract_many(
        &self,
        documents: &[DocumentPayload],
        category: Category,
    ) -> Result<CategoryValue, ExtractionError> {
        for document in documents {
            self.check_size(document)?;
        }

        let mut parts = vec![Part::Text {
            text: build_consolidation_prompt(category),
        }];
        parts.extend(documents.iter().map(Part::inline));

        let json = self.generate(parts)?;
        to_fragment(category, json)
    }
}

fn to_fragment(category: Category, json: serde_json::Value) -> Result<CategoryValue, ExtractionError> {
    CategoryValue::from_json(category, json)
        .map_err(|e| ExtractionError::UnparsableResponse(e.to_string()))
}

/// First candidate's first text part, or the error the service reported.
fn response_text(response: GenerateResponse) -> Result<String, ExtractionError> {
    if let Some(error) = response.error {
        return Err(ExtractionError::Upstream {
            status: error.code.unwrap_or(200),
            body: error.message.unwrap_or_default(),
        });
    }

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ExtractionError::NoResponse)
}

// ═══════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Inline { inline_data: InlineData },
    File { file_data: FileData },
}

impl Part {
    fn inline(document: &DocumentPayload) -> Self {
        Part::Inline {
            inline_data: InlineData {
                mime_type: document.mime_type.clone(),
                data: base64::engine::general_purpose::STANDARD.encode(&document.bytes),
            },
        }
    }
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct FileData {
    mime_type: String,
    file_uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ServiceError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ServiceError {
    code: Option<u16>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct UploadEnvelope {
    file: RemoteFile,
}

#[derive(Deserialize)]
struct RemoteFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    uri: String,
    state: Option<String>,
}
