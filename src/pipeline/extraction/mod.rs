//! Document extraction: one uploaded document in, one category-shaped
//! fragment out.
//!
//! The client boundary is synchronous (`reqwest::blocking`); async callers
//! run it through `tokio::task::spawn_blocking`.

pub mod gemini;
pub mod mime;
pub mod parser;
pub mod prompt;
pub mod types;

pub use gemini::*;
pub use mime::*;
pub use parser::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("File too large ({size} bytes, limit {limit} bytes)")]
    RequestTooLarge { size: usize, limit: usize },

    #[error("Extraction service returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Extraction service unreachable at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Extraction service returned no content")]
    NoResponse,

    #[error("Could not parse extraction response: {0}")]
    UnparsableResponse(String),

    #[error("File upload failed: {0}")]
    UploadFailed(String),
}

/// Coarse failure classes surfaced to operators and HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    RequestTooLarge,
    UpstreamFailure,
    UnparsableResponse,
}

impl ExtractionError {
    pub fn kind(&self) -> ExtractionErrorKind {
        match self {
            Self::RequestTooLarge { .. } => ExtractionErrorKind::RequestTooLarge,
            Self::UnparsableResponse(_) => ExtractionErrorKind::UnparsableResponse,
            Self::Upstream { .. }
            | Self::Connection(_)
            | Self::HttpClient(_)
            | Self::NoResponse
            | Self::UploadFailed(_) => ExtractionErrorKind::UpstreamFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_collapse_transport_errors_into_upstream() {
        assert_eq!(
            ExtractionError::Connection("x".into()).kind(),
            ExtractionErrorKind::UpstreamFailure
        );
        assert_eq!(ExtractionError::NoResponse.kind(), ExtractionErrorKind::UpstreamFailure);
        assert_eq!(
            ExtractionError::RequestTooLarge { size: 2, limit: 1 }.kind(),
            ExtractionErrorKind::RequestTooLarge
        );
        assert_eq!(
            ExtractionError::UnparsableResponse("eof".into()).kind(),
            ExtractionErrorKind::UnparsableResponse
        );
    }

    #[test]
    fn too_large_message_names_both_sizes() {
        let msg = ExtractionError::RequestTooLarge { size: 30, limit: 20 }.to_string();
        assert!(msg.contains("30") && msg.contains("20"));
    }
}
