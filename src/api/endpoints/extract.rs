//! Stateless single-document extraction.
//!
//! `POST /api/extract`: multipart `file` + `documentType`. Returns the
//! category-shaped fragment without touching any session.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, DocumentUpload};

#[derive(Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub data: serde_json::Value,
}

pub async fn extract(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let DocumentUpload { payload, category } =
        DocumentUpload::from_multipart(multipart, ctx.config.max_file_bytes).await?;

    tracing::info!(
        file_name = %payload.file_name,
        category = %category,
        size = payload.size(),
        "Stateless extraction requested"
    );

    let client = ctx.dispatcher.client();
    let fragment =
        tokio::task::spawn_blocking(move || client.extract(&payload, category)).await??;

    Ok(Json(ExtractResponse {
        success: true,
        data: fragment.to_json(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::pipeline::extraction::MockExtractionClient;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn extract_returns_fragment() {
        let ctx = context(MockExtractionClient::new(json!({
            "certidoes": [{"tipo": "CND Federal", "situacao": "negativa"}]
        })));
        let body = multipart_body(Some(("cnd.pdf", b"%PDF-1.4".as_slice())), Some("certidoes"));
        let response = app(&ctx)
            .oneshot(multipart_request("/api/extract", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["certidoes"][0]["tipo"], "CND Federal");
        assert_eq!(ctx.core.session_count(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_bad_request() {
        let ctx = context(MockExtractionClient::new(json!({})));
        let body = multipart_body(None, Some("juridico"));
        let response = app(&ctx)
            .oneshot(multipart_request("/api/extract", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["message"], "No file provided");
    }

    #[tokio::test]
    async fn missing_or_unknown_document_type_is_bad_request() {
        let ctx = context(MockExtractionClient::new(json!({})));
        for tag in [None, Some("seguros")] {
            let body = multipart_body(Some(("a.pdf", b"x".as_slice())), tag);
            let response = app(&ctx)
                .oneshot(multipart_request("/api/extract", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let ctx = context(MockExtractionClient::failing("quota exceeded"));
        let body = multipart_body(Some(("ata.pdf", b"x".as_slice())), Some("atas"));
        let response = app(&ctx)
            .oneshot(multipart_request("/api/extract", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_FAILURE");
    }

    #[tokio::test]
    async fn non_object_response_is_unprocessable() {
        let ctx = context(MockExtractionClient::new(json!(["not", "an", "object"])));
        let body = multipart_body(Some(("a.pdf", b"x".as_slice())), Some("outros"));
        let response = app(&ctx)
            .oneshot(multipart_request("/api/extract", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
