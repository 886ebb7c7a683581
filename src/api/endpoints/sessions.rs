//! Incremental extraction sessions.
//!
//! Files are added one at a time; each extraction runs in the background
//! and merges into its category as it completes. Clients poll the snapshot
//! and request the report once any category has data.

use std::str::FromStr;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::endpoints::report::{parse_format, render_response};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, DocumentUpload};
use crate::models::Category;
use crate::report::{assemble, metadata_for};
use crate::session::{SessionError, SessionSnapshot, SharedSession};

fn snapshot_of(session: &SharedSession) -> Result<SessionSnapshot, ApiError> {
    Ok(session
        .lock()
        .map_err(|_| SessionError::LockPoisoned)?
        .snapshot())
}

/// `POST /api/sessions`
pub async fn create(State(ctx): State<ApiContext>) -> Result<Response, ApiError> {
    let (_, session) = ctx.core.create_session()?;
    Ok((StatusCode::CREATED, Json(snapshot_of(&session)?)).into_response())
}

/// `GET /api/sessions/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = ctx.core.session(id)?;
    Ok(Json(snapshot_of(&session)?))
}

/// `DELETE /api/sessions/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.core.remove_session(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAccepted {
    pub file_id: Uuid,
    pub category: Category,
    pub file_name: String,
}

/// `POST /api/sessions/:id/files`: multipart `file` + `documentType`.
/// Returns immediately; extraction continues in the background.
pub async fn add_file(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let session = ctx.core.session(id)?;
    let DocumentUpload { payload, category } =
        DocumentUpload::from_multipart(multipart, ctx.config.max_file_bytes).await?;
    let file_name = payload.file_name.clone();

    let submission = ctx.dispatcher.submit(&session, payload, category)?;
    tracing::info!(
        session_id = %id,
        file_id = %submission.file_id,
        category = %category,
        "File submitted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(FileAccepted {
            file_id: submission.file_id,
            category,
            file_name,
        }),
    )
        .into_response())
}

/// `DELETE /api/sessions/:id/files/:category/:file_id`
pub async fn remove_file(
    State(ctx): State<ApiContext>,
    Path((id, category, file_id)): Path<(Uuid, String, Uuid)>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let category = Category::from_str(&category)?;
    let session = ctx.core.session(id)?;
    let mut guard = session.lock().map_err(|_| SessionError::LockPoisoned)?;
    guard.remove(file_id, category)?;
    Ok(Json(guard.snapshot()))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionReportRequest {
    pub format: Option<String>,
    pub manager_name: Option<String>,
}

/// `POST /api/sessions/:id/report`: refused with 409 until a category has
/// data.
pub async fn report(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<SessionReportRequest>,
) -> Result<Response, ApiError> {
    let format = parse_format(request.format.as_deref())?;
    let session = ctx.core.session(id)?;

    let report = {
        let guard = session.lock().map_err(|_| SessionError::LockPoisoned)?;
        if !guard.has_any_data() {
            return Err(SessionError::NoData.into());
        }
        let accumulators = guard.accumulators();
        let metadata = metadata_for(
            accumulators,
            request.manager_name.as_deref(),
            &ctx.config.generated_by,
        );
        assemble(accumulators, metadata)
    };

    tracing::info!(session_id = %id, format = %format, "Generating session report");
    render_response(report, format).await
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::pipeline::extraction::MockExtractionClient;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn create_session(ctx: &crate::api::types::ApiContext) -> String {
        let response = app(ctx)
            .oneshot(empty_request("POST", "/api/sessions"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = response_json(response).await;
        json["id"].as_str().unwrap().to_string()
    }

    /// Poll the snapshot until no file is queued or extracting.
    async fn settled_snapshot(ctx: &crate::api::types::ApiContext, id: &str) -> serde_json::Value {
        for _ in 0..200 {
            let response = app(ctx)
                .oneshot(empty_request("GET", &format!("/api/sessions/{id}")))
                .await
                .unwrap();
            let json = response_json(response).await;
            let busy = json["categories"].as_array().unwrap().iter().any(|c| {
                c["files"].as_array().unwrap().iter().any(|f| {
                    f["status"] == "queued" || f["status"] == "extracting"
                })
            });
            if !busy {
                return json;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session never settled");
    }

    fn category<'a>(snapshot: &'a serde_json::Value, tag: &str) -> &'a serde_json::Value {
        snapshot["categories"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["category"] == tag)
            .unwrap()
    }

    #[tokio::test]
    async fn file_is_extracted_and_merged_in_background() {
        let ctx = context(MockExtractionClient::new(json!({
            "certidoes": [{"tipo": "CNDT", "situacao": "negativa"}]
        })));
        let id = create_session(&ctx).await;

        let body = multipart_body(Some(("cndt.pdf", b"x".as_slice())), Some("certidoes"));
        let response = app(&ctx)
            .oneshot(multipart_request(&format!("/api/sessions/{id}/files"), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let accepted = response_json(response).await;
        assert_eq!(accepted["category"], "certidoes");

        let snapshot = settled_snapshot(&ctx, &id).await;
        assert_eq!(snapshot["hasData"], true);
        let certs = category(&snapshot, "certidoes");
        assert_eq!(certs["files"][0]["status"], "completed");
        assert_eq!(certs["data"]["certidoes"][0]["tipo"], "CNDT");
    }

    #[tokio::test]
    async fn report_refused_until_data_then_rendered() {
        let ctx = context(MockExtractionClient::new(json!({
            "governanca": {"sindico": {"nome": "Ana Paula"}}
        })));
        let id = create_session(&ctx).await;

        let response = app(&ctx)
            .oneshot(json_request("POST", &format!("/api/sessions/{id}/report"), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = multipart_body(Some(("ata.pdf", b"x".as_slice())), Some("atas"));
        app(&ctx)
            .oneshot(multipart_request(&format!("/api/sessions/{id}/files"), body))
            .await
            .unwrap();
        settled_snapshot(&ctx, &id).await;

        let response = app(&ctx)
            .oneshot(json_request(
                "POST",
                &format!("/api/sessions/{id}/report"),
                json!({"format": "html"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(response_bytes(response).await).unwrap();
        assert!(html.contains("Prezado(a) Ana Paula,"));
        assert!(html.contains("2. GOVERNANÇA"));
    }

    #[tokio::test]
    async fn explicit_manager_name_wins() {
        let ctx = context(MockExtractionClient::new(json!({
            "governanca": {"sindico": {"nome": "Ana Paula"}}
        })));
        let id = create_session(&ctx).await;
        let body = multipart_body(Some(("ata.pdf", b"x".as_slice())), Some("atas"));
        app(&ctx)
            .oneshot(multipart_request(&format!("/api/sessions/{id}/files"), body))
            .await
            .unwrap();
        settled_snapshot(&ctx, &id).await;

        let response = app(&ctx)
            .oneshot(json_request(
                "POST",
                &format!("/api/sessions/{id}/report"),
                json!({"managerName": "Carlos"}),
            ))
            .await
            .unwrap();
        let html = String::from_utf8(response_bytes(response).await).unwrap();
        assert!(html.contains("Prezado(a) Carlos,"));
    }

    #[tokio::test]
    async fn removing_last_file_clears_category() {
        let ctx = context(MockExtractionClient::new(json!({"processos": [{"identificacao": "1"}]})));
        let id = create_session(&ctx).await;
        let body = multipart_body(Some(("p.pdf", b"x".as_slice())), Some("juridico"));
        let accepted = response_json(
            app(&ctx)
                .oneshot(multipart_request(&format!("/api/sessions/{id}/files"), body))
                .await
                .unwrap(),
        )
        .await;
        let file_id = accepted["fileId"].as_str().unwrap().to_string();
        settled_snapshot(&ctx, &id).await;

        let response = app(&ctx)
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/sessions/{id}/files/juridico/{file_id}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = response_json(response).await;
        assert_eq!(snapshot["hasData"], false);
        assert!(category(&snapshot, "juridico")["data"].is_null());

        let response = app(&ctx)
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/sessions/{id}/files/juridico/{file_id}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_and_deleted_sessions_are_not_found() {
        let ctx = context(MockExtractionClient::new(json!({})));
        let response = app(&ctx)
            .oneshot(empty_request("GET", &format!("/api/sessions/{}", uuid::Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let id = create_session(&ctx).await;
        let response = app(&ctx)
            .oneshot(empty_request("DELETE", &format!("/api/sessions/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = app(&ctx)
            .oneshot(empty_request("GET", &format!("/api/sessions/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failed_extraction_is_reported_on_file() {
        let ctx = context(MockExtractionClient::failing("quota exceeded"));
        let id = create_session(&ctx).await;
        let body = multipart_body(Some(("f.pdf", b"x".as_slice())), Some("financeiro"));
        app(&ctx)
            .oneshot(multipart_request(&format!("/api/sessions/{id}/files"), body))
            .await
            .unwrap();

        let snapshot = settled_snapshot(&ctx, &id).await;
        let financial = category(&snapshot, "financeiro");
        assert_eq!(financial["files"][0]["status"], "failed");
        assert!(financial["files"][0]["error"]
            .as_str()
            .unwrap()
            .contains("quota exceeded"));
        assert_eq!(snapshot["hasData"], false);
    }
}
