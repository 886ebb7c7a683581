//! API router.
//!
//! Returns a composable `Router` with every endpoint under `/api/`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::{ApiContext, MULTIPART_OVERHEAD_BYTES};

/// Build the API router.
///
/// The body limit leaves room above the file size limit so oversize files
/// reach the handler and get a proper `REQUEST_TOO_LARGE` error.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.config.max_file_bytes + MULTIPART_OVERHEAD_BYTES;

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/extract", post(endpoints::extract::extract))
        .route("/generate-report", post(endpoints::report::generate))
        .route("/sessions", post(endpoints::sessions::create))
        .route(
            "/sessions/:id",
            get(endpoints::sessions::get).delete(endpoints::sessions::delete),
        )
        .route("/sessions/:id/files", post(endpoints::sessions::add_file))
        .route(
            "/sessions/:id/files/:category/:file_id",
            delete(endpoints::sessions::remove_file),
        )
        .route("/sessions/:id/report", post(endpoints::sessions::report))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use crate::api::endpoints::test_support::*;
    use crate::pipeline::extraction::MockExtractionClient;
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let ctx = context(MockExtractionClient::new(json!({})));
        let response = app(&ctx)
            .oneshot(empty_request("GET", "/api/nonexistent"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let ctx = context(MockExtractionClient::new(json!({})));
        let request = axum::http::Request::builder()
            .method("OPTIONS")
            .uri("/api/extract")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app(&ctx).oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn oversize_upload_is_rejected_before_extraction() {
        let client = MockExtractionClient::new(json!({}));
        let mut config = crate::config::AppConfig::default();
        config.max_file_bytes = 16;
        let ctx = crate::api::types::ApiContext::new(config, std::sync::Arc::new(client));

        let body = multipart_body(Some(("big.pdf", [0u8; 64].as_slice())), Some("financeiro"));
        let response = app(&ctx)
            .oneshot(multipart_request("/api/extract", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "REQUEST_TOO_LARGE");
    }
}
