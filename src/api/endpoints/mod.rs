//! API endpoint handlers.
//!
//! Handlers stay thin: they parse the request, call into the session,
//! extraction and report modules, and map errors through `ApiError`.

pub mod extract;
pub mod health;
pub mod report;
pub mod sessions;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;

    use crate::api::router::api_router;
    use crate::api::types::ApiContext;
    use crate::config::AppConfig;
    use crate::pipeline::extraction::MockExtractionClient;

    pub const BOUNDARY: &str = "boasvindas-test-boundary";

    pub fn context(client: MockExtractionClient) -> ApiContext {
        ApiContext::new(AppConfig::default(), Arc::new(client))
    }

    pub fn app(ctx: &ApiContext) -> Router {
        api_router(ctx.clone())
    }

    /// Multipart body with an optional file part and document type.
    pub fn multipart_body(file: Option<(&str, &[u8])>, document_type: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(tag) = document_type {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"documentType\"\r\n\r\n{tag}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub async fn response_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
        to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .unwrap()
            .to_vec()
    }

    pub async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        serde_json::from_slice(&response_bytes(response).await).unwrap()
    }
}
