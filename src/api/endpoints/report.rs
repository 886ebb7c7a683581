//! Report rendering from a client-supplied report model.
//!
//! `POST /api/generate-report`: `{data, format}`. `word` returns DOCX,
//! `native-pdf` PDF bytes, and `pdf`, `html` or no format the printable HTML.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::report::{self, RenderedReport, ReportFormat, WelcomeReport};

#[derive(Deserialize)]
pub struct GenerateReportRequest {
    pub data: Option<WelcomeReport>,
    pub format: Option<String>,
}

pub async fn generate(
    State(_ctx): State<ApiContext>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<Response, ApiError> {
    let data = request
        .data
        .ok_or_else(|| ApiError::BadRequest("Report data not provided".into()))?;
    let format = parse_format(request.format.as_deref())?;
    render_response(data, format).await
}

/// Absent format falls back to HTML.
pub(crate) fn parse_format(format: Option<&str>) -> Result<ReportFormat, ApiError> {
    match format.map(str::trim).filter(|f| !f.is_empty()) {
        Some(f) => Ok(f.parse::<ReportFormat>()?),
        None => Ok(ReportFormat::Html),
    }
}

/// Render on the blocking pool and wrap the bytes with the right headers.
pub(crate) async fn render_response(
    report: WelcomeReport,
    format: ReportFormat,
) -> Result<Response, ApiError> {
    let rendered = tokio::task::spawn_blocking(move || report::render(&report, format)).await??;
    Ok(into_response(rendered))
}

fn into_response(rendered: RenderedReport) -> Response {
    let content_type = rendered.format.content_type();
    match rendered.format {
        ReportFormat::Html => {
            ([(header::CONTENT_TYPE, content_type.to_string())], rendered.bytes).into_response()
        }
        ReportFormat::Pdf | ReportFormat::Word => (
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", rendered.file_name),
                ),
            ],
            rendered.bytes,
        )
            .into_response(),
    }
}
