use super::ExtractionError;

/// Strip a Markdown code fence the model may wrap its JSON in.
///
/// Handles a leading ```` ```json ```` or bare ```` ``` ```` and a trailing
/// ```` ``` ````; anything else is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse a model text response into JSON.
pub fn parse_response_json(text: &str) -> Result<serde_json::Value, ExtractionError> {
    let body = strip_code_fence(text);
    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, preview = %preview(body), "Unparsable extraction response");
        ExtractionError::UnparsableResponse(e.to_string())
    })
}

fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}
