const PDF: &str = "application/pdf";
const DOC: &str = "application/msword";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Browsers often send office documents as `application/octet-stream`, so
/// the extension wins for the formats the extraction service needs named
/// precisely. Anything else keeps the declared type, falling back to a
/// guess from the file name.
pub fn resolve_mime_type(file_name: &str, declared: Option<&str>) -> String {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        return PDF.to_string();
    }
    if lower.ends_with(".docx") {
        return DOCX.to_string();
    }
    if lower.ends_with(".doc") {
        return DOC.to_string();
    }

    match declared.map(str::trim).filter(|m| !m.is_empty()) {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
