pub mod assembler;
pub mod docx;
pub mod format;
pub mod html;
pub mod outline;
pub mod pdf;

pub use assembler::*;
pub use docx::render_word_document;
pub use format::report_file_stem;
pub use html::render_printable_document;
pub use pdf::render_pdf_document;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("DOCX packaging failed: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),
}

/// Output formats for a rendered report.
///
/// The `pdf` tag asks for the printable HTML document (the browser prints it
/// to PDF); `native-pdf` renders PDF bytes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Pdf,
    Word,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "native-pdf",
            Self::Word => "word",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Word => "docx",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "pdf" => Ok(Self::Html),
            "native-pdf" | "native_pdf" => Ok(Self::Pdf),
            "word" | "docx" => Ok(Self::Word),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered report ready to be written or served.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub format: ReportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render `report` in `format`. The file name follows the report stem for
/// HTML and PDF, and the dated `relatorio-boas-vindas-` form for Word.
pub fn render(report: &WelcomeReport, format: ReportFormat) -> Result<RenderedReport, RenderError> {
    let (file_name, bytes) = match format {
        ReportFormat::Html => (
            format!("{}.html", report_file_stem(&report.condominium_name, &report.generated_at)),
            render_printable_document(report).into_bytes(),
        ),
        ReportFormat::Pdf => (
            format!("{}.pdf", report_file_stem(&report.condominium_name, &report.generated_at)),
            render_pdf_document(report)?,
        ),
        ReportFormat::Word => (
            format!(
                "relatorio-boas-vindas-{}.docx",
                report.generated_at.format("%Y-%m-%d")
            ),
            render_word_document(report)?,
        ),
    };
    tracing::info!(format = %format, bytes = bytes.len(), "Report rendered");
    Ok(RenderedReport {
        format,
        file_name,
        bytes,
    })
}
