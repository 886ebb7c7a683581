//! Native PDF rendering with the builtin Helvetica faces.

use std::io::BufWriter;

use printpdf::*;

use super::format::{format_currency, format_long_date, report_file_stem};
use super::outline::{
    build_sections, display_name, greeting, Block, Tone, COMPANY_NAME, COVER_BADGE,
    COVER_SUBTITLE, FOOTER_LINE, LETTER_CLOSING, LETTER_PARAGRAPHS, LETTER_TITLE, SIGNATURE_TEAM,
};
use super::{RenderError, WelcomeReport};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TOP: f32 = 280.0;
const BOTTOM: f32 = 20.0;
const LEFT: f32 = 20.0;
const INDENT: f32 = 25.0;
const BODY_CHARS: usize = 90;

/// Cursor over the current page; starts a new page when the next line
/// would cross the bottom margin.
struct Writer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl Writer {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(format!("PDF font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(format!("PDF font error: {e}")))?;
        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: TOP,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", self.pages + 1));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
        self.pages += 1;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            self.new_page();
        }
    }

    fn line(&mut self, text: &str, size: f32, x: f32, bold: bool, advance: f32) {
        self.ensure_room(advance);
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= advance;
    }

    fn wrapped(&mut self, text: &str, size: f32, x: f32, bold: bool) {
        for line in wrap_text(text, BODY_CHARS) {
            self.line(&line, size, x, bold, 4.8);
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| RenderError::Pdf(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| RenderError::Pdf(format!("PDF buffer error: {e}")))
    }
}

/// Render the report as PDF bytes.
pub fn render_pdf_document(report: &WelcomeReport) -> Result<Vec<u8>, RenderError> {
    let title = report_file_stem(&report.condominium_name, &report.generated_at);
    let mut w = Writer::new(&title)?;

    // Cover
    w.y = 190.0;
    w.line(COVER_BADGE, 11.0, LEFT, false, 14.0);
    w.line(display_name(report), 24.0, LEFT, true, 12.0);
    w.line(COVER_SUBTITLE, 14.0, LEFT, false, 16.0);
    let manager = report.manager_name.trim();
    if !manager.is_empty() {
        w.line(&format!("Síndico(a): {manager}"), 11.0, LEFT, false, 6.0);
    }
    w.line(&format_long_date(&report.generated_at), 11.0, LEFT, false, 6.0);

    // Letter
    w.new_page();
    w.line(LETTER_TITLE, 16.0, LEFT, true, 10.0);
    w.wrapped(&greeting(report), 10.0, LEFT, false);
    w.gap(3.0);
    for paragraph in LETTER_PARAGRAPHS {
        w.wrapped(paragraph, 10.0, LEFT, false);
        w.gap(3.0);
    }
    w.wrapped(LETTER_CLOSING, 10.0, LEFT, true);
    w.gap(8.0);
    w.line("Atenciosamente,", 10.0, LEFT, false, 5.0);
    w.line(SIGNATURE_TEAM, 10.0, LEFT, true, 5.0);
    w.line(COMPANY_NAME, 10.0, LEFT, false, 5.0);

    let sections = build_sections(report);
    if !sections.is_empty() {
        w.new_page();
    }
    for section in &sections {
        w.ensure_room(20.0);
        w.gap(2.0);
        w.line(&section.heading(), 14.0, LEFT, true, 8.0);
        for block in &section.blocks {
            write_block(&mut w, block);
        }
        w.gap(4.0);
    }

    w.gap(6.0);
    w.line(FOOTER_LINE, 8.0, LEFT, false, 4.0);
    w.finish()
}

fn write_block(w: &mut Writer, block: &Block) {
    match block {
        Block::Subheading(text) => {
            w.ensure_room(12.0);
            w.gap(2.0);
            w.line(text, 11.0, LEFT, true, 6.0);
        }
        Block::Paragraph(text) => w.wrapped(text, 9.5, LEFT, false),
        Block::Fields { rows, total } => {
            for (i, (label, value)) in rows.iter().enumerate() {
                let emphasize = *total && i + 1 == rows.len();
                w.wrapped(&format!("{label}: {value}"), 9.5, INDENT, emphasize);
            }
        }
        Block::Table { header, rows } => {
            w.wrapped(&header.join(" | "), 9.5, INDENT, true);
            for row in rows {
                w.wrapped(&row.join(" | "), 9.5, INDENT, false);
            }
        }
        Block::Bullets(items) => {
            for item in items {
                w.wrapped(&format!("· {item}"), 9.5, INDENT, false);
            }
        }
        Block::Callout { tone, text } => {
            w.gap(1.0);
            w.wrapped(text, 9.5, INDENT, !matches!(tone, Tone::Neutral));
            w.gap(1.0);
        }
        Block::Bars(bars) => {
            for bar in bars {
                let filled = (bar.percent / 5.0).round() as usize;
                let text = format!(
                    "{} {} {}",
                    bar.label,
                    "|".repeat(filled.max(1)),
                    format_currency(Some(bar.amount))
                );
                w.wrapped(&text, 9.5, INDENT, false);
            }
        }
    }
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_report_is_a_pdf() {
        let bytes = render_pdf_document(&WelcomeReport::default()).unwrap();
        // PDF magic bytes: %PDF
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn long_report_spans_pages() {
        let processes: Vec<_> = (0..60)
            .map(|i| json!({"identificacao": format!("000{i}"), "descricao": "Cobrança de cotas em atraso"}))
            .collect();
        let report: WelcomeReport =
            serde_json::from_value(json!({"juridico": {"processos": processes}})).unwrap();
        let bytes = render_pdf_document(&report).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("uma frase com várias palavras para quebrar", 15);
        assert!(lines.iter().all(|l| l.chars().count() <= 15));
        assert_eq!(lines.join(" "), "uma frase com várias palavras para quebrar");
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
