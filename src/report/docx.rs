//! Minimal WordprocessingML package: one `document.xml` with paragraphs
//! and tables, built-in styles only.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::format::{escape_xml, format_currency, format_long_date};
use super::outline::{
    build_sections, display_name, greeting, Block, Tone, COMPANY_NAME, COVER_BADGE,
    COVER_SUBTITLE, FOOTER_LINE, LETTER_CLOSING, LETTER_PARAGRAPHS, LETTER_TITLE, SIGNATURE_TEAM,
};
use super::{RenderError, WelcomeReport};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const PRIMARY: &str = "1E3A5F";
const SECONDARY: &str = "2D5A87";
const ALERT: &str = "DC2626";
const SUCCESS: &str = "16A34A";

/// Render the report as `.docx` bytes.
pub fn render_word_document(report: &WelcomeReport) -> Result<Vec<u8>, RenderError> {
    let body = document_body(report);
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134" w:header="709" w:footer="709" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

// ── Run and paragraph builders ──

#[derive(Default, Clone, Copy)]
struct RunStyle {
    bold: bool,
    size_half_points: Option<u32>,
    color: Option<&'static str>,
}

fn run(text: &str, style: RunStyle) -> String {
    let mut props = String::new();
    if style.bold {
        props.push_str("<w:b/>");
    }
    if let Some(color) = style.color {
        props.push_str(&format!("<w:color w:val=\"{color}\"/>"));
    }
    if let Some(size) = style.size_half_points {
        props.push_str(&format!("<w:sz w:val=\"{size}\"/>"));
    }
    let props = if props.is_empty() {
        String::new()
    } else {
        format!("<w:rPr>{props}</w:rPr>")
    };
    format!(
        "<w:r>{props}<w:t xml:space=\"preserve\">{}</w:t></w:r>",
        escape_xml(text)
    )
}

fn paragraph(runs: &str, centered: bool, page_break_before: bool) -> String {
    let mut props = String::new();
    if page_break_before {
        props.push_str("<w:pageBreakBefore/>");
    }
    props.push_str("<w:spacing w:after=\"120\"/>");
    if centered {
        props.push_str("<w:jc w:val=\"center\"/>");
    }
    format!("<w:p><w:pPr>{props}</w:pPr>{runs}</w:p>")
}

fn text_paragraph(text: &str, style: RunStyle) -> String {
    paragraph(&run(text, style), false, false)
}

fn heading(text: &str, page_break_before: bool) -> String {
    paragraph(
        &run(
            text,
            RunStyle {
                bold: true,
                size_half_points: Some(32),
                color: Some(PRIMARY),
            },
        ),
        false,
        page_break_before,
    )
}

fn cell(text: &str, bold: bool) -> String {
    format!(
        "<w:tc><w:tcPr><w:tcW w:w=\"0\" w:type=\"auto\"/></w:tcPr>{}</w:tc>",
        text_paragraph(
            text,
            RunStyle {
                bold,
                ..RunStyle::default()
            }
        )
    )
}

fn table(header: Option<&[String]>, rows: &[Vec<String>], bold_last_row: bool) -> String {
    let mut xml = String::from(
        "<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblBorders><w:bottom w:val=\"single\" w:sz=\"4\" w:color=\"E2E8F0\"/><w:insideH w:val=\"single\" w:sz=\"4\" w:color=\"E2E8F0\"/></w:tblBorders></w:tblPr>",
    );
    if let Some(header) = header {
        xml.push_str("<w:tr>");
        for text in header {
            xml.push_str(&cell(text, true));
        }
        xml.push_str("</w:tr>");
    }
    for (i, row) in rows.iter().enumerate() {
        let bold = bold_last_row && i + 1 == rows.len();
        xml.push_str("<w:tr>");
        for text in row {
            xml.push_str(&cell(text, bold));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    // Word requires a paragraph after a table before the section ends.
    xml.push_str(&paragraph("", false, false));
    xml
}

// ── Document ──

fn document_body(report: &WelcomeReport) -> String {
    let mut body = String::new();
    let centered = |text: &str, style: RunStyle| paragraph(&run(text, style), true, false);

    // Cover
    body.push_str(&centered(
        COVER_BADGE,
        RunStyle {
            size_half_points: Some(20),
            color: Some(SECONDARY),
            ..RunStyle::default()
        },
    ));
    body.push_str(&centered(
        display_name(report),
        RunStyle {
            bold: true,
            size_half_points: Some(56),
            color: Some(PRIMARY),
        },
    ));
    body.push_str(&centered(
        COVER_SUBTITLE,
        RunStyle {
            size_half_points: Some(32),
            color: Some(SECONDARY),
            ..RunStyle::default()
        },
    ));
    let manager = report.manager_name.trim();
    if !manager.is_empty() {
        body.push_str(&centered(&format!("Síndico(a): {manager}"), RunStyle::default()));
    }
    body.push_str(&centered(&format_long_date(&report.generated_at), RunStyle::default()));

    // Letter
    body.push_str(&heading(LETTER_TITLE, true));
    body.push_str(&text_paragraph(&greeting(report), RunStyle::default()));
    for text in LETTER_PARAGRAPHS {
        body.push_str(&text_paragraph(text, RunStyle::default()));
    }
    body.push_str(&text_paragraph(
        LETTER_CLOSING,
        RunStyle {
            bold: true,
            ..RunStyle::default()
        },
    ));
    body.push_str(&text_paragraph("Atenciosamente,", RunStyle::default()));
    body.push_str(&text_paragraph(
        SIGNATURE_TEAM,
        RunStyle {
            bold: true,
            ..RunStyle::default()
        },
    ));
    body.push_str(&text_paragraph(COMPANY_NAME, RunStyle::default()));

    for (i, section) in build_sections(report).iter().enumerate() {
        body.push_str(&heading(&section.heading(), i == 0));
        for block in &section.blocks {
            body.push_str(&block_xml(block));
        }
    }

    body.push_str(&centered(
        FOOTER_LINE,
        RunStyle {
            size_half_points: Some(16),
            color: Some("94A3B8"),
            ..RunStyle::default()
        },
    ));
    body
}

fn block_xml(block: &Block) -> String {
    match block {
        Block::Subheading(text) => text_paragraph(
            text,
            RunStyle {
                bold: true,
                size_half_points: Some(24),
                color: Some(SECONDARY),
            },
        ),
        Block::Paragraph(text) => text_paragraph(text, RunStyle::default()),
        Block::Fields { rows, total } => {
            let rows: Vec<Vec<String>> = rows
                .iter()
                .map(|(label, value)| vec![label.clone(), value.clone()])
                .collect();
            table(None, &rows, *total)
        }
        Block::Table { header, rows } => table(Some(header), rows, false),
        Block::Bullets(items) => items
            .iter()
            .map(|item| text_paragraph(&format!("• {item}"), RunStyle::default()))
            .collect(),
        Block::Callout { tone, text } => {
            let color = match tone {
                Tone::Neutral => None,
                Tone::Success => Some(SUCCESS),
                Tone::Alert => Some(ALERT),
            };
            text_paragraph(
                text,
                RunStyle {
                    bold: color.is_some(),
                    color,
                    ..RunStyle::default()
                },
            )
        }
        Block::Bars(bars) => {
            let rows: Vec<Vec<String>> = bars
                .iter()
                .map(|bar| {
                    vec![
                        bar.label.clone(),
                        format_currency(Some(bar.amount)),
                        format!("{:.0}%", bar.percent),
                    ]
                })
                .collect();
            table(None, &rows, false)
        }
    }
}
