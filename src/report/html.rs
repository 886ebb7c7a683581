//! Self-contained printable HTML document.

use super::format::{escape_html, format_currency, format_long_date, report_file_stem};
use super::outline::{
    build_sections, display_name, greeting, Block, Tone, COMPANY_NAME, COVER_BADGE,
    COVER_SUBTITLE, FOOTER_LINE, LETTER_CLOSING, LETTER_PARAGRAPHS, LETTER_TITLE, SIGNATURE_TEAM,
};
use super::WelcomeReport;

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Arial, sans-serif; font-size: 11pt; line-height: 1.6; color: #333; }
.page { padding: 40px 50px; page-break-after: always; }
.page:last-child { page-break-after: auto; }
.cover { min-height: 100vh; display: flex; flex-direction: column; justify-content: center; align-items: center; text-align: center; background: linear-gradient(135deg, #1e3a5f 0%, #2d5a87 100%); color: #fff; }
.cover .badge { border: 1px solid rgba(255,255,255,0.6); border-radius: 20px; padding: 6px 18px; font-size: 10pt; letter-spacing: 2px; text-transform: uppercase; margin-bottom: 30px; }
.cover h1 { font-size: 30pt; margin-bottom: 12px; }
.cover .subtitle { font-size: 16pt; opacity: 0.9; margin-bottom: 40px; }
.cover .meta { font-size: 11pt; opacity: 0.85; }
.letter p { margin-bottom: 14px; text-align: justify; }
.letter .signature { margin-top: 40px; }
h2 { color: #1e3a5f; font-size: 16pt; border-bottom: 2px solid #1e3a5f; padding-bottom: 6px; margin: 24px 0 14px; }
h3 { color: #2d5a87; font-size: 12pt; margin: 18px 0 8px; }
p { margin-bottom: 8px; }
table { width: 100%; border-collapse: collapse; margin-bottom: 12px; }
th, td { padding: 6px 10px; border-bottom: 1px solid #e2e8f0; text-align: left; }
th { background: #f1f5f9; color: #1e3a5f; }
table.fields td:first-child { width: 45%; color: #64748b; }
table.fields tr.total td { font-weight: bold; border-top: 2px solid #1e3a5f; color: #1e3a5f; }
ul { margin: 0 0 12px 22px; }
.callout { padding: 10px 14px; border-left: 4px solid #94a3b8; background: #f8fafc; margin-bottom: 12px; }
.callout.success { border-color: #16a34a; background: #f0fdf4; }
.callout.alert { border-color: #dc2626; background: #fef2f2; }
.bar-row { display: flex; align-items: center; margin-bottom: 6px; }
.bar-label { width: 35%; font-size: 10pt; }
.bar-track { flex: 1; background: #e2e8f0; height: 14px; border-radius: 7px; margin: 0 10px; }
.bar-fill { background: #2d5a87; height: 14px; border-radius: 7px; }
.bar-value { width: 22%; text-align: right; font-size: 10pt; }
.footer { margin-top: 40px; text-align: center; font-size: 9pt; color: #94a3b8; }
@media print { .cover { -webkit-print-color-adjust: exact; print-color-adjust: exact; } }
"#;

/// Render the complete printable HTML report.
pub fn render_printable_document(report: &WelcomeReport) -> String {
    let title = report_file_stem(&report.condominium_name, &report.generated_at);
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    render_cover(report, &mut out);
    render_letter(report, &mut out);

    out.push_str("<div class=\"page\">\n");
    for section in build_sections(report) {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.heading())));
        for block in &section.blocks {
            render_block(block, &mut out);
        }
    }
    out.push_str(&format!("<div class=\"footer\">{}</div>\n", escape_html(FOOTER_LINE)));
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn render_cover(report: &WelcomeReport, out: &mut String) {
    out.push_str("<div class=\"page cover\">\n");
    out.push_str(&format!("<div class=\"badge\">{}</div>\n", escape_html(COVER_BADGE)));
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(display_name(report))));
    out.push_str(&format!("<div class=\"subtitle\">{}</div>\n", escape_html(COVER_SUBTITLE)));
    let manager = report.manager_name.trim();
    if !manager.is_empty() {
        out.push_str(&format!(
            "<div class=\"meta\">Síndico(a): {}</div>\n",
            escape_html(manager)
        ));
    }
    out.push_str(&format!(
        "<div class=\"meta\">{}</div>\n</div>\n",
        escape_html(&format_long_date(&report.generated_at))
    ));
}

fn render_letter(report: &WelcomeReport, out: &mut String) {
    out.push_str("<div class=\"page letter\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(LETTER_TITLE)));
    out.push_str(&format!("<p>{}</p>\n", escape_html(&greeting(report))));
    for paragraph in LETTER_PARAGRAPHS {
        out.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
    }
    out.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(LETTER_CLOSING)));
    out.push_str(&format!(
        "<div class=\"signature\"><p>Atenciosamente,</p><p><strong>{}</strong><br>{}</p></div>\n</div>\n",
        escape_html(SIGNATURE_TEAM),
        escape_html(COMPANY_NAME)
    ));
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Subheading(text) => out.push_str(&format!("<h3>{}</h3>\n", escape_html(text))),
        Block::Paragraph(text) => out.push_str(&format!("<p>{}</p>\n", escape_html(text))),
        Block::Fields { rows, total } => {
            out.push_str("<table class=\"fields\">\n");
            for (i, (label, value)) in rows.iter().enumerate() {
                let class = if *total && i + 1 == rows.len() { " class=\"total\"" } else { "" };
                out.push_str(&format!(
                    "<tr{class}><td>{}</td><td>{}</td></tr>\n",
                    escape_html(label),
                    escape_html(value)
                ));
            }
            out.push_str("</table>\n");
        }
        Block::Table { header, rows } => {
            out.push_str("<table>\n<tr>");
            for cell in header {
                out.push_str(&format!("<th>{}</th>", escape_html(cell)));
            }
            out.push_str("</tr>\n");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str(&format!("<td>{}</td>", escape_html(cell)));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</table>\n");
        }
        Block::Bullets(items) => {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
            out.push_str("</ul>\n");
        }
        Block::Callout { tone, text } => {
            let class = match tone {
                Tone::Neutral => "callout",
                Tone::Success => "callout success",
                Tone::Alert => "callout alert",
            };
            out.push_str(&format!("<div class=\"{class}\">{}</div>\n", escape_html(text)));
        }
        Block::Bars(bars) => {
            for bar in bars {
                out.push_str(&format!(
                    "<div class=\"bar-row\"><span class=\"bar-label\">{}</span><div class=\"bar-track\"><div class=\"bar-fill\" style=\"width: {:.1}%\"></div></div><span class=\"bar-value\">{}</span></div>\n",
                    escape_html(&bar.label),
                    bar.percent,
                    escape_html(&format_currency(Some(bar.amount)))
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn report() -> WelcomeReport {
        let mut report: WelcomeReport = serde_json::from_value(json!({
            "nomeCondominio": "Residencial <Ipê>",
            "nomeSindico": "Ana",
            "juridico": {"processos": []},
            "financeiro": {"despesasPorCategoria": [{"categoria": "Pessoal", "valor": 1000}]}
        }))
        .unwrap();
        report.generated_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        report
    }

    #[test]
    fn document_has_cover_letter_and_footer() {
        let html = render_printable_document(&report());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Residencial_Ipe_2026-10-19</title>"));
        assert!(html.contains("Residencial &lt;Ipê&gt;"));
        assert!(html.contains("Síndico(a): Ana"));
        assert!(html.contains("19 de outubro de 2026"));
        assert!(html.contains("Prezado(a) Ana,"));
        assert!(html.contains(FOOTER_LINE));
    }

    #[test]
    fn sections_keep_their_numbers() {
        let html = render_printable_document(&report());
        assert!(html.contains("<h2>3. SITUAÇÃO FINANCEIRA</h2>"));
        assert!(html.contains("<h2>6. SITUAÇÃO JURÍDICA</h2>"));
        assert!(!html.contains("1. DADOS DO CONDOMÍNIO"));
        assert!(html.contains("Nenhum processo judicial identificado."));
        assert!(html.contains("width: 100.0%"));
    }

    #[test]
    fn empty_report_still_renders() {
        let html = render_printable_document(&WelcomeReport::default());
        assert!(html.contains("<h1>Condomínio</h1>"));
        assert!(html.contains("Prezado(a) Síndico(a),"));
        assert!(!html.contains("Síndico(a): "));
    }
}
