//! pt-BR text formatting shared by every renderer.

use chrono::{DateTime, Datelike, Utc};

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const FILE_STEM_MAX_CHARS: usize = 50;

/// `R$ 1.234,56`, or `N/A` for a missing amount.
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let cents = (v.abs() * 100.0).round() as u64;
            let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
            format!("{sign}R$ {},{:02}", group_thousands(cents / 100), cents % 100)
        }
        _ => "N/A".to_string(),
    }
}

/// Counts and plain quantities: `48`, `1.250`, `12,5`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}", group_thousands(value.abs() as u64));
    }
    format!("{value:.2}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .replace('.', ",")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `19 de outubro de 2026`.
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{:02} de {} de {}", date.day(), month, date.year())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape for XML text and attribute content.
pub fn escape_xml(text: &str) -> String {
    escape_html(text).replace("&#039;", "&apos;")
}

/// `<Condominium_Name>_<YYYY-MM-DD>`: accents folded, other punctuation
/// dropped, whitespace runs turned into `_`, name capped at 50 characters.
pub fn report_file_stem(condominium_name: &str, date: &DateTime<Utc>) -> String {
    let name = if condominium_name.trim().is_empty() {
        "Condomínio"
    } else {
        condominium_name
    };

    let mut cleaned = String::new();
    let mut pending_space = false;
    for ch in name.chars().map(fold_accent) {
        if ch.is_ascii_alphanumeric() {
            if pending_space && !cleaned.is_empty() {
                cleaned.push('_');
            }
            pending_space = false;
            cleaned.push(ch);
        } else if ch.is_whitespace() {
            pending_space = true;
        }
    }
    if pending_space {
        cleaned.push('_');
    }

    let stem: String = cleaned.chars().take(FILE_STEM_MAX_CHARS).collect();
    format!("{stem}_{}", date.format("%Y-%m-%d"))
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

/// First letter upper-cased: `negativa` → `Negativa`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
