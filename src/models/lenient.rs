//! Lenient field deserializers for LLM-produced JSON.
//!
//! Extraction output is loosely typed: numbers arrive as strings, enums as
//! empty strings, lists with one malformed element. Every category field
//! goes through one of these helpers so a bad value degrades to "absent"
//! instead of rejecting the whole fragment.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any field type: wrong shape or `null` becomes `None`.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Enum field matched on its wire tag after trimming, lowercasing and
/// dropping accents, so `"Negativa"` and `"Superávit"` resolve. Unknown
/// tags become `None`.
pub fn enum_field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => fold_tag(&s).parse().ok(),
        _ => None,
    })
}

fn fold_tag(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Text field. Numbers and booleans are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Numeric field. Accepts JSON numbers and numeric strings, including
/// Brazilian formatting (`"R$ 1.234,56"`).
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_number(&s),
        _ => None,
    })
}

/// Boolean field. Accepts `"true"`/`"false"` and `"sim"`/`"não"`.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "sim" => Some(true),
            "false" | "não" | "nao" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// List field. Non-array values become `None`; items that fail to
/// deserialize are skipped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Parse a numeric string the way extraction output tends to write it.
///
/// Dot-grouped thousands (`1.500`, `12.345.678`) are read pt-BR style.
/// Other plain numbers such as `1234.56` parse directly. Otherwise currency
/// symbols and spaces are dropped, `.` is a thousands separator and `,` the
/// decimal mark.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_grouped_thousands(trimmed) {
        return trimmed.replace('.', "").parse::<f64>().ok();
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Some(n);
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.replace('.', "")
    };
    normalized.parse::<f64>().ok()
}

/// `\d{1,3}(\.\d{3})+`, optionally signed.
fn is_grouped_thousands(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut groups = digits.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    let mut tail = 0;
    let tail_ok = groups.all(|g| {
        tail += 1;
        g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())
    });
    head_ok && tail_ok && tail > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "text")]
        name: Option<String>,
        #[serde(deserialize_with = "number")]
        amount: Option<f64>,
        #[serde(deserialize_with = "flag")]
        active: Option<bool>,
        #[serde(deserialize_with = "list")]
        tags: Option<Vec<String>>,
        #[serde(deserialize_with = "enum_field")]
        status: Option<crate::models::CertificateStatus>,
    }

    #[test]
    fn wrong_types_degrade_to_none() {
        let p: Sample =
            serde_json::from_str(r#"{"name": {"x": 1}, "amount": [1], "active": 3, "tags": "a"}"#)
                .unwrap();
        assert!(p.name.is_none());
        assert!(p.amount.is_none());
        assert!(p.active.is_none());
        assert!(p.tags.is_none());
    }

    #[test]
    fn missing_fields_are_none() {
        let p: Sample = serde_json::from_str("{}").unwrap();
        assert!(p.name.is_none() && p.amount.is_none());
    }

    #[test]
    fn zero_survives_as_some() {
        let p: Sample = serde_json::from_str(r#"{"amount": 0}"#).unwrap();
        assert_eq!(p.amount, Some(0.0));
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let p: Sample = serde_json::from_str(r#"{"amount": "R$ 1.234,56"}"#).unwrap();
        assert_eq!(p.amount, Some(1234.56));
    }

    #[test]
    fn malformed_list_items_are_skipped() {
        let p: Sample = serde_json::from_str(r#"{"tags": ["a", 2, "b", null]}"#).unwrap();
        assert_eq!(p.tags.unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn portuguese_flags() {
        let p: Sample = serde_json::from_str(r#"{"active": "Sim"}"#).unwrap();
        assert_eq!(p.active, Some(true));
    }

    #[test]
    fn enum_tags_ignore_case_and_accents() {
        use crate::models::{CertificateStatus, ResultKind};

        let p: Sample = serde_json::from_str(r#"{"status": " Negativa "}"#).unwrap();
        assert_eq!(p.status, Some(CertificateStatus::Negative));
        let p: Sample = serde_json::from_str(r#"{"status": "pendente"}"#).unwrap();
        assert_eq!(p.status, None);

        #[derive(Deserialize)]
        struct Outcome {
            #[serde(deserialize_with = "enum_field")]
            kind: Option<ResultKind>,
        }
        let o: Outcome = serde_json::from_str(r#"{"kind": "Superávit"}"#).unwrap();
        assert_eq!(o.kind, Some(ResultKind::Surplus));
    }

    #[test]
    fn dot_grouped_thousands_are_brazilian() {
        assert_eq!(parse_number("1.500"), Some(1500.0));
        assert_eq!(parse_number("12.345.678"), Some(12_345_678.0));
        assert_eq!(parse_number("-2.000"), Some(-2000.0));
        assert_eq!(parse_number("1.5"), Some(1.5));
        assert_eq!(parse_number("1234.56"), Some(1234.56));
        assert_eq!(parse_number("1.5000"), Some(1.5));
    }

    #[test]
    fn parse_number_variants() {
        assert_eq!(parse_number("1500"), Some(1500.0));
        assert_eq!(parse_number("1.500,00"), Some(1500.0));
        assert_eq!(parse_number("-12,5"), Some(-12.5));
        assert_eq!(parse_number("n/d"), None);
        assert_eq!(parse_number("  "), None);
    }
}
