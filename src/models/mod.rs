pub mod convention;
pub mod enums;
pub mod financial;
pub mod lenient;
pub mod minutes;
pub mod records;

pub use convention::*;
pub use enums::*;
pub use financial::*;
pub use minutes::*;
pub use records::*;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Fragment for {category} must be a JSON object, got {found}")]
    MalformedFragment { category: Category, found: &'static str },
}

/// One category-shaped value: either a fresh extraction fragment or an
/// accumulated merge result. Both have the same shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Convention(ConventionData),
    Financial(FinancialData),
    Minutes(MinutesData),
    Certificates(CertificatesData),
    Personnel(PersonnelData),
    Legal(LegalData),
    Miscellaneous(MiscellaneousData),
}

impl CategoryValue {
    pub fn category(&self) -> Category {
        match self {
            Self::Convention(_) => Category::Convention,
            Self::Financial(_) => Category::Financial,
            Self::Minutes(_) => Category::Minutes,
            Self::Certificates(_) => Category::Certificates,
            Self::Personnel(_) => Category::Personnel,
            Self::Legal(_) => Category::Legal,
            Self::Miscellaneous(_) => Category::Miscellaneous,
        }
    }

    /// Validate-and-default a parsed extraction response into the shape of
    /// `category`. Only the top level is checked; every field inside is
    /// optional and degrades to absent when malformed.
    pub fn from_json(category: Category, value: serde_json::Value) -> Result<Self, ModelError> {
        if !value.is_object() {
            return Err(ModelError::MalformedFragment {
                category,
                found: json_kind(&value),
            });
        }
        // Objects always deserialize: every field is defaulted and lenient.
        let malformed = |_: serde_json::Error| ModelError::MalformedFragment {
            category,
            found: "object",
        };
        Ok(match category {
            Category::Convention => Self::Convention(serde_json::from_value(value).map_err(malformed)?),
            Category::Financial => Self::Financial(serde_json::from_value(value).map_err(malformed)?),
            Category::Minutes => Self::Minutes(serde_json::from_value(value).map_err(malformed)?),
            Category::Certificates => {
                Self::Certificates(serde_json::from_value(value).map_err(malformed)?)
            }
            Category::Personnel => Self::Personnel(serde_json::from_value(value).map_err(malformed)?),
            Category::Legal => Self::Legal(serde_json::from_value(value).map_err(malformed)?),
            Category::Miscellaneous => {
                Self::Miscellaneous(serde_json::from_value(value).map_err(malformed)?)
            }
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_builds_the_requested_category() {
        let value = CategoryValue::from_json(
            Category::Certificates,
            json!({"certidoes": [{"tipo": "CNDT", "situacao": "regular"}]}),
        )
        .unwrap();
        assert_eq!(value.category(), Category::Certificates);
        match value {
            CategoryValue::Certificates(c) => {
                let certs = c.certificates.unwrap();
                assert_eq!(certs[0].kind.as_deref(), Some("CNDT"));
                assert_eq!(certs[0].status, Some(CertificateStatus::Regular));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let err = CategoryValue::from_json(Category::Legal, json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn unknown_enum_strings_degrade_to_none() {
        let value = CategoryValue::from_json(
            Category::Certificates,
            json!({"certidoes": [{"tipo": "AVCB", "situacao": ""}]}),
        )
        .unwrap();
        let CategoryValue::Certificates(c) = value else {
            panic!("wrong category");
        };
        assert_eq!(c.certificates.unwrap()[0].status, None);
    }

    #[test]
    fn capitalised_enum_values_still_resolve() {
        let value = CategoryValue::from_json(
            Category::Certificates,
            json!({"certidoes": [{"tipo": "CNDT", "situacao": "Negativa"}]}),
        )
        .unwrap();
        assert_eq!(value.to_json()["certidoes"][0]["situacao"], json!("negativa"));

        let value = CategoryValue::from_json(
            Category::Convention,
            json!({"identificacao": {"tipoCondominio": "Residencial"}}),
        )
        .unwrap();
        let CategoryValue::Convention(c) = value else {
            panic!("wrong category");
        };
        assert_eq!(c.identification.unwrap().kind, Some(CondominiumKind::Residential));
    }

    #[test]
    fn serializes_back_to_wire_field_names() {
        let value = CategoryValue::from_json(
            Category::Personnel,
            json!({"possuiFuncionariosProprios": true, "custoTotalFolha": 5400.5}),
        )
        .unwrap();
        let out = value.to_json();
        assert_eq!(out["possuiFuncionariosProprios"], json!(true));
        assert_eq!(out["custoTotalFolha"], json!(5400.5));
        assert!(out["funcionarios"].is_null());
    }

    #[test]
    fn malformed_nested_block_is_absent_not_an_error() {
        let value = CategoryValue::from_json(
            Category::Financial,
            json!({"movimentoPeriodo": "n/a", "periodoReferencia": "Jan/2024"}),
        )
        .unwrap();
        let CategoryValue::Financial(f) = value else {
            panic!("wrong category");
        };
        assert!(f.movement.is_none());
        assert_eq!(f.period_label.as_deref(), Some("Jan/2024"));
    }
}
