use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde wire tag.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// The seven fixed document classifications an operator can file a document under.
    Category {
        Convention => "convencao",
        Minutes => "atas",
        Financial => "financeiro",
        Certificates => "certidoes",
        Personnel => "departamentoPessoal",
        Legal => "juridico",
        Miscellaneous => "outros",
    }
);

impl Category {
    /// All categories, in report section order of the operator screen.
    pub fn all() -> &'static [Category] {
        &[
            Self::Convention,
            Self::Minutes,
            Self::Financial,
            Self::Certificates,
            Self::Personnel,
            Self::Legal,
            Self::Miscellaneous,
        ]
    }

    /// Human-facing section title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Convention => "Convenção",
            Self::Minutes => "Atas de Assembleia",
            Self::Financial => "Documentos Financeiros",
            Self::Certificates => "Certidões",
            Self::Personnel => "Departamento Pessoal",
            Self::Legal => "Jurídico",
            Self::Miscellaneous => "Outros Documentos",
        }
    }
}

str_enum!(CertificateStatus {
    Regular => "regular",
    Negative => "negativa",
    Positive => "positiva",
});

impl CertificateStatus {
    /// Positive certificates carry pending debts or irregularities.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

str_enum!(CondominiumKind {
    Residential => "residencial",
    Commercial => "comercial",
    Mixed => "misto",
});

str_enum!(ParticipationKind {
    Effective => "efetivo",
    Alternate => "suplente",
});

str_enum!(ResultKind {
    Surplus => "superavit",
    Deficit => "deficit",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_tags_round_trip_through_from_str() {
        for category in Category::all() {
            assert_eq!(Category::from_str(category.as_str()).unwrap(), *category);
        }
    }

    #[test]
    fn category_serializes_as_wire_tag() {
        let json = serde_json::to_string(&Category::Personnel).unwrap();
        assert_eq!(json, "\"departamentoPessoal\"");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = Category::from_str("seguros").unwrap_err();
        assert!(err.to_string().contains("seguros"));
    }

    #[test]
    fn only_positive_certificate_needs_attention() {
        assert!(CertificateStatus::Positive.needs_attention());
        assert!(!CertificateStatus::Negative.needs_attention());
        assert!(!CertificateStatus::Regular.needs_attention());
    }
}
