use serde::{Deserialize, Serialize};

use super::enums::ParticipationKind;
use super::lenient;

/// Assembly minutes (atas): governance, condominium fee and resolutions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutesData {
    #[serde(rename = "governanca", deserialize_with = "lenient::option")]
    pub governance: Option<Governance>,
    #[serde(rename = "cotaCondominial", deserialize_with = "lenient::option")]
    pub fee: Option<CondominiumFee>,
    #[serde(rename = "deliberacoes", deserialize_with = "lenient::option")]
    pub resolutions: Option<Resolutions>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Governance {
    #[serde(rename = "gestaoAtual", deserialize_with = "lenient::text")]
    pub management_period: Option<String>,
    #[serde(rename = "sindico", deserialize_with = "lenient::option")]
    pub syndic: Option<Syndic>,
    #[serde(rename = "subsindico", deserialize_with = "lenient::option")]
    pub vice_syndic: Option<ViceSyndic>,
    #[serde(rename = "conselho", deserialize_with = "lenient::list")]
    pub council: Option<Vec<CouncilMember>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Syndic {
    #[serde(rename = "nome", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "unidade", deserialize_with = "lenient::text")]
    pub unit: Option<String>,
    #[serde(rename = "periodoMandato", deserialize_with = "lenient::text")]
    pub term: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViceSyndic {
    #[serde(rename = "nome", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "unidade", deserialize_with = "lenient::text")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CouncilMember {
    #[serde(rename = "nome", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "unidade", deserialize_with = "lenient::text")]
    pub unit: Option<String>,
    #[serde(rename = "tipoParticipacao", deserialize_with = "lenient::enum_field")]
    pub participation: Option<ParticipationKind>,
    #[serde(rename = "presidente", deserialize_with = "lenient::flag")]
    pub is_president: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CondominiumFee {
    #[serde(rename = "existeCotaVigente", deserialize_with = "lenient::flag")]
    pub has_current_fee: Option<bool>,
    #[serde(rename = "valorTaxa", deserialize_with = "lenient::number")]
    pub fee_amount: Option<f64>,
    #[serde(rename = "existeReajusteAprovado", deserialize_with = "lenient::flag")]
    pub has_approved_adjustment: Option<bool>,
    #[serde(rename = "percentualFundoReserva", deserialize_with = "lenient::text")]
    pub reserve_fund_rate: Option<String>,
    #[serde(rename = "valorAdicionalFundoReserva", deserialize_with = "lenient::number")]
    pub reserve_fund_extra: Option<f64>,
    #[serde(rename = "valorTotalAposReajuste", deserialize_with = "lenient::number")]
    pub total_after_adjustment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resolutions {
    #[serde(rename = "resumoAGO", deserialize_with = "lenient::text")]
    pub ordinary_summary: Option<String>,
    #[serde(rename = "resumoAGE", deserialize_with = "lenient::text")]
    pub extraordinary_summary: Option<String>,
}

impl MinutesData {
    /// Syndic name recorded in the minutes, if any.
    pub fn syndic_name(&self) -> Option<&str> {
        self.governance
            .as_ref()
            .and_then(|g| g.syndic.as_ref())
            .and_then(|s| s.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}
