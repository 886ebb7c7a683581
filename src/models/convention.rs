use serde::{Deserialize, Serialize};

use super::enums::CondominiumKind;
use super::lenient;

/// Condominium bylaws (convenção): identity, structure and governing rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionData {
    #[serde(rename = "identificacao", deserialize_with = "lenient::option")]
    pub identification: Option<Identification>,
    #[serde(rename = "estrutural", deserialize_with = "lenient::option")]
    pub structure: Option<Structure>,
    #[serde(rename = "regrasAssembleia", deserialize_with = "lenient::option")]
    pub assembly_rules: Option<AssemblyRules>,
    #[serde(rename = "regrasFinanceiras", deserialize_with = "lenient::option")]
    pub financial_rules: Option<FinancialRules>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Identification {
    #[serde(rename = "nomeCondominio", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "endereco", deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub cnpj: Option<String>,
    #[serde(rename = "quantidadeUnidades", deserialize_with = "lenient::number")]
    pub unit_count: Option<f64>,
    #[serde(rename = "quantidadeBlocos", deserialize_with = "lenient::number")]
    pub block_count: Option<f64>,
    #[serde(rename = "tipoCondominio", deserialize_with = "lenient::enum_field")]
    pub kind: Option<CondominiumKind>,
    #[serde(rename = "areaEmpreendimento", deserialize_with = "lenient::text")]
    pub site_area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Structure {
    #[serde(rename = "quantidadeBlocos", deserialize_with = "lenient::number")]
    pub block_count: Option<f64>,
    #[serde(rename = "quantidadeUnidades", deserialize_with = "lenient::number")]
    pub unit_count: Option<f64>,
    #[serde(rename = "quantidadeAreasComuns", deserialize_with = "lenient::number")]
    pub common_area_count: Option<f64>,
    #[serde(rename = "areasComuns", deserialize_with = "lenient::list")]
    pub common_areas: Option<Vec<String>>,
    #[serde(rename = "descricaoFisica", deserialize_with = "lenient::text")]
    pub physical_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyRules {
    #[serde(rename = "periodicidadeAGO", deserialize_with = "lenient::text")]
    pub ordinary_frequency: Option<String>,
    #[serde(rename = "prazoMinimoConvocacao", deserialize_with = "lenient::text")]
    pub minimum_notice: Option<String>,
    #[serde(rename = "intervaloChamadas", deserialize_with = "lenient::text")]
    pub call_interval: Option<String>,
    #[serde(rename = "quorumPrimeiraChamada", deserialize_with = "lenient::text")]
    pub first_call_quorum: Option<String>,
    #[serde(rename = "quorumSegundaChamada", deserialize_with = "lenient::text")]
    pub second_call_quorum: Option<String>,
    #[serde(rename = "quorumObrasNecessarias", deserialize_with = "lenient::text")]
    pub necessary_works_quorum: Option<String>,
    #[serde(rename = "quorumAlteracaoConvencao", deserialize_with = "lenient::text")]
    pub amendment_quorum: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRules {
    #[serde(rename = "dataVencimentoCota", deserialize_with = "lenient::text")]
    pub fee_due_date: Option<String>,
    #[serde(rename = "percentualMultaAtraso", deserialize_with = "lenient::text")]
    pub late_fee_rate: Option<String>,
    #[serde(rename = "percentualFundoReserva", deserialize_with = "lenient::text")]
    pub reserve_fund_rate: Option<String>,
}

impl ConventionData {
    /// Condominium name as written in the bylaws, if any.
    pub fn condominium_name(&self) -> Option<&str> {
        self.identification
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}
