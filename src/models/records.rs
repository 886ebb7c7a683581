//! List-shaped categories: certificates, personnel, lawsuits and
//! free-form documents.

use serde::{Deserialize, Serialize};

use super::enums::CertificateStatus;
use super::lenient;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificatesData {
    #[serde(rename = "certidoes", deserialize_with = "lenient::list")]
    pub certificates: Option<Vec<Certificate>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    #[serde(rename = "tipo", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(rename = "situacao", deserialize_with = "lenient::enum_field")]
    pub status: Option<CertificateStatus>,
    #[serde(rename = "dataValidade", deserialize_with = "lenient::text")]
    pub valid_until: Option<String>,
    #[serde(rename = "observacao", deserialize_with = "lenient::text")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonnelData {
    #[serde(rename = "possuiFuncionariosProprios", deserialize_with = "lenient::flag")]
    pub has_own_staff: Option<bool>,
    #[serde(rename = "funcionarios", deserialize_with = "lenient::list")]
    pub employees: Option<Vec<Employee>>,
    #[serde(rename = "custoTotalFolha", deserialize_with = "lenient::number")]
    pub payroll_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde(rename = "nome", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "cargo", deserialize_with = "lenient::text")]
    pub role: Option<String>,
    #[serde(rename = "salario", deserialize_with = "lenient::number")]
    pub salary: Option<f64>,
    #[serde(rename = "horasExtras", deserialize_with = "lenient::number")]
    pub overtime_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalData {
    #[serde(rename = "processos", deserialize_with = "lenient::list")]
    pub lawsuits: Option<Vec<Lawsuit>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lawsuit {
    #[serde(rename = "identificacao", deserialize_with = "lenient::text")]
    pub case_id: Option<String>,
    #[serde(rename = "tipo", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(rename = "parteContraria", deserialize_with = "lenient::text")]
    pub opposing_party: Option<String>,
    #[serde(rename = "descricao", deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(rename = "valorCausa", deserialize_with = "lenient::number")]
    pub claim_value: Option<f64>,
    #[serde(rename = "observacao", deserialize_with = "lenient::text")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscellaneousData {
    #[serde(rename = "documentos", deserialize_with = "lenient::list")]
    pub documents: Option<Vec<MiscDocument>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscDocument {
    #[serde(rename = "tipoDocumento", deserialize_with = "lenient::text")]
    pub document_kind: Option<String>,
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(rename = "resumo", deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(rename = "itensImportantes", deserialize_with = "lenient::list")]
    pub key_points: Option<Vec<String>>,
    #[serde(rename = "observacoes", deserialize_with = "lenient::text")]
    pub notes: Option<String>,
}
