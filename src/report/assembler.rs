use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Category, CategoryValue, CertificatesData, ConventionData, FinancialData, LegalData,
    MinutesData, MiscellaneousData, PersonnelData,
};

/// Default author line on generated reports.
pub const DEFAULT_GENERATED_BY: &str = "Equipe BAP";

/// Per-report values that do not come from the documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
    pub manager_name: String,
    pub condominium_name: String,
}

/// The welcome report model handed to the renderers. Categories with no
/// data are absent; renderers skip their sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WelcomeReport {
    #[serde(rename = "dataGeracao")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "geradoPor")]
    pub generated_by: String,
    #[serde(rename = "nomeSindico")]
    pub manager_name: String,
    #[serde(rename = "nomeCondominio")]
    pub condominium_name: String,
    #[serde(rename = "convencao")]
    pub convention: Option<ConventionData>,
    #[serde(rename = "financeiro")]
    pub financial: Option<FinancialData>,
    #[serde(rename = "atas")]
    pub minutes: Option<MinutesData>,
    #[serde(rename = "certidoes")]
    pub certificates: Option<CertificatesData>,
    #[serde(rename = "departamentoPessoal")]
    pub personnel: Option<PersonnelData>,
    #[serde(rename = "juridico")]
    pub legal: Option<LegalData>,
    #[serde(rename = "outros")]
    pub miscellaneous: Option<MiscellaneousData>,
}

impl WelcomeReport {
    pub fn has_any_section(&self) -> bool {
        self.convention.is_some()
            || self.financial.is_some()
            || self.minutes.is_some()
            || self.certificates.is_some()
            || self.personnel.is_some()
            || self.legal.is_some()
            || self.miscellaneous.is_some()
    }
}

/// Build the report model from the per-category merged values.
pub fn assemble(
    accumulators: &HashMap<Category, CategoryValue>,
    metadata: ReportMetadata,
) -> WelcomeReport {
    let mut report = WelcomeReport {
        generated_at: metadata.generated_at,
        generated_by: metadata.generated_by,
        manager_name: metadata.manager_name,
        condominium_name: metadata.condominium_name,
        ..WelcomeReport::default()
    };

    for value in accumulators.values().cloned() {
        match value {
            CategoryValue::Convention(v) => report.convention = Some(v),
            CategoryValue::Financial(v) => report.financial = Some(v),
            CategoryValue::Minutes(v) => report.minutes = Some(v),
            CategoryValue::Certificates(v) => report.certificates = Some(v),
            CategoryValue::Personnel(v) => report.personnel = Some(v),
            CategoryValue::Legal(v) => report.legal = Some(v),
            CategoryValue::Miscellaneous(v) => report.miscellaneous = Some(v),
        }
    }
    report
}

/// Explicit operator value, then the syndic named in the minutes, then empty.
pub fn resolve_manager_name(
    explicit: Option<&str>,
    accumulators: &HashMap<Category, CategoryValue>,
) -> String {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match accumulators.get(&Category::Minutes) {
        Some(CategoryValue::Minutes(minutes)) => minutes.syndic_name().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

/// Name from the bylaws identification block, or empty.
pub fn resolve_condominium_name(accumulators: &HashMap<Category, CategoryValue>) -> String {
    match accumulators.get(&Category::Convention) {
        Some(CategoryValue::Convention(convention)) => {
            convention.condominium_name().unwrap_or_default().to_string()
        }
        _ => String::new(),
    }
}

/// Metadata for a report generated now, with names resolved from the data.
pub fn metadata_for(
    accumulators: &HashMap<Category, CategoryValue>,
    explicit_manager: Option<&str>,
    generated_by: &str,
) -> ReportMetadata {
    ReportMetadata {
        generated_at: Utc::now(),
        generated_by: generated_by.to_string(),
        manager_name: resolve_manager_name(explicit_manager, accumulators),
        condominium_name: resolve_condominium_name(accumulators),
    }
}
