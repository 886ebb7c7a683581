//! Reducers for the list-shaped categories.

use super::policy::{exact, folded, prefer_flag, prefer_number, union_by_key};
use super::Merge;
use crate::models::{CertificatesData, LegalData, MiscellaneousData, PersonnelData};

/// Certificates: union by kind, case-insensitive. The first-seen status wins.
impl Merge for CertificatesData {
    fn merge(self, incoming: Self) -> Self {
        let certificates = union_by_key(self.certificates, incoming.certificates, |c| {
            folded(c.kind.as_deref())
        });
        CertificatesData {
            certificates: Some(certificates),
        }
    }
}

/// Lawsuits: union by case identifier, exact match.
impl Merge for LegalData {
    fn merge(self, incoming: Self) -> Self {
        let lawsuits = union_by_key(self.lawsuits, incoming.lawsuits, |l| exact(l.case_id.as_deref()));
        LegalData {
            lawsuits: Some(lawsuits),
        }
    }
}

/// Free-form documents: plain concatenation, duplicates included.
impl Merge for MiscellaneousData {
    fn merge(self, incoming: Self) -> Self {
        let mut documents = self.documents.unwrap_or_default();
        documents.extend(incoming.documents.unwrap_or_default());
        MiscellaneousData {
            documents: Some(documents),
        }
    }
}

impl Merge for PersonnelData {
    fn merge(self, incoming: Self) -> Self {
        let employees = union_by_key(self.employees, incoming.employees, |e| folded(e.name.as_deref()));
        PersonnelData {
            has_own_staff: prefer_flag(incoming.has_own_staff, self.has_own_staff),
            employees: Some(employees),
            payroll_cost: prefer_number(incoming.payroll_cost, self.payroll_cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CertificateStatus;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn certificate_union_keeps_first_seen_status() {
        let existing: CertificatesData = parse(json!({"certidoes": [
            {"tipo": "CND Federal", "situacao": "negativa"}
        ]}));
        let incoming: CertificatesData = parse(json!({"certidoes": [
            {"tipo": "cnd federal", "situacao": "positiva"},
            {"tipo": "CNDT", "situacao": "regular"}
        ]}));

        let certs = existing.merge(incoming).certificates.unwrap();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].kind.as_deref(), Some("CND Federal"));
        assert_eq!(certs[0].status, Some(CertificateStatus::Negative));
        assert_eq!(certs[1].kind.as_deref(), Some("CNDT"));
    }

    #[test]
    fn certificate_union_is_order_independent_as_a_set() {
        let a: CertificatesData = parse(json!({"certidoes": [{"tipo": "FGTS"}, {"tipo": "CNDT"}]}));
        let b: CertificatesData = parse(json!({"certidoes": [{"tipo": "cndt"}, {"tipo": "Municipal"}]}));

        let keys = |c: CertificatesData| {
            let mut k: Vec<String> = c
                .certificates
                .unwrap()
                .iter()
                .map(|c| folded(c.kind.as_deref()))
                .collect();
            k.sort();
            k
        };
        assert_eq!(keys(a.clone().merge(b.clone())), keys(b.merge(a)));
    }

    #[test]
    fn certificates_without_kind_share_one_slot() {
        let existing: CertificatesData = parse(json!({"certidoes": [{"situacao": "regular"}]}));
        let incoming: CertificatesData = parse(json!({"certidoes": [{"tipo": "", "situacao": "positiva"}]}));
        assert_eq!(existing.merge(incoming).certificates.unwrap().len(), 1);
    }

    #[test]
    fn lawsuit_union_is_exact_and_keeps_zero_claims() {
        let existing: LegalData = parse(json!({"processos": [
            {"identificacao": "0001-22.2024.8.26.0100", "valorCausa": 0}
        ]}));
        let incoming: LegalData = parse(json!({"processos": [
            {"identificacao": "0001-22.2024.8.26.0100", "valorCausa": 15000},
            {"identificacao": "0002-33.2024.5.02.0001", "tipo": "Trabalhista"}
        ]}));

        let lawsuits = existing.merge(incoming).lawsuits.unwrap();
        assert_eq!(lawsuits.len(), 2);
        assert_eq!(lawsuits[0].claim_value, Some(0.0));
        assert_eq!(lawsuits[1].kind.as_deref(), Some("Trabalhista"));
    }

    #[test]
    fn lawsuit_union_is_order_independent_as_a_set() {
        let a: LegalData = parse(json!({"processos": [
            {"identificacao": "0001-22.2024.8.26.0100"}, {"identificacao": "0003-44.2023.8.26.0100"}
        ]}));
        let b: LegalData = parse(json!({"processos": [
            {"identificacao": "0003-44.2023.8.26.0100"}, {"identificacao": "0009-10.2022.5.02.0001"}
        ]}));

        let ids = |l: LegalData| {
            let mut k: Vec<String> = l
                .lawsuits
                .unwrap()
                .iter()
                .map(|p| exact(p.case_id.as_deref()))
                .collect();
            k.sort();
            k
        };
        let ab = ids(a.clone().merge(b.clone()));
        assert_eq!(ab, ids(b.merge(a)));
        assert_eq!(ab.len(), 3);
    }

    #[test]
    fn employee_union_is_order_independent_as_a_set() {
        let a: PersonnelData = parse(json!({"funcionarios": [{"nome": "Maria Souza"}, {"nome": "João Lima"}]}));
        let b: PersonnelData = parse(json!({"funcionarios": [{"nome": "JOÃO LIMA"}, {"nome": "Rita Alves"}]}));

        let names = |p: PersonnelData| {
            let mut k: Vec<String> = p
                .employees
                .unwrap()
                .iter()
                .map(|e| folded(e.name.as_deref()))
                .collect();
            k.sort();
            k
        };
        let ab = names(a.clone().merge(b.clone()));
        assert_eq!(ab, names(b.merge(a)));
        assert_eq!(ab, vec!["joão lima", "maria souza", "rita alves"]);
    }

    #[test]
    fn miscellaneous_concatenates_duplicates() {
        let doc = json!({"documentos": [{"tipoDocumento": "Contrato", "titulo": "Portaria"}]});
        let merged = parse::<MiscellaneousData>(doc.clone()).merge(parse(doc));
        assert_eq!(merged.documents.unwrap().len(), 2);
    }

    #[test]
    fn personnel_scalars_follow_truthiness() {
        let existing: PersonnelData = parse(json!({
            "possuiFuncionariosProprios": true,
            "custoTotalFolha": 8000,
            "funcionarios": [{"nome": "Maria Souza", "cargo": "Zeladora"}]
        }));
        let incoming: PersonnelData = parse(json!({
            "possuiFuncionariosProprios": false,
            "custoTotalFolha": 0,
            "funcionarios": [{"nome": "MARIA SOUZA", "cargo": "Porteira"}, {"nome": "João Lima"}]
        }));

        let merged = existing.merge(incoming);
        assert_eq!(merged.has_own_staff, Some(true));
        assert_eq!(merged.payroll_cost, Some(8000.0));
        let employees = merged.employees.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].role.as_deref(), Some("Zeladora"));
    }

    #[test]
    fn personnel_employees_always_materialize() {
        let merged = PersonnelData::default().merge(PersonnelData::default());
        assert_eq!(merged.employees, Some(Vec::new()));
    }
}
