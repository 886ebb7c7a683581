use super::policy::{merge_block, prefer_list, prefer_non_null, prefer_number, prefer_text};
use super::Merge;
use crate::models::{AssemblyRules, ConventionData, FinancialRules, Identification, Structure};

/// Every leaf resolves independently to "incoming if present, else existing".
/// The common-areas list is replaced wholesale when the incoming one is non-empty.
impl Merge for ConventionData {
    fn merge(self, incoming: Self) -> Self {
        ConventionData {
            identification: merge_block(self.identification, incoming.identification, merge_identification),
            structure: merge_block(self.structure, incoming.structure, merge_structure),
            assembly_rules: merge_block(self.assembly_rules, incoming.assembly_rules, merge_assembly_rules),
            financial_rules: merge_block(
                self.financial_rules,
                incoming.financial_rules,
                merge_financial_rules,
            ),
        }
    }
}

fn merge_identification(e: Identification, i: Identification) -> Identification {
    Identification {
        name: prefer_text(i.name, e.name),
        address: prefer_text(i.address, e.address),
        cnpj: prefer_text(i.cnpj, e.cnpj),
        unit_count: prefer_number(i.unit_count, e.unit_count),
        block_count: prefer_number(i.block_count, e.block_count),
        // An empty kind never parses, so any parsed kind is present.
        kind: prefer_non_null(i.kind, e.kind),
        site_area: prefer_text(i.site_area, e.site_area),
    }
}

fn merge_structure(e: Structure, i: Structure) -> Structure {
    Structure {
        block_count: prefer_number(i.block_count, e.block_count),
        unit_count: prefer_number(i.unit_count, e.unit_count),
        common_area_count: prefer_number(i.common_area_count, e.common_area_count),
        common_areas: prefer_list(i.common_areas, e.common_areas),
        physical_description: prefer_text(i.physical_description, e.physical_description),
    }
}

fn merge_assembly_rules(e: AssemblyRules, i: AssemblyRules) -> AssemblyRules {
    AssemblyRules {
        ordinary_frequency: prefer_text(i.ordinary_frequency, e.ordinary_frequency),
        minimum_notice: prefer_text(i.minimum_notice, e.minimum_notice),
        call_interval: prefer_text(i.call_interval, e.call_interval),
        first_call_quorum: prefer_text(i.first_call_quorum, e.first_call_quorum),
        second_call_quorum: prefer_text(i.second_call_quorum, e.second_call_quorum),
        necessary_works_quorum: prefer_text(i.necessary_works_quorum, e.necessary_works_quorum),
        amendment_quorum: prefer_text(i.amendment_quorum, e.amendment_quorum),
    }
}

fn merge_financial_rules(e: FinancialRules, i: FinancialRules) -> FinancialRules {
    FinancialRules {
        fee_due_date: prefer_text(i.fee_due_date, e.fee_due_date),
        late_fee_rate: prefer_text(i.late_fee_rate, e.late_fee_rate),
        reserve_fund_rate: prefer_text(i.reserve_fund_rate, e.reserve_fund_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CondominiumKind;
    use serde_json::json;

    fn convention(value: serde_json::Value) -> ConventionData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn leaves_resolve_independently() {
        let existing = convention(json!({
            "identificacao": {"nomeCondominio": "Edifício Aurora", "cnpj": "12.345.678/0001-90",
                              "tipoCondominio": "residencial"},
            "regrasFinanceiras": {"dataVencimentoCota": "dia 10"}
        }));
        let incoming = convention(json!({
            "identificacao": {"nomeCondominio": "", "endereco": "Rua das Flores, 100"},
            "regrasFinanceiras": {"percentualMultaAtraso": "2%"}
        }));

        let merged = existing.merge(incoming);
        let id = merged.identification.unwrap();
        assert_eq!(id.name.as_deref(), Some("Edifício Aurora"));
        assert_eq!(id.address.as_deref(), Some("Rua das Flores, 100"));
        assert_eq!(id.cnpj.as_deref(), Some("12.345.678/0001-90"));
        assert_eq!(id.kind, Some(CondominiumKind::Residential));

        let rules = merged.financial_rules.unwrap();
        assert_eq!(rules.fee_due_date.as_deref(), Some("dia 10"));
        assert_eq!(rules.late_fee_rate.as_deref(), Some("2%"));
    }

    #[test]
    fn zero_counts_do_not_override() {
        let existing = convention(json!({"identificacao": {"quantidadeUnidades": 48}}));
        let incoming = convention(json!({"identificacao": {"quantidadeUnidades": 0}}));
        let merged = existing.merge(incoming);
        assert_eq!(merged.identification.unwrap().unit_count, Some(48.0));
    }

    #[test]
    fn common_areas_replaced_only_when_incoming_non_empty() {
        let existing = convention(json!({"estrutural": {"areasComuns": ["Piscina", "Salão de festas"]}}));

        let kept = existing
            .clone()
            .merge(convention(json!({"estrutural": {"areasComuns": []}})));
        assert_eq!(kept.structure.unwrap().common_areas.unwrap().len(), 2);

        let replaced = existing.merge(convention(json!({"estrutural": {"areasComuns": ["Academia"]}})));
        assert_eq!(
            replaced.structure.unwrap().common_areas.unwrap(),
            vec!["Academia".to_string()]
        );
    }

    #[test]
    fn missing_block_on_one_side_keeps_the_other() {
        let existing = convention(json!({"regrasAssembleia": {"quorumPrimeiraChamada": "metade + 1"}}));
        let merged = existing.merge(convention(json!({})));
        assert_eq!(
            merged.assembly_rules.unwrap().first_call_quorum.as_deref(),
            Some("metade + 1")
        );
        // Absent on both sides still yields an (empty) block.
        assert_eq!(merged.identification, Some(Identification::default()));
    }
}
