use super::policy::{
    folded, is_truthy_number, keep_if, prefer_non_null, prefer_text, replace_if, union_against_existing,
};
use super::Merge;
use crate::models::FinancialData;

/// Current-position data (balances, movement, delinquency) prefers the newer
/// document. Historical series (monthly consumption, utility totals) keep
/// whatever was established first. Expense categories are unioned against the
/// existing list only: repeats inside one incoming statement are all kept.
impl Merge for FinancialData {
    fn merge(self, incoming: Self) -> Self {
        let expenses = union_against_existing(self.expenses_by_category, incoming.expenses_by_category, |e| {
            folded(e.category.as_deref())
        });

        FinancialData {
            period_label: prefer_text(incoming.period_label, self.period_label),
            position: replace_if(incoming.position, self.position, |p| p.has_accounts()),
            account_balance: prefer_non_null(incoming.account_balance, self.account_balance),
            reserve_fund: prefer_non_null(incoming.reserve_fund, self.reserve_fund),
            total_available: prefer_non_null(incoming.total_available, self.total_available),
            movement: replace_if(incoming.movement, self.movement, |m| m.total_revenue.is_some()),
            delinquency: replace_if(incoming.delinquency, self.delinquency, |d| {
                d.total_delinquent.is_some()
            }),
            monthly_consumption: keep_if(self.monthly_consumption, incoming.monthly_consumption, |c| {
                c.is_established()
            }),
            utility_costs: keep_if(self.utility_costs, incoming.utility_costs, |u| {
                u.total.is_some_and(is_truthy_number)
            }),
            expenses_by_category: (!expenses.is_empty()).then_some(expenses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn financial(value: serde_json::Value) -> FinancialData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn null_movement_keeps_existing_block() {
        let existing = financial(json!({
            "movimentoPeriodo": {"totalReceitas": 1000, "totalDespesas": 800, "resultado": 200,
                                 "tipoResultado": "superavit"}
        }));
        let before = existing.movement.clone();
        let merged = existing.merge(financial(json!({"movimentoPeriodo": null})));
        assert_eq!(merged.movement, before);
    }

    #[test]
    fn movement_with_zero_revenue_replaces_wholesale() {
        let existing = financial(json!({"movimentoPeriodo": {"totalReceitas": 1000, "totalDespesas": 800}}));
        let merged = existing.merge(financial(json!({"movimentoPeriodo": {"totalReceitas": 0}})));
        let movement = merged.movement.unwrap();
        assert_eq!(movement.total_revenue, Some(0.0));
        assert_eq!(movement.total_expenses, None);
    }

    #[test]
    fn established_monthly_series_is_not_overwritten() {
        let existing = financial(json!({"consumoMensal": {"agua": [{"mes": "Jan", "valor": 100}]}}));
        let merged = existing.merge(financial(json!({
            "consumoMensal": {"agua": [{"mes": "Fev", "valor": 200}]}
        })));
        let water = merged.monthly_consumption.unwrap().water.unwrap();
        // February is dropped: the first established series wins.
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].month.as_deref(), Some("Jan"));
        assert_eq!(water[0].value, Some(100.0));
    }

    #[test]
    fn gas_only_series_is_not_established() {
        let existing = financial(json!({"consumoMensal": {"gas": [{"mes": "Jan", "valor": 40}]}}));
        let merged = existing.merge(financial(json!({
            "consumoMensal": {"energia": [{"mes": "Jan", "valor": 900}]}
        })));
        let series = merged.monthly_consumption.unwrap();
        assert!(series.gas.is_none());
        assert_eq!(series.energy.unwrap().len(), 1);
    }

    #[test]
    fn legacy_balances_use_non_null_semantics() {
        let existing = financial(json!({"saldoConta": 5000, "valorFundoReserva": 1200}));
        let merged = existing.merge(financial(json!({"saldoConta": 0})));
        assert_eq!(merged.account_balance, Some(0.0));
        assert_eq!(merged.reserve_fund, Some(1200.0));
    }

    #[test]
    fn utility_totals_kept_only_when_existing_total_is_truthy() {
        let zero_total = financial(json!({"consumoUtilidades": {"aguaEsgoto": 10, "total": 0}}));
        let merged = zero_total.merge(financial(json!({"consumoUtilidades": {"total": 900}})));
        assert_eq!(merged.utility_costs.unwrap().total, Some(900.0));

        let real_total = financial(json!({"consumoUtilidades": {"total": 450}}));
        let merged = real_total.merge(financial(json!({"consumoUtilidades": {"total": 900}})));
        assert_eq!(merged.utility_costs.unwrap().total, Some(450.0));
    }

    #[test]
    fn position_replaced_only_with_accounts() {
        let existing = financial(json!({
            "posicaoFinanceira": {"contas": [{"nome": "Conta Corrente", "saldo": 100}], "totalGeral": 100}
        }));
        let kept = existing
            .clone()
            .merge(financial(json!({"posicaoFinanceira": {"contas": [], "totalGeral": 999}})));
        assert_eq!(kept.position.unwrap().grand_total, Some(100.0));

        let replaced = existing.merge(financial(json!({
            "posicaoFinanceira": {"contas": [{"nome": "Fundo de Obras", "saldo": 50},
                                             {"nome": "Fundo de Obras", "saldo": 70}],
                                  "totalGeral": 120}
        })));
        let position = replaced.position.unwrap();
        // Accounts are an atomic block; same-name accounts are not deduplicated.
        assert_eq!(position.accounts.unwrap().len(), 2);
        assert_eq!(position.grand_total, Some(120.0));
    }

    #[test]
    fn delinquency_prefers_incoming_with_total() {
        let existing = financial(json!({"inadimplencia": {"totalInadimplente": 3000}}));
        let merged = existing
            .clone()
            .merge(financial(json!({"inadimplencia": {"percentualInadimplencia": 5}})));
        assert_eq!(merged.delinquency.unwrap().total_delinquent, Some(3000.0));

        let merged = existing.merge(financial(json!({"inadimplencia": {"totalInadimplente": 0}})));
        assert_eq!(merged.delinquency.unwrap().total_delinquent, Some(0.0));
    }

    #[test]
    fn expenses_union_case_insensitive_and_order_independent() {
        let a = financial(json!({"despesasPorCategoria": [
            {"categoria": "Pessoal", "valor": 1000}, {"categoria": "Limpeza", "valor": 300}
        ]}));
        let b = financial(json!({"despesasPorCategoria": [
            {"categoria": "pessoal", "valor": 999}, {"categoria": "Seguros", "valor": 150}
        ]}));

        let keys = |f: FinancialData| {
            let mut k: Vec<String> = f
                .expenses_by_category
                .unwrap()
                .into_iter()
                .map(|e| e.category.unwrap().to_lowercase())
                .collect();
            k.sort();
            k
        };

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(keys(ab.clone()), keys(ba));
        assert_eq!(ab.expenses_by_category.as_ref().unwrap().len(), 3);
        assert_eq!(ab.expenses_by_category.unwrap()[0].amount, Some(1000.0));
    }

    #[test]
    fn expense_repeats_within_one_statement_are_kept() {
        let existing = financial(json!({"despesasPorCategoria": [{"categoria": "Pessoal", "valor": 1000}]}));
        let merged = existing.merge(financial(json!({"despesasPorCategoria": [
            {"categoria": "Manutenção", "valor": 200},
            {"categoria": "manutenção", "valor": 80},
            {"categoria": "PESSOAL", "valor": 5}
        ]})));
        let expenses = merged.expenses_by_category.unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[1].amount, Some(200.0));
        assert_eq!(expenses[2].amount, Some(80.0));
    }

    #[test]
    fn empty_expense_union_is_absent() {
        let merged = financial(json!({})).merge(financial(json!({"despesasPorCategoria": []})));
        assert!(merged.expenses_by_category.is_none());
    }

    #[test]
    fn period_label_prefers_non_empty_incoming() {
        let existing = financial(json!({"periodoReferencia": "Jan/2024"}));
        let merged = existing.clone().merge(financial(json!({"periodoReferencia": ""})));
        assert_eq!(merged.period_label.as_deref(), Some("Jan/2024"));
        let merged = existing.merge(financial(json!({"periodoReferencia": "Ano 2024"})));
        assert_eq!(merged.period_label.as_deref(), Some("Ano 2024"));
    }
}
