use serde::{Deserialize, Serialize};

use super::enums::ResultKind;
use super::lenient;

/// Financial statements: current position, period movement, delinquency
/// and the historical series used for charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialData {
    #[serde(rename = "periodoReferencia", deserialize_with = "lenient::text")]
    pub period_label: Option<String>,
    #[serde(rename = "posicaoFinanceira", deserialize_with = "lenient::option")]
    pub position: Option<FinancialPosition>,
    // Legacy single-value balances, kept for documents without an account breakdown.
    #[serde(rename = "saldoConta", deserialize_with = "lenient::number")]
    pub account_balance: Option<f64>,
    #[serde(rename = "valorFundoReserva", deserialize_with = "lenient::number")]
    pub reserve_fund: Option<f64>,
    #[serde(rename = "totalRecursosDisponiveis", deserialize_with = "lenient::number")]
    pub total_available: Option<f64>,
    #[serde(rename = "movimentoPeriodo", deserialize_with = "lenient::option")]
    pub movement: Option<PeriodMovement>,
    #[serde(rename = "inadimplencia", deserialize_with = "lenient::option")]
    pub delinquency: Option<Delinquency>,
    #[serde(rename = "consumoMensal", deserialize_with = "lenient::option")]
    pub monthly_consumption: Option<MonthlyConsumption>,
    #[serde(rename = "consumoUtilidades", deserialize_with = "lenient::option")]
    pub utility_costs: Option<UtilityCosts>,
    #[serde(rename = "despesasPorCategoria", deserialize_with = "lenient::list")]
    pub expenses_by_category: Option<Vec<ExpenseCategory>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialPosition {
    #[serde(rename = "contas", deserialize_with = "lenient::list")]
    pub accounts: Option<Vec<AccountBalance>>,
    #[serde(rename = "totalGeral", deserialize_with = "lenient::number")]
    pub grand_total: Option<f64>,
}

impl FinancialPosition {
    pub fn has_accounts(&self) -> bool {
        self.accounts.as_ref().is_some_and(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountBalance {
    #[serde(rename = "nome", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "saldo", deserialize_with = "lenient::number")]
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodMovement {
    #[serde(rename = "totalReceitas", deserialize_with = "lenient::number")]
    pub total_revenue: Option<f64>,
    #[serde(rename = "totalDespesas", deserialize_with = "lenient::number")]
    pub total_expenses: Option<f64>,
    #[serde(rename = "resultado", deserialize_with = "lenient::number")]
    pub result: Option<f64>,
    #[serde(rename = "tipoResultado", deserialize_with = "lenient::enum_field")]
    pub result_kind: Option<ResultKind>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Delinquency {
    #[serde(rename = "totalInadimplente", deserialize_with = "lenient::number")]
    pub total_delinquent: Option<f64>,
    #[serde(rename = "percentualInadimplencia", deserialize_with = "lenient::number")]
    pub delinquency_rate: Option<f64>,
    #[serde(rename = "unidadesInadimplentes", deserialize_with = "lenient::list")]
    pub units: Option<Vec<DelinquentUnit>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DelinquentUnit {
    #[serde(rename = "unidade", deserialize_with = "lenient::text")]
    pub unit: Option<String>,
    #[serde(rename = "proprietario", deserialize_with = "lenient::text")]
    pub owner: Option<String>,
    #[serde(rename = "valorDevido", deserialize_with = "lenient::number")]
    pub amount_due: Option<f64>,
    #[serde(rename = "mesesAtraso", deserialize_with = "lenient::number")]
    pub months_overdue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyConsumption {
    #[serde(rename = "agua", deserialize_with = "lenient::list")]
    pub water: Option<Vec<MonthlyValue>>,
    #[serde(rename = "energia", deserialize_with = "lenient::list")]
    pub energy: Option<Vec<MonthlyValue>>,
    #[serde(rename = "gas", deserialize_with = "lenient::list")]
    pub gas: Option<Vec<MonthlyValue>>,
}

impl MonthlyConsumption {
    /// A series counts as established once water or energy has entries.
    /// Gas alone does not.
    pub fn is_established(&self) -> bool {
        let non_empty = |s: &Option<Vec<MonthlyValue>>| s.as_ref().is_some_and(|v| !v.is_empty());
        non_empty(&self.water) || non_empty(&self.energy)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyValue {
    #[serde(rename = "mes", deserialize_with = "lenient::text")]
    pub month: Option<String>,
    #[serde(rename = "valor", deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityCosts {
    #[serde(rename = "aguaEsgoto", deserialize_with = "lenient::number")]
    pub water_sewage: Option<f64>,
    #[serde(rename = "energiaEletrica", deserialize_with = "lenient::number")]
    pub electricity: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub gas: Option<f64>,
    #[serde(rename = "outros", deserialize_with = "lenient::number")]
    pub other: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseCategory {
    #[serde(rename = "categoria", deserialize_with = "lenient::text")]
    pub category: Option<String>,
    #[serde(rename = "valor", deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
}
