//! Format-neutral layout of the welcome report.
//!
//! The HTML, DOCX and PDF renderers all walk the same `Section` list so the
//! three outputs carry identical content; each decides only how a block
//! looks.

use super::format::{capitalize, format_currency, format_number};
use super::WelcomeReport;
use crate::models::{
    CertificatesData, ConventionData, FinancialData, LegalData, MinutesData, MiscellaneousData,
    MonthlyValue, ParticipationKind, PersonnelData, ResultKind,
};

pub const COVER_BADGE: &str = "Relatório de Gestão";
pub const COVER_SUBTITLE: &str = "Boas Vindas à Nova Gestão";
pub const LETTER_TITLE: &str = "Carta de Apresentação";
pub const COMPANY_NAME: &str = "BAP Condomínios e Imóveis";
pub const SIGNATURE_TEAM: &str = "Time BAP";
pub const FOOTER_LINE: &str = "Relatório gerado pelo Sistema Boas Vindas BAP";

pub const LETTER_PARAGRAPHS: &[&str] = &[
    "É com grande satisfação que apresentamos este Relatório de Boas Vindas, preparado para apoiar os primeiros passos da sua gestão condominial.",
    "Informação clara e organizada é a base de uma administração eficiente e transparente. Reunimos aqui os principais dados do condomínio, extraídos dos documentos recebidos, para oferecer um retrato fiel da situação atual.",
    "A BAP Condomínios e Imóveis valoriza a parceria constante, a troca de informações e a proximidade com cada cliente. Estaremos ao seu lado em cada etapa, com suporte, orientação e as ferramentas necessárias para uma boa gestão.",
    "Conte sempre conosco para construir uma parceria sólida e duradoura, baseada em confiança, transparência e compromisso.",
];

pub const LETTER_CLOSING: &str = "Seja bem-vindo(a) e bom trabalho!";

/// Expense bars beyond this count are dropped.
const MAX_EXPENSE_BARS: usize = 8;

const MONTH_ORDER: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Success,
    Alert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub amount: f64,
    /// Share of the largest bar, 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Subheading(String),
    Paragraph(String),
    /// Label/value rows. The last row is emphasized when `total` is set.
    Fields { rows: Vec<(String, String)>, total: bool },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Bullets(Vec<String>),
    Callout { tone: Tone, text: String },
    Bars(Vec<Bar>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub number: u8,
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }
}

/// `Prezado(a) <name>,` or the generic salutation.
pub fn greeting(report: &WelcomeReport) -> String {
    let name = report.manager_name.trim();
    if name.is_empty() {
        "Prezado(a) Síndico(a),".to_string()
    } else {
        format!("Prezado(a) {name},")
    }
}

/// Name shown on the cover.
pub fn display_name(report: &WelcomeReport) -> &str {
    let name = report.condominium_name.trim();
    if name.is_empty() {
        "Condomínio"
    } else {
        name
    }
}

/// Sections in fixed numbering; categories without data are omitted.
pub fn build_sections(report: &WelcomeReport) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut push = |number: u8, title: &'static str, blocks: Option<Vec<Block>>| {
        if let Some(blocks) = blocks {
            sections.push(Section { number, title, blocks });
        }
    };

    push(1, "DADOS DO CONDOMÍNIO", report.convention.as_ref().map(convention_blocks));
    push(2, "GOVERNANÇA", report.minutes.as_ref().map(minutes_blocks));
    push(3, "SITUAÇÃO FINANCEIRA", report.financial.as_ref().map(financial_blocks));
    push(
        4,
        "CERTIDÕES E REGULARIDADE",
        report.certificates.as_ref().and_then(certificate_blocks),
    );
    push(5, "DEPARTAMENTO PESSOAL", report.personnel.as_ref().map(personnel_blocks));
    push(6, "SITUAÇÃO JURÍDICA", report.legal.as_ref().map(legal_blocks));
    push(7, "OUTROS DOCUMENTOS", report.miscellaneous.as_ref().map(miscellaneous_blocks));
    sections
}

// ═══════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════

/// Label/value rows with empty values skipped.
struct Rows(Vec<(String, String)>);

impl Rows {
    fn new() -> Self {
        Rows(Vec::new())
    }

    fn text(mut self, label: &str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.push((label.to_string(), v.to_string()));
        }
        self
    }

    fn count(self, label: &str, value: Option<f64>) -> Self {
        let text = value.filter(|v| *v != 0.0).map(format_number);
        self.text(label, text.as_deref())
    }

    fn money(mut self, label: &str, value: Option<f64>) -> Self {
        self.0.push((label.to_string(), format_currency(value)));
        self
    }

    fn money_if_positive(self, label: &str, value: Option<f64>) -> Self {
        match value {
            Some(v) if v > 0.0 => self.money(label, Some(v)),
            _ => self,
        }
    }

    fn money_if_truthy(self, label: &str, value: Option<f64>) -> Self {
        match value {
            Some(v) if v != 0.0 => self.money(label, Some(v)),
            _ => self,
        }
    }

    fn into_block(self, blocks: &mut Vec<Block>, subheading: &str) {
        if !self.0.is_empty() {
            blocks.push(Block::Subheading(subheading.to_string()));
            blocks.push(Block::Fields {
                rows: self.0,
                total: false,
            });
        }
    }
}

fn yes_no(flag: Option<bool>) -> &'static str {
    if flag.unwrap_or(false) {
        "Sim"
    } else {
        "Não"
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

// ═══════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════

fn convention_blocks(data: &ConventionData) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(id) = &data.identification {
        Rows::new()
            .text("Nome", id.name.as_deref())
            .text("Endereço", id.address.as_deref())
            .text("CNPJ", id.cnpj.as_deref())
            .text("Tipo", id.kind.map(|k| capitalize(k.as_str())).as_deref())
            .count("Total de Unidades", id.unit_count)
            .count("Total de Blocos", id.block_count)
            .text("Área do Empreendimento", id.site_area.as_deref())
            .into_block(&mut blocks, "Identificação");
    }

    if let Some(structure) = &data.structure {
        Rows::new()
            .count("Quantidade de Blocos", structure.block_count)
            .count("Quantidade de Unidades", structure.unit_count)
            .count("Áreas Comuns", structure.common_area_count)
            .into_block(&mut blocks, "Estrutura Física");
        if let Some(areas) = structure.common_areas.as_ref().filter(|a| !a.is_empty()) {
            blocks.push(Block::Paragraph(format!(
                "Principais áreas comuns: {}",
                areas.join(", ")
            )));
        }
        if let Some(description) = non_empty(&structure.physical_description) {
            blocks.push(Block::Callout {
                tone: Tone::Neutral,
                text: description.to_string(),
            });
        }
    }

    if let Some(rules) = &data.assembly_rules {
        Rows::new()
            .text("Periodicidade AGO", rules.ordinary_frequency.as_deref())
            .text("Prazo de Convocação", rules.minimum_notice.as_deref())
            .text("Intervalo entre Chamadas", rules.call_interval.as_deref())
            .text("Quórum 1ª Chamada", rules.first_call_quorum.as_deref())
            .text("Quórum 2ª Chamada", rules.second_call_quorum.as_deref())
            .text("Quórum Obras Necessárias", rules.necessary_works_quorum.as_deref())
            .text("Quórum Alteração Convenção", rules.amendment_quorum.as_deref())
            .into_block(&mut blocks, "Regras de Assembleia");
    }

    if let Some(rules) = &data.financial_rules {
        Rows::new()
            .text("Vencimento da Cota", rules.fee_due_date.as_deref())
            .text("Multa por Atraso", rules.late_fee_rate.as_deref())
            .text("Fundo de Reserva", rules.reserve_fund_rate.as_deref())
            .into_block(&mut blocks, "Regras Financeiras");
    }

    blocks
}

fn minutes_blocks(data: &MinutesData) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(governance) = &data.governance {
        if let Some(period) = non_empty(&governance.management_period) {
            blocks.push(Block::Paragraph(format!("Gestão: {period}")));
        }
        if let Some(syndic) = &governance.syndic {
            Rows::new()
                .text("Nome", syndic.name.as_deref())
                .text("Unidade", syndic.unit.as_deref())
                .text("Mandato", syndic.term.as_deref())
                .into_block(&mut blocks, "Síndico");
        }
        if let Some(vice) = &governance.vice_syndic {
            Rows::new()
                .text("Nome", vice.name.as_deref())
                .text("Unidade", vice.unit.as_deref())
                .into_block(&mut blocks, "Subsíndico");
        }
        if let Some(council) = governance.council.as_ref().filter(|c| !c.is_empty()) {
            let items = council
                .iter()
                .map(|member| {
                    let mut line = member.name.clone().unwrap_or_default();
                    if let Some(unit) = non_empty(&member.unit) {
                        line.push_str(&format!(" - {unit}"));
                    }
                    match member.participation {
                        Some(ParticipationKind::Alternate) => line.push_str(" (Suplente)"),
                        Some(ParticipationKind::Effective) => line.push_str(" (Efetivo)"),
                        None => {}
                    }
                    if member.is_president == Some(true) {
                        line.push_str(" - Presidente");
                    }
                    line
                })
                .collect();
            blocks.push(Block::Subheading("Conselho".into()));
            blocks.push(Block::Bullets(items));
        }
    }

    if let Some(fee) = &data.fee {
        let mut rows = Rows::new().money("Valor Atual", fee.fee_amount);
        rows.0.push((
            "Reajuste Aprovado".into(),
            yes_no(fee.has_approved_adjustment).into(),
        ));
        if fee.total_after_adjustment.is_some() {
            rows = rows.money("Valor Após Reajuste", fee.total_after_adjustment);
        }
        rows.text("Fundo de Reserva", fee.reserve_fund_rate.as_deref())
            .into_block(&mut blocks, "Cota Condominial");
    }

    if let Some(resolutions) = &data.resolutions {
        if let Some(summary) = non_empty(&resolutions.ordinary_summary) {
            blocks.push(Block::Subheading("Deliberações AGO".into()));
            blocks.push(Block::Callout {
                tone: Tone::Neutral,
                text: summary.to_string(),
            });
        }
        if let Some(summary) = non_empty(&resolutions.extraordinary_summary) {
            blocks.push(Block::Subheading("Deliberações AGE".into()));
            blocks.push(Block::Callout {
                tone: Tone::Neutral,
                text: summary.to_string(),
            });
        }
    }

    blocks
}

fn financial_blocks(data: &FinancialData) -> Vec<Block> {
    let mut blocks = vec![Block::Subheading("Posição Financeira".into())];

    if let Some(period) = non_empty(&data.period_label) {
        blocks.push(Block::Paragraph(format!("Período: {period}")));
    }

    match data.position.as_ref().filter(|p| p.has_accounts()) {
        Some(position) => {
            let mut rows: Vec<(String, String)> = position
                .accounts
                .iter()
                .flatten()
                .map(|a| (a.name.clone().unwrap_or_default(), format_currency(a.balance)))
                .collect();
            rows.push(("Total Geral".into(), format_currency(position.grand_total)));
            blocks.push(Block::Fields { rows, total: true });
        }
        None => {
            let rows = Rows::new()
                .money_if_truthy("Saldo em Conta", data.account_balance)
                .money_if_truthy("Fundo de Reserva", data.reserve_fund)
                .money_if_truthy("Total Disponível", data.total_available);
            if !rows.0.is_empty() {
                blocks.push(Block::Fields {
                    rows: rows.0,
                    total: false,
                });
            }
        }
    }

    if let Some(movement) = &data.movement {
        blocks.push(Block::Subheading("Movimento do Período".into()));
        blocks.push(Block::Fields {
            rows: Rows::new()
                .money("Total de Receitas", movement.total_revenue)
                .money("Total de Despesas", movement.total_expenses)
                .0,
            total: false,
        });
        let surplus = movement.result_kind == Some(ResultKind::Surplus);
        let amount = movement.result.map(f64::abs);
        blocks.push(Block::Callout {
            tone: if surplus { Tone::Success } else { Tone::Alert },
            text: format!(
                "Resultado: {} de {}",
                if surplus { "Superávit" } else { "Déficit" },
                format_currency(amount)
            ),
        });
    }

    if let Some(utilities) = &data.utility_costs {
        let rows = Rows::new()
            .money_if_positive("Água e Esgoto", utilities.water_sewage)
            .money_if_positive("Energia Elétrica", utilities.electricity)
            .money_if_positive("Gás", utilities.gas)
            .money_if_positive("Outros", utilities.other)
            .money("Total Consumo e Utilidades", utilities.total);
        blocks.push(Block::Subheading("Consumo e Utilidades".into()));
        blocks.push(Block::Fields {
            rows: rows.0,
            total: true,
        });
    }

    if let Some(bars) = expense_bars(data) {
        blocks.push(Block::Subheading("Despesas por Categoria".into()));
        blocks.push(Block::Bars(bars));
    }

    if let Some(table) = monthly_table(data) {
        blocks.push(Block::Subheading("Consumo Mensal".into()));
        blocks.push(table);
    }

    if let Some(delinquency) = &data.delinquency {
        blocks.push(Block::Subheading("Inadimplência".into()));
        let mut text = format!(
            "Total Inadimplente: {}",
            format_currency(delinquency.total_delinquent)
        );
        if let Some(rate) = delinquency.delinquency_rate.filter(|r| *r != 0.0) {
            text.push_str(&format!(" ({}%)", format_number(rate)));
        }
        blocks.push(Block::Callout {
            tone: Tone::Alert,
            text,
        });
        if let Some(units) = delinquency.units.as_ref().filter(|u| !u.is_empty()) {
            blocks.push(Block::Table {
                header: vec!["Unidade".into(), "Valor".into()],
                rows: units
                    .iter()
                    .map(|u| {
                        vec![
                            u.unit.clone().unwrap_or_default(),
                            format_currency(u.amount_due),
                        ]
                    })
                    .collect(),
            });
        }
    }

    blocks
}

/// Positive expense categories, largest first, scaled to the largest.
fn expense_bars(data: &FinancialData) -> Option<Vec<Bar>> {
    let mut expenses: Vec<(String, f64)> = data
        .expenses_by_category
        .iter()
        .flatten()
        .filter_map(|e| {
            let amount = e.amount.filter(|a| *a > 0.0)?;
            Some((e.category.clone().unwrap_or_default(), amount))
        })
        .collect();
    if expenses.is_empty() {
        return None;
    }
    expenses.sort_by(|a, b| b.1.total_cmp(&a.1));
    expenses.truncate(MAX_EXPENSE_BARS);

    let max = expenses[0].1;
    Some(
        expenses
            .into_iter()
            .map(|(label, amount)| Bar {
                label,
                amount,
                percent: (amount / max * 100.0).clamp(0.0, 100.0),
            })
            .collect(),
    )
}

/// Month-by-month table for water, energy and gas, months in calendar order.
fn monthly_table(data: &FinancialData) -> Option<Block> {
    let consumption = data.monthly_consumption.as_ref()?;
    let series: Vec<(&str, &Vec<MonthlyValue>)> = [
        ("Água", consumption.water.as_ref()),
        ("Energia", consumption.energy.as_ref()),
        ("Gás", consumption.gas.as_ref()),
    ]
    .into_iter()
    .filter_map(|(label, values)| values.filter(|v| !v.is_empty()).map(|v| (label, v)))
    .collect();
    if series.is_empty() {
        return None;
    }

    let rows: Vec<Vec<String>> = MONTH_ORDER
        .iter()
        .copied()
        .filter(|month| series.iter().any(|(_, values)| month_value(values, month).is_some()))
        .map(|month| {
            let mut row = vec![month.to_string()];
            row.extend(series.iter().map(|(_, values)| match month_value(values, month) {
                Some(v) => format_currency(Some(v)),
                None => "-".to_string(),
            }));
            row
        })
        .collect();
    if rows.is_empty() {
        return None;
    }

    let mut header = vec!["Mês".to_string()];
    header.extend(series.iter().map(|(label, _)| label.to_string()));
    Some(Block::Table { header, rows })
}

fn month_value(values: &[MonthlyValue], month: &str) -> Option<f64> {
    values
        .iter()
        .find(|v| v.month.as_deref().is_some_and(|m| m.trim().eq_ignore_ascii_case(month)))
        .and_then(|v| v.value)
}

/// `None` when there is no certificate to show.
fn certificate_blocks(data: &CertificatesData) -> Option<Vec<Block>> {
    let certificates = data.certificates.as_ref().filter(|c| !c.is_empty())?;
    let mut blocks = Vec::new();
    for cert in certificates {
        let attention = cert.status.is_some_and(|s| s.needs_attention());
        blocks.push(Block::Subheading(
            cert.kind.clone().unwrap_or_else(|| "Certidão".into()),
        ));
        let rows = Rows::new()
            .text("Situação", cert.status.map(|s| capitalize(s.as_str())).as_deref())
            .text("Validade", cert.valid_until.as_deref());
        if !rows.0.is_empty() {
            blocks.push(Block::Fields {
                rows: rows.0,
                total: false,
            });
        }
        if let Some(note) = non_empty(&cert.note) {
            blocks.push(Block::Callout {
                tone: if attention { Tone::Alert } else { Tone::Neutral },
                text: format!("Observação: {note}"),
            });
        } else if attention {
            blocks.push(Block::Callout {
                tone: Tone::Alert,
                text: "Certidão positiva: verificar pendências.".into(),
            });
        }
    }
    Some(blocks)
}

fn personnel_blocks(data: &PersonnelData) -> Vec<Block> {
    let own_staff = data.has_own_staff.unwrap_or(false);
    let mut blocks = vec![Block::Callout {
        tone: Tone::Neutral,
        text: if own_staff {
            "O condomínio possui funcionários próprios.".into()
        } else {
            "O condomínio não possui funcionários próprios.".into()
        },
    }];

    if let Some(employees) = data.employees.as_ref().filter(|e| !e.is_empty()) {
        blocks.push(Block::Subheading("Quadro de Funcionários".into()));
        blocks.push(Block::Table {
            header: vec![
                "Nome".into(),
                "Cargo".into(),
                "Salário".into(),
                "Horas Extras".into(),
            ],
            rows: employees
                .iter()
                .map(|e| {
                    vec![
                        e.name.clone().unwrap_or_default(),
                        e.role.clone().unwrap_or_default(),
                        format_currency(e.salary),
                        e.overtime_hours
                            .filter(|h| *h != 0.0)
                            .map(format_number)
                            .unwrap_or_else(|| "-".into()),
                    ]
                })
                .collect(),
        });
    }

    if data.payroll_cost.is_some() {
        blocks.push(Block::Fields {
            rows: Rows::new().money("Custo Total da Folha", data.payroll_cost).0,
            total: true,
        });
    }
    blocks
}

fn legal_blocks(data: &LegalData) -> Vec<Block> {
    let lawsuits = data.lawsuits.as_deref().unwrap_or_default();
    if lawsuits.is_empty() {
        return vec![Block::Callout {
            tone: Tone::Success,
            text: "Nenhum processo judicial identificado.".into(),
        }];
    }

    let mut blocks = vec![Block::Callout {
        tone: Tone::Alert,
        text: format!("Foram identificados {} processo(s).", lawsuits.len()),
    }];
    for (i, lawsuit) in lawsuits.iter().enumerate() {
        blocks.push(Block::Subheading(format!("Processo {}", i + 1)));
        let claim = lawsuit.claim_value.map(|v| format_currency(Some(v)));
        blocks.push(Block::Fields {
            rows: Rows::new()
                .text("Número", lawsuit.case_id.as_deref())
                .text("Tipo", lawsuit.kind.as_deref())
                .text("Parte Contrária", lawsuit.opposing_party.as_deref())
                .text("Descrição", lawsuit.description.as_deref())
                .text("Status", lawsuit.status.as_deref())
                .text("Valor da Causa", claim.as_deref())
                .text("Observação", lawsuit.note.as_deref())
                .0,
            total: false,
        });
    }
    blocks
}

fn miscellaneous_blocks(data: &MiscellaneousData) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (i, doc) in data.documents.iter().flatten().enumerate() {
        let heading = non_empty(&doc.document_kind)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Documento {}", i + 1));
        blocks.push(Block::Subheading(heading));
        if let Some(title) = non_empty(&doc.title) {
            blocks.push(Block::Paragraph(title.to_string()));
        }
        if let Some(summary) = non_empty(&doc.summary) {
            blocks.push(Block::Paragraph(summary.to_string()));
        }
        if let Some(points) = doc.key_points.as_ref().filter(|p| !p.is_empty()) {
            blocks.push(Block::Paragraph("Itens Importantes:".into()));
            blocks.push(Block::Bullets(points.clone()));
        }
        if let Some(notes) = non_empty(&doc.notes) {
            blocks.push(Block::Callout {
                tone: Tone::Neutral,
                text: format!("Observação: {notes}"),
            });
        }
    }
    if blocks.is_empty() {
        blocks.push(Block::Paragraph("Nenhum documento adicional.".into()));
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> WelcomeReport {
        serde_json::from_value(value).unwrap()
    }

    fn numbers(sections: &[Section]) -> Vec<u8> {
        sections.iter().map(|s| s.number).collect()
    }

    #[test]
    fn numbering_is_fixed_and_absent_sections_skipped() {
        let sections = build_sections(&report(json!({
            "financeiro": {"periodoReferencia": "2024"},
            "juridico": {"processos": []}
        })));
        assert_eq!(numbers(&sections), vec![3, 6]);
        assert_eq!(sections[0].heading(), "3. SITUAÇÃO FINANCEIRA");
    }

    #[test]
    fn empty_certificate_list_has_no_section() {
        let sections = build_sections(&report(json!({"certidoes": {"certidoes": []}})));
        assert!(sections.is_empty());
    }

    #[test]
    fn expense_bars_sorted_and_scaled() {
        let sections = build_sections(&report(json!({"financeiro": {"despesasPorCategoria": [
            {"categoria": "Limpeza", "valor": 500},
            {"categoria": "Pessoal", "valor": 2000},
            {"categoria": "Zerada", "valor": 0}
        ]}})));
        let bars = sections[0]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Bars(bars) => Some(bars.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "Pessoal");
        assert_eq!(bars[0].percent, 100.0);
        assert_eq!(bars[1].percent, 25.0);
    }

    #[test]
    fn monthly_table_orders_calendar_months() {
        let sections = build_sections(&report(json!({"financeiro": {"consumoMensal": {
            "agua": [{"mes": "Mar", "valor": 30}, {"mes": "Jan", "valor": 10}],
            "energia": [{"mes": "Jan", "valor": 900}]
        }}})));
        let table = sections[0]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table { header, rows } => Some((header.clone(), rows.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.0, vec!["Mês", "Água", "Energia"]);
        assert_eq!(table.1[0], vec!["Jan", "R$ 10,00", "R$ 900,00"]);
        assert_eq!(table.1[1], vec!["Mar", "R$ 30,00", "-"]);
    }

    #[test]
    fn legacy_balances_used_without_accounts() {
        let sections = build_sections(&report(json!({"financeiro": {
            "saldoConta": 1500.5, "valorFundoReserva": 0
        }})));
        let fields = sections[0]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Fields { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(fields, vec![("Saldo em Conta".to_string(), "R$ 1.500,50".to_string())]);
    }

    #[test]
    fn deficit_result_is_an_alert() {
        let sections = build_sections(&report(json!({"financeiro": {"movimentoPeriodo": {
            "totalReceitas": 100, "totalDespesas": 150, "resultado": -50, "tipoResultado": "deficit"
        }}})));
        assert!(sections[0].blocks.contains(&Block::Callout {
            tone: Tone::Alert,
            text: "Resultado: Déficit de R$ 50,00".into(),
        }));
    }

    #[test]
    fn lawsuit_zero_claim_is_shown() {
        let sections = build_sections(&report(json!({"juridico": {"processos": [
            {"identificacao": "0001", "valorCausa": 0}
        ]}})));
        let Block::Fields { rows, .. } = &sections[0].blocks[2] else {
            panic!("expected fields");
        };
        assert!(rows.contains(&("Valor da Causa".to_string(), "R$ 0,00".to_string())));
    }

    #[test]
    fn greeting_falls_back_to_generic() {
        assert_eq!(greeting(&WelcomeReport::default()), "Prezado(a) Síndico(a),");
        let named = WelcomeReport {
            manager_name: "Ana".into(),
            ..WelcomeReport::default()
        };
        assert_eq!(greeting(&named), "Prezado(a) Ana,");
        assert_eq!(display_name(&named), "Condomínio");
    }

    #[test]
    fn council_lines_describe_participation() {
        let sections = build_sections(&report(json!({"atas": {"governanca": {"conselho": [
            {"nome": "Bruno", "unidade": "101", "tipoParticipacao": "suplente"},
            {"nome": "Carla", "presidente": true}
        ]}}})));
        let bullets = sections[0]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Bullets(items) => Some(items.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(bullets, vec!["Bruno - 101 (Suplente)", "Carla - Presidente"]);
    }
}
