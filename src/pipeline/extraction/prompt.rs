use crate::models::Category;

pub const EXTRACTION_PREAMBLE: &str = r#"
Você analisa documentos de condomínios para uma administradora que está
assumindo uma nova gestão. Sua ÚNICA tarefa é ler o documento anexado e
devolver os dados pedidos em JSON.

REGRAS:
1. Responda SOMENTE com um objeto JSON válido. Nada de markdown ou comentários.
2. Extraia apenas o que está escrito no documento. Não invente valores.
3. Campo ausente no documento: use null.
4. Valores monetários e quantidades são números puros: sem "R$", sem separador
   de milhar, ponto como separador decimal (ex: 1234.56).
5. Outros documentos da mesma seção serão combinados com este depois;
   extraia tudo o que este documento contém.
"#;

/// Appended when several documents are sent in one request.
pub const CONSOLIDATION_INSTRUCTION: &str =
    "Os documentos a seguir pertencem à mesma seção. Analise todos e consolide as informações em um único JSON:";

const CONVENTION_SHAPE: &str = r#"
Documento: CONVENÇÃO DO CONDOMÍNIO.

{
  "identificacao": {
    "nomeCondominio": "nome completo",
    "endereco": "endereço completo",
    "cnpj": "CNPJ ou null",
    "quantidadeUnidades": número,
    "quantidadeBlocos": número,
    "tipoCondominio": "residencial" | "comercial" | "misto",
    "areaEmpreendimento": "área do terreno, ex: 5.000 m²"
  },
  "estrutural": {
    "quantidadeBlocos": número,
    "quantidadeUnidades": número,
    "quantidadeAreasComuns": número,
    "areasComuns": ["cada área comum citada"],
    "descricaoFisica": "terreno, acessos, taludes e demais elementos físicos"
  },
  "regrasAssembleia": {
    "periodicidadeAGO": "texto",
    "prazoMinimoConvocacao": "texto",
    "intervaloChamadas": "intervalo entre primeira e segunda chamada",
    "quorumPrimeiraChamada": "texto",
    "quorumSegundaChamada": "texto",
    "quorumObrasNecessarias": "texto",
    "quorumAlteracaoConvencao": "texto"
  },
  "regrasFinanceiras": {
    "dataVencimentoCota": "texto",
    "percentualMultaAtraso": "texto",
    "percentualFundoReserva": "texto"
  }
}
"#;

const FINANCIAL_SHAPE: &str = r#"
Documento: FINANCEIRO (prestação de contas, balancete, demonstrativo do
realizado ou previsão orçamentária). A prestação de contas traz a posição
atual; o demonstrativo do realizado traz a série histórica mensal.

{
  "periodoReferencia": "ex: Janeiro/2024 ou Ano 2024",
  "posicaoFinanceira": {
    "contas": [{"nome": "conta ou fundo", "saldo": número}],
    "totalGeral": soma dos saldos
  },
  "saldoConta": número,
  "valorFundoReserva": número,
  "totalRecursosDisponiveis": número,
  "movimentoPeriodo": {
    "totalReceitas": número,
    "totalDespesas": número,
    "resultado": número (negativo em caso de déficit),
    "tipoResultado": "superavit" | "deficit"
  },
  "inadimplencia": {
    "totalInadimplente": número,
    "percentualInadimplencia": número,
    "unidadesInadimplentes": [{"unidade": "texto", "proprietario": "texto", "valorDevido": número, "mesesAtraso": número}]
  },
  "consumoMensal": {
    "agua": [{"mes": "Jan", "valor": número}],
    "energia": [{"mes": "Jan", "valor": número}],
    "gas": [{"mes": "Jan", "valor": número}]
  },
  "consumoUtilidades": {
    "aguaEsgoto": número,
    "energiaEletrica": número,
    "gas": número,
    "outros": número,
    "total": número
  },
  "despesasPorCategoria": [{"categoria": "nome como aparece no documento", "valor": número}]
}

Meses abreviados: Jan, Fev, Mar, Abr, Mai, Jun, Jul, Ago, Set, Out, Nov, Dez.
Concessionárias de água (COPASA, SABESP, CAESB) vão em "agua"; de energia
(CEMIG, CPFL, Enel) em "energia"; gás canalizado em "gas". Sem série mensal
no documento: "consumoMensal": null.
"#;

const MINUTES_SHAPE: &str = r#"
Documento: ATA DE ASSEMBLEIA (AGO ou AGE). Identifique o tipo pelo cabeçalho
e preencha apenas o resumo correspondente.

{
  "governanca": {
    "gestaoAtual": "ex: Gestão 2024/2025",
    "sindico": {"nome": "texto", "unidade": "texto", "periodoMandato": "texto"},
    "subsindico": {"nome": "texto", "unidade": "texto"},
    "conselho": [
      {"nome": "texto", "unidade": "texto", "tipoParticipacao": "efetivo" | "suplente", "presidente": true | false}
    ]
  },
  "cotaCondominial": {
    "existeCotaVigente": true | false,
    "valorTaxa": número,
    "existeReajusteAprovado": true | false,
    "percentualFundoReserva": "texto",
    "valorAdicionalFundoReserva": número,
    "valorTotalAposReajuste": número
  },
  "deliberacoes": {
    "resumoAGO": "principais deliberações, se AGO",
    "resumoAGE": "principais deliberações, se AGE"
  }
}
"#;

const CERTIFICATES_SHAPE: &str = r#"
Documento: CERTIDÕES (CND Federal, Estadual, Municipal, FGTS, CNDT, INSS,
Corpo de Bombeiros, AVCB, Habite-se). Liste cada certidão separadamente.

{
  "certidoes": [
    {
      "tipo": "nome da certidão",
      "situacao": "regular" | "negativa" | "positiva",
      "dataValidade": "DD/MM/AAAA",
      "observacao": "pendências encontradas, valores e se são anteriores à gestão atual"
    }
  ]
}

"negativa" significa sem débitos; "positiva" significa com pendências.
"#;

const PERSONNEL_SHAPE: &str = r#"
Documento: DEPARTAMENTO PESSOAL (folha de pagamento, relação de funcionários).

{
  "possuiFuncionariosProprios": true | false,
  "funcionarios": [
    {"nome": "texto", "cargo": "texto", "salario": número, "horasExtras": número}
  ],
  "custoTotalFolha": número
}

Sem funcionários próprios: "funcionarios": [].
"#;

const LEGAL_SHAPE: &str = r#"
Documento: JURÍDICO (relatório de processos, petições, certidões de objeto e pé).

{
  "processos": [
    {
      "identificacao": "número completo do processo",
      "tipo": "Cobrança, Trabalhista, Cível, Execução Fiscal...",
      "parteContraria": "texto",
      "descricao": "do que se trata",
      "status": "andamento atual",
      "valorCausa": número,
      "observacao": "texto"
    }
  ]
}

Sem processos: "processos": [].
"#;

const MISCELLANEOUS_SHAPE: &str = r#"
Documento: OUTROS (apólice de seguro, contrato, laudo técnico, orçamento ou
qualquer documento útil à gestão). Identifique o tipo.

{
  "documentos": [
    {
      "tipoDocumento": "ex: Apólice de Seguro, Contrato de Manutenção, Laudo Técnico",
      "titulo": "texto",
      "resumo": "duas ou três frases",
      "itensImportantes": ["vigência, valores, coberturas, partes, recomendações"],
      "observacoes": "pontos de atenção"
    }
  ]
}
"#;

fn shape_for(category: Category) -> &'static str {
    match category {
        Category::Convention => CONVENTION_SHAPE,
        Category::Financial => FINANCIAL_SHAPE,
        Category::Minutes => MINUTES_SHAPE,
        Category::Certificates => CERTIFICATES_SHAPE,
        Category::Personnel => PERSONNEL_SHAPE,
        Category::Legal => LEGAL_SHAPE,
        Category::Miscellaneous => MISCELLANEOUS_SHAPE,
    }
}

/// Full instruction text sent alongside a document of `category`.
pub fn build_extraction_prompt(category: Category) -> String {
    format!("{}\n{}", EXTRACTION_PREAMBLE.trim(), shape_for(category).trim_end())
}

/// Prompt for a multi-document request.
pub fn build_consolidation_prompt(category: Category) -> String {
    format!("{}\n\n{CONSOLIDATION_INSTRUCTION}", build_extraction_prompt(category))
}
