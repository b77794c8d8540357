// src/domain/consolidacao.rs

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Chave sentinela para sublotes sem tipo de produto vinculado.
pub const CODIGO_SEM_PRODUTO: &str = "SEM-CODIGO";

#[derive(Debug, Error, PartialEq)]
pub enum ErroConsolidacao {
    #[error("Nenhum sublote selecionado")]
    SelecaoVazia,

    #[error("O sublote {filho} e seu pai {pai} não podem entrar na mesma operação")]
    PaiEFilhoSelecionados { pai: Uuid, filho: Uuid },

    #[error("Percentual de perda fora da faixa 0-100 para o produto {codigo_produto}: {valor}")]
    PercentualForaDaFaixa {
        codigo_produto: String,
        valor: Decimal,
    },
}

/// Visão mínima de um sublote do catálogo, suficiente para consolidar.
#[derive(Debug, Clone)]
pub struct LoteCatalogo {
    pub id: Uuid,
    pub codigo_produto: Option<String>,
    pub peso: Decimal,
    pub sublote_pai_id: Option<Uuid>,
    pub entrada_id: Uuid,
}

/// Percentuais informados pelo usuário para um código de produto.
/// Sem entrada no mapa, ambos valem zero: nesta etapa não existe default
/// automático vindo do cadastro do produto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PercentuaisPerda {
    #[serde(default)]
    pub perda_padrao_pct: Decimal,
    #[serde(default)]
    pub perda_cobrada_pct: Decimal,
}

/// Grupo consolidado por código de produto (efêmero, a persistência é
/// decisão do service).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoProduto {
    pub codigo_produto: String,
    pub peso_total: Decimal,
    pub sublote_ids: Vec<Uuid>,
    pub perda_padrao_pct: Decimal,
    pub perda_cobrada_pct: Decimal,
    pub peso_estimado_saida: Decimal,
}

/// Grupo consolidado por documento de entrada. O valor do documento entra
/// uma única vez, independente de quantos sublotes dele foram selecionados.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrupoDocumento {
    pub entrada_id: Uuid,
    pub valor_documento: Decimal,
    pub quantidade_sublotes: u32,
    pub encargo_financeiro: Decimal,
}

/// Índice de adjacência construído uma vez por passada (id -> lote,
/// id -> filhos), no lugar de varreduras lineares repetidas no catálogo.
pub struct IndiceCatalogo<'a> {
    por_id: HashMap<Uuid, &'a LoteCatalogo>,
    filhos: HashMap<Uuid, Vec<&'a LoteCatalogo>>,
}

impl<'a> IndiceCatalogo<'a> {
    pub fn construir(catalogo: &'a [LoteCatalogo]) -> Self {
        let mut por_id = HashMap::with_capacity(catalogo.len());
        let mut filhos: HashMap<Uuid, Vec<&'a LoteCatalogo>> = HashMap::new();

        for lote in catalogo {
            por_id.insert(lote.id, lote);
            if let Some(pai) = lote.sublote_pai_id {
                filhos.entry(pai).or_default().push(lote);
            }
        }

        Self { por_id, filhos }
    }

    pub fn lote(&self, id: Uuid) -> Option<&'a LoteCatalogo> {
        self.por_id.get(&id).copied()
    }

    pub fn filhos_de(&self, id: Uuid) -> &[&'a LoteCatalogo] {
        self.filhos.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Seleção precisa ser não vazia e um sublote não pode entrar junto com o
/// próprio pai (a árvore de rastreabilidade contaria o peso duas vezes).
pub fn validar_selecao(
    selecionados: &[Uuid],
    indice: &IndiceCatalogo<'_>,
) -> Result<(), ErroConsolidacao> {
    if selecionados.is_empty() {
        return Err(ErroConsolidacao::SelecaoVazia);
    }

    let conjunto: HashSet<Uuid> = selecionados.iter().copied().collect();
    for id in selecionados {
        if let Some(lote) = indice.lote(*id) {
            if let Some(pai) = lote.sublote_pai_id {
                if conjunto.contains(&pai) {
                    return Err(ErroConsolidacao::PaiEFilhoSelecionados { pai, filho: *id });
                }
            }
        }
    }

    Ok(())
}

/// Percentuais digitados fora de 0-100 são barrados antes de qualquer
/// cálculo.
pub fn validar_percentuais(
    perdas_por_produto: &HashMap<String, PercentuaisPerda>,
) -> Result<(), ErroConsolidacao> {
    for (codigo, percentuais) in perdas_por_produto {
        for valor in [percentuais.perda_padrao_pct, percentuais.perda_cobrada_pct] {
            if valor < Decimal::ZERO || valor > Decimal::ONE_HUNDRED {
                return Err(ErroConsolidacao::PercentualForaDaFaixa {
                    codigo_produto: codigo.clone(),
                    valor,
                });
            }
        }
    }
    Ok(())
}

/// Consolida a seleção por código de produto, na ordem em que cada código
/// aparece pela primeira vez.
///
/// Um lote pai consolida pelos pesos e códigos individuais dos filhos, não
/// pelo próprio peso agregado. Sublote selecionado que não existe no
/// catálogo é ignorado em silêncio.
pub fn consolidar_por_produto(
    selecionados: &[Uuid],
    indice: &IndiceCatalogo<'_>,
    perdas_por_produto: &HashMap<String, PercentuaisPerda>,
) -> Vec<GrupoProduto> {
    let mut ordem: Vec<String> = Vec::new();
    let mut acumulado: HashMap<String, (Decimal, Vec<Uuid>)> = HashMap::new();

    for id in selecionados {
        let Some(lote) = indice.lote(*id) else { continue };

        let filhos = indice.filhos_de(lote.id);
        let contribuintes: Vec<&LoteCatalogo> = if filhos.is_empty() {
            vec![lote]
        } else {
            filhos.to_vec()
        };

        for contribuinte in contribuintes {
            let codigo = contribuinte
                .codigo_produto
                .clone()
                .unwrap_or_else(|| CODIGO_SEM_PRODUTO.to_string());

            let entrada = acumulado.entry(codigo.clone()).or_insert_with(|| {
                ordem.push(codigo.clone());
                (Decimal::ZERO, Vec::new())
            });
            entrada.0 += contribuinte.peso;
            entrada.1.push(contribuinte.id);
        }
    }

    ordem
        .into_iter()
        .filter_map(|codigo| {
            let (peso_total, sublote_ids) = acumulado.remove(&codigo)?;
            let percentuais = perdas_por_produto.get(&codigo).copied().unwrap_or_default();
            let fator_aproveitamento =
                Decimal::ONE - percentuais.perda_cobrada_pct / Decimal::ONE_HUNDRED;

            Some(GrupoProduto {
                codigo_produto: codigo,
                peso_total,
                sublote_ids,
                perda_padrao_pct: percentuais.perda_padrao_pct,
                perda_cobrada_pct: percentuais.perda_cobrada_pct,
                peso_estimado_saida: peso_total * fator_aproveitamento,
            })
        })
        .collect()
}

/// Consolida a mesma seleção por documento de entrada e deriva o encargo
/// financeiro: `valor_documento * taxa / 100`, cobrado uma vez por
/// documento distinto.
pub fn consolidar_por_documento(
    selecionados: &[Uuid],
    indice: &IndiceCatalogo<'_>,
    valores_por_entrada: &HashMap<Uuid, Decimal>,
    taxa_financeira_pct: Decimal,
) -> Vec<GrupoDocumento> {
    let mut ordem: Vec<Uuid> = Vec::new();
    let mut contagem: HashMap<Uuid, u32> = HashMap::new();

    for id in selecionados {
        let Some(lote) = indice.lote(*id) else { continue };

        let quantidade = contagem.entry(lote.entrada_id).or_insert_with(|| {
            ordem.push(lote.entrada_id);
            0
        });
        *quantidade += 1;
    }

    ordem
        .into_iter()
        .filter_map(|entrada_id| {
            let quantidade_sublotes = contagem.remove(&entrada_id)?;
            let valor_documento = valores_por_entrada
                .get(&entrada_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let encargo_financeiro =
                (valor_documento * taxa_financeira_pct / Decimal::ONE_HUNDRED).round_dp(2);

            Some(GrupoDocumento {
                entrada_id,
                valor_documento,
                quantidade_sublotes,
                encargo_financeiro,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn lote(id: Uuid, codigo: Option<&str>, peso: Decimal, entrada: Uuid) -> LoteCatalogo {
        LoteCatalogo {
            id,
            codigo_produto: codigo.map(str::to_string),
            peso,
            sublote_pai_id: None,
            entrada_id: entrada,
        }
    }

    fn filho(
        id: Uuid,
        codigo: Option<&str>,
        peso: Decimal,
        pai: Uuid,
        entrada: Uuid,
    ) -> LoteCatalogo {
        LoteCatalogo {
            sublote_pai_id: Some(pai),
            ..lote(id, codigo, peso, entrada)
        }
    }

    #[test]
    fn agrupa_por_codigo_na_ordem_de_aparicao() {
        let entrada = Uuid::new_v4();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let catalogo = vec![
            lote(a, Some("CU-MIS"), dec!(100), entrada),
            lote(b, Some("AL-PER"), dec!(50), entrada),
            lote(c, Some("CU-MIS"), dec!(30), entrada),
        ];
        let indice = IndiceCatalogo::construir(&catalogo);

        let grupos = consolidar_por_produto(&[a, b, c], &indice, &HashMap::new());

        assert_eq!(grupos.len(), 2);
        assert_eq!(grupos[0].codigo_produto, "CU-MIS");
        assert_eq!(grupos[0].peso_total, dec!(130));
        assert_eq!(grupos[0].sublote_ids, vec![a, c]);
        assert_eq!(grupos[1].codigo_produto, "AL-PER");
        assert_eq!(grupos[1].peso_total, dec!(50));
    }

    #[test]
    fn pai_consolida_pelos_filhos() {
        let entrada = Uuid::new_v4();
        let pai = Uuid::new_v4();
        let (f1, f2) = (Uuid::new_v4(), Uuid::new_v4());
        let catalogo = vec![
            lote(pai, Some("SUC-MIX"), dec!(1000), entrada),
            filho(f1, Some("CU-MIS"), dec!(600), pai, entrada),
            filho(f2, Some("AL-PER"), dec!(350), pai, entrada),
        ];
        let indice = IndiceCatalogo::construir(&catalogo);

        let grupos = consolidar_por_produto(&[pai], &indice, &HashMap::new());

        // O peso agregado do pai (1000) não entra; valem os filhos.
        assert_eq!(grupos.len(), 2);
        assert_eq!(grupos[0].codigo_produto, "CU-MIS");
        assert_eq!(grupos[0].peso_total, dec!(600));
        assert_eq!(grupos[0].sublote_ids, vec![f1]);
        assert_eq!(grupos[1].peso_total, dec!(350));
    }

    #[test]
    fn sem_produto_cai_na_chave_sentinela() {
        let entrada = Uuid::new_v4();
        let a = Uuid::new_v4();
        let catalogo = vec![lote(a, None, dec!(25), entrada)];
        let indice = IndiceCatalogo::construir(&catalogo);

        let grupos = consolidar_por_produto(&[a], &indice, &HashMap::new());

        assert_eq!(grupos[0].codigo_produto, CODIGO_SEM_PRODUTO);
    }

    #[test]
    fn selecionado_fora_do_catalogo_e_ignorado() {
        let entrada = Uuid::new_v4();
        let a = Uuid::new_v4();
        let catalogo = vec![lote(a, Some("CU-MIS"), dec!(10), entrada)];
        let indice = IndiceCatalogo::construir(&catalogo);

        let grupos = consolidar_por_produto(&[a, Uuid::new_v4()], &indice, &HashMap::new());

        assert_eq!(grupos.len(), 1);
        assert_eq!(grupos[0].peso_total, dec!(10));
    }

    #[test]
    fn aplica_percentuais_informados_e_estima_saida() {
        let entrada = Uuid::new_v4();
        let a = Uuid::new_v4();
        let catalogo = vec![lote(a, Some("CU-MIS"), dec!(1000), entrada)];
        let indice = IndiceCatalogo::construir(&catalogo);
        let mut perdas = HashMap::new();
        perdas.insert(
            "CU-MIS".to_string(),
            PercentuaisPerda {
                perda_padrao_pct: dec!(2),
                perda_cobrada_pct: dec!(3),
            },
        );

        let grupos = consolidar_por_produto(&[a], &indice, &perdas);

        assert_eq!(grupos[0].perda_padrao_pct, dec!(2));
        assert_eq!(grupos[0].perda_cobrada_pct, dec!(3));
        assert_eq!(grupos[0].peso_estimado_saida, dec!(970));
    }

    #[test]
    fn sem_percentual_informado_assume_zero() {
        let entrada = Uuid::new_v4();
        let a = Uuid::new_v4();
        let catalogo = vec![lote(a, Some("CU-MIS"), dec!(500), entrada)];
        let indice = IndiceCatalogo::construir(&catalogo);

        let grupos = consolidar_por_produto(&[a], &indice, &HashMap::new());

        assert_eq!(grupos[0].perda_cobrada_pct, Decimal::ZERO);
        assert_eq!(grupos[0].peso_estimado_saida, dec!(500));
    }

    #[test]
    fn encargo_financeiro_conta_uma_vez_por_documento() {
        let (doc1, doc2) = (Uuid::new_v4(), Uuid::new_v4());
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let catalogo = vec![
            lote(a, Some("CU-MIS"), dec!(10), doc1),
            lote(b, Some("CU-MIS"), dec!(20), doc1),
            lote(c, Some("AL-PER"), dec!(30), doc2),
        ];
        let indice = IndiceCatalogo::construir(&catalogo);
        let mut valores = HashMap::new();
        valores.insert(doc1, dec!(50000));
        valores.insert(doc2, dec!(10000));

        let docs = consolidar_por_documento(&[a, b, c], &indice, &valores, dec!(1.8));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].entrada_id, doc1);
        assert_eq!(docs[0].quantidade_sublotes, 2);
        // 50.000 * 1,8% = 900, mesmo com dois sublotes do documento.
        assert_eq!(docs[0].encargo_financeiro, dec!(900.00));
        assert_eq!(docs[1].encargo_financeiro, dec!(180.00));
    }

    #[test]
    fn rejeita_pai_e_filho_na_mesma_selecao() {
        let entrada = Uuid::new_v4();
        let pai = Uuid::new_v4();
        let f = Uuid::new_v4();
        let catalogo = vec![
            lote(pai, Some("SUC-MIX"), dec!(100), entrada),
            filho(f, Some("CU-MIS"), dec!(60), pai, entrada),
        ];
        let indice = IndiceCatalogo::construir(&catalogo);

        assert_eq!(
            validar_selecao(&[pai, f], &indice),
            Err(ErroConsolidacao::PaiEFilhoSelecionados { pai, filho: f })
        );
        assert!(validar_selecao(&[pai], &indice).is_ok());
    }

    #[test]
    fn rejeita_selecao_vazia_e_percentual_fora_da_faixa() {
        let indice = IndiceCatalogo::construir(&[]);
        assert_eq!(
            validar_selecao(&[], &indice),
            Err(ErroConsolidacao::SelecaoVazia)
        );

        let mut perdas = HashMap::new();
        perdas.insert(
            "CU-MIS".to_string(),
            PercentuaisPerda {
                perda_padrao_pct: dec!(2),
                perda_cobrada_pct: dec!(101),
            },
        );
        assert!(matches!(
            validar_percentuais(&perdas),
            Err(ErroConsolidacao::PercentualForaDaFaixa { .. })
        ));

        let mut negativas = HashMap::new();
        negativas.insert(
            "CU-MIS".to_string(),
            PercentuaisPerda {
                perda_padrao_pct: dec!(-1),
                perda_cobrada_pct: Decimal::ZERO,
            },
        );
        assert!(validar_percentuais(&negativas).is_err());
    }

    proptest! {
        // Consolidação conserva peso: a soma dos grupos é a soma dos pesos
        // contribuintes da seleção.
        #[test]
        fn consolidacao_conserva_peso(pesos in proptest::collection::vec(0u32..1_000_000, 1..40)) {
            let entrada = Uuid::new_v4();
            let catalogo: Vec<LoteCatalogo> = pesos
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let codigo = format!("PROD-{}", i % 5);
                    lote(Uuid::new_v4(), Some(codigo.as_str()), Decimal::from(*p), entrada)
                })
                .collect();
            let selecionados: Vec<Uuid> = catalogo.iter().map(|l| l.id).collect();
            let indice = IndiceCatalogo::construir(&catalogo);

            let grupos = consolidar_por_produto(&selecionados, &indice, &HashMap::new());

            let soma_grupos: Decimal = grupos.iter().map(|g| g.peso_total).sum();
            let soma_selecao: Decimal = catalogo.iter().map(|l| l.peso).sum();
            prop_assert_eq!(soma_grupos, soma_selecao);

            let total_ids: usize = grupos.iter().map(|g| g.sublote_ids.len()).sum();
            prop_assert_eq!(total_ids, catalogo.len());
        }

        // O encargo de um documento independe de quantos sublotes dele
        // entram na seleção.
        #[test]
        fn encargo_nao_duplica_por_sublote(qtd_lotes in 1usize..30, valor in 1u32..10_000_000, taxa in 0u32..100) {
            let doc = Uuid::new_v4();
            let catalogo: Vec<LoteCatalogo> = (0..qtd_lotes)
                .map(|_| lote(Uuid::new_v4(), Some("CU-MIS"), dec!(1), doc))
                .collect();
            let selecionados: Vec<Uuid> = catalogo.iter().map(|l| l.id).collect();
            let indice = IndiceCatalogo::construir(&catalogo);
            let mut valores = HashMap::new();
            valores.insert(doc, Decimal::from(valor));

            let docs = consolidar_por_documento(&selecionados, &indice, &valores, Decimal::from(taxa));

            prop_assert_eq!(docs.len(), 1);
            prop_assert_eq!(docs[0].quantidade_sublotes as usize, qtd_lotes);
            let esperado = (Decimal::from(valor) * Decimal::from(taxa) / Decimal::ONE_HUNDRED).round_dp(2);
            prop_assert_eq!(docs[0].encargo_financeiro, esperado);
        }
    }
}
