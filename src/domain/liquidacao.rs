// src/domain/liquidacao.rs

use rust_decimal::Decimal;

use crate::domain::cenario::Cenario;
use crate::models::acerto::{StatusAcerto, TipoAcerto};

/// Entradas do cálculo de liquidação de uma saída já classificada.
#[derive(Debug, Clone)]
pub struct ParametrosLiquidacao {
    pub cenario: Cenario,
    pub peso: Decimal,
    pub preco_unitario: Decimal,
    /// Custo de beneficiamento embutido nos sublotes vendidos.
    pub custo_beneficiamento: Decimal,
    /// O tipo de saída repassa custos de beneficiamento?
    pub tipo_saida_cobra_custos: bool,
    pub custo_perda: Decimal,
    pub custos_adicionais: Decimal,
    /// Comissão do proprietário, usada apenas na operação de terceiro.
    pub comissao_pct: Decimal,
}

/// Lançamento financeiro que o service deve materializar.
#[derive(Debug, Clone, PartialEq)]
pub struct LancamentoPrevisto {
    pub tipo: TipoAcerto,
    pub status: StatusAcerto,
    pub valor: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultadoLiquidacao {
    pub valor_bruto: Decimal,
    pub custos_deduzidos: Decimal,
    /// Preenchido apenas no cenário de material próprio: consumo interno,
    /// nenhum lançamento cruza para terceiros.
    pub custo_final_casa: Option<Decimal>,
    pub valor_comissao: Option<Decimal>,
    pub valor_repasse: Option<Decimal>,
    pub lancamentos: Vec<LancamentoPrevisto>,
}

/// Calcula a liquidação do cenário classificado.
///
/// - material próprio: nenhum lançamento; o custo deduzido vira o custo
///   final da casa.
/// - industrialização: os custos deduzidos são receita de serviço da
///   empresa (lançamento confirmado); material e valor restante voltam ao
///   cliente, sem débito.
/// - operação de terceiro: comissão sobre (bruto - deduções) como receita
///   confirmada e o saldo como débito pendente ao proprietário.
pub fn liquidar(parametros: &ParametrosLiquidacao) -> ResultadoLiquidacao {
    let valor_bruto = (parametros.peso * parametros.preco_unitario).round_dp(2);

    let custo_beneficiamento = if parametros.tipo_saida_cobra_custos {
        parametros.custo_beneficiamento
    } else {
        Decimal::ZERO
    };
    let custos_deduzidos =
        parametros.custo_perda + parametros.custos_adicionais + custo_beneficiamento;

    match parametros.cenario {
        Cenario::MaterialProprio => ResultadoLiquidacao {
            valor_bruto,
            custos_deduzidos,
            custo_final_casa: Some(custos_deduzidos),
            valor_comissao: None,
            valor_repasse: None,
            lancamentos: vec![],
        },

        Cenario::Industrializacao => ResultadoLiquidacao {
            valor_bruto,
            custos_deduzidos,
            custo_final_casa: None,
            valor_comissao: None,
            valor_repasse: None,
            lancamentos: vec![LancamentoPrevisto {
                tipo: TipoAcerto::ReceitaEmpresa,
                status: StatusAcerto::Confirmado,
                valor: custos_deduzidos,
            }],
        },

        Cenario::OperacaoTerceiro => {
            let base = valor_bruto - custos_deduzidos;
            let comissao =
                (base * parametros.comissao_pct / Decimal::ONE_HUNDRED).round_dp(2);
            // O repasse é o saldo exato, preservando comissão + repasse ==
            // bruto - deduções mesmo após o arredondamento da comissão.
            let repasse = base - comissao;

            ResultadoLiquidacao {
                valor_bruto,
                custos_deduzidos,
                custo_final_casa: None,
                valor_comissao: Some(comissao),
                valor_repasse: Some(repasse),
                lancamentos: vec![
                    LancamentoPrevisto {
                        tipo: TipoAcerto::ReceitaEmpresa,
                        status: StatusAcerto::Confirmado,
                        valor: comissao,
                    },
                    LancamentoPrevisto {
                        tipo: TipoAcerto::DebitoProprietario,
                        status: StatusAcerto::Pendente,
                        valor: repasse,
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn parametros(cenario: Cenario) -> ParametrosLiquidacao {
        ParametrosLiquidacao {
            cenario,
            peso: dec!(1000),
            preco_unitario: dec!(10),
            custo_beneficiamento: dec!(500),
            tipo_saida_cobra_custos: true,
            custo_perda: dec!(300),
            custos_adicionais: dec!(200),
            comissao_pct: dec!(5),
        }
    }

    #[test]
    fn material_proprio_nao_gera_lancamento() {
        let resultado = liquidar(&parametros(Cenario::MaterialProprio));

        assert!(resultado.lancamentos.is_empty());
        assert_eq!(resultado.custo_final_casa, Some(dec!(1000)));
        assert_eq!(resultado.valor_comissao, None);
    }

    #[test]
    fn industrializacao_reconhece_custos_como_receita_confirmada() {
        let mut p = parametros(Cenario::Industrializacao);
        p.custo_beneficiamento = Decimal::ZERO;
        p.custo_perda = dec!(1200);
        p.custos_adicionais = Decimal::ZERO;

        let resultado = liquidar(&p);

        assert_eq!(resultado.lancamentos.len(), 1);
        assert_eq!(
            resultado.lancamentos[0],
            LancamentoPrevisto {
                tipo: TipoAcerto::ReceitaEmpresa,
                status: StatusAcerto::Confirmado,
                valor: dec!(1200),
            }
        );
    }

    #[test]
    fn tipo_de_saida_sem_repasse_nao_deduz_beneficiamento() {
        let mut p = parametros(Cenario::MaterialProprio);
        p.tipo_saida_cobra_custos = false;

        let resultado = liquidar(&p);

        assert_eq!(resultado.custos_deduzidos, dec!(500));
    }

    // Cenário ponta a ponta da operação de terceiro: bruto R$10.000,
    // deduções R$1.000, comissão 5%.
    #[test]
    fn operacao_terceiro_ponta_a_ponta() {
        let mut p = parametros(Cenario::OperacaoTerceiro);
        p.custo_beneficiamento = dec!(500);
        p.custo_perda = dec!(300);
        p.custos_adicionais = dec!(200);

        let resultado = liquidar(&p);

        assert_eq!(resultado.valor_bruto, dec!(10000.00));
        assert_eq!(resultado.custos_deduzidos, dec!(1000));
        assert_eq!(resultado.valor_comissao, Some(dec!(450.00)));
        assert_eq!(resultado.valor_repasse, Some(dec!(8550.00)));

        assert_eq!(resultado.lancamentos.len(), 2);
        assert_eq!(resultado.lancamentos[0].tipo, TipoAcerto::ReceitaEmpresa);
        assert_eq!(resultado.lancamentos[0].status, StatusAcerto::Confirmado);
        assert_eq!(resultado.lancamentos[1].tipo, TipoAcerto::DebitoProprietario);
        assert_eq!(resultado.lancamentos[1].status, StatusAcerto::Pendente);
    }

    proptest! {
        // Conservação de valor: comissão + repasse == bruto - deduções,
        // para qualquer combinação de entradas.
        #[test]
        fn comissao_mais_repasse_conserva_valor(
            peso in 1u32..100_000,
            preco_centavos in 1u32..1_000_000,
            deducao_centavos in 0u32..1_000_000,
            comissao_decimos in 0u32..1000,
        ) {
            let p = ParametrosLiquidacao {
                cenario: Cenario::OperacaoTerceiro,
                peso: Decimal::from(peso),
                preco_unitario: Decimal::new(preco_centavos as i64, 2),
                custo_beneficiamento: Decimal::ZERO,
                tipo_saida_cobra_custos: false,
                custo_perda: Decimal::new(deducao_centavos as i64, 2),
                custos_adicionais: Decimal::ZERO,
                comissao_pct: Decimal::new(comissao_decimos as i64, 1),
            };

            let resultado = liquidar(&p);
            let comissao = resultado.valor_comissao.unwrap();
            let repasse = resultado.valor_repasse.unwrap();

            prop_assert_eq!(
                comissao + repasse,
                resultado.valor_bruto - resultado.custos_deduzidos
            );
        }
    }
}
