// src/domain/custos.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::consolidacao::{GrupoDocumento, GrupoProduto};

#[derive(Debug, Error, PartialEq)]
pub enum ErroRateio {
    #[error("Peso real de saída deve ser maior que zero")]
    PesoRealInvalido,

    #[error("Não há insumos com peso para ratear")]
    SemInsumos,
}

/// Tarifas por kg digitadas na criação do beneficiamento.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TarifasBeneficiamento {
    #[serde(default)]
    pub frete_entrada_por_kg: Decimal,
    #[serde(default)]
    pub frete_saida_por_kg: Decimal,
    #[serde(default)]
    pub mao_obra_terceiro_por_kg: Decimal,
    #[serde(default)]
    pub mao_obra_propria_por_kg: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoCustos {
    pub peso_entrada: Decimal,
    pub peso_estimado_saida: Decimal,
    pub custo_frete_entrada: Decimal,
    pub custo_frete_saida: Decimal,
    pub custo_mao_obra_terceiro: Decimal,
    pub custo_mao_obra_propria: Decimal,
    pub custo_operacional: Decimal,
    pub custo_financeiro: Decimal,
    pub custo_total: Decimal,
    pub perda_padrao_media_pct: Decimal,
    pub perda_cobrada_media_pct: Decimal,
    pub lucro_sobre_perda_pct: Decimal,
}

/// Média ponderada `Σ(pct * peso) / Σ(peso)`, com resultado zero quando o
/// peso total é zero.
pub fn media_ponderada<I>(pares: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    let mut soma_ponderada = Decimal::ZERO;
    let mut soma_pesos = Decimal::ZERO;

    for (pct, peso) in pares {
        soma_ponderada += pct * peso;
        soma_pesos += peso;
    }

    if soma_pesos == Decimal::ZERO {
        Decimal::ZERO
    } else {
        soma_ponderada / soma_pesos
    }
}

/// Distribui frete, mão de obra e financiamento sobre os grupos
/// consolidados.
///
/// Frete de entrada e mão de obra incidem sobre o peso ANTES da perda; o
/// frete de saída incide sobre o peso estimado APÓS a perda: a carga de
/// retorno viaja mais leve. O encargo financeiro entra uma vez por
/// documento, já calculado na consolidação.
pub fn calcular_custos(
    grupos: &[GrupoProduto],
    documentos: &[GrupoDocumento],
    tarifas: &TarifasBeneficiamento,
) -> ResumoCustos {
    let peso_entrada: Decimal = grupos.iter().map(|g| g.peso_total).sum();
    let peso_estimado_saida: Decimal = grupos.iter().map(|g| g.peso_estimado_saida).sum();

    let custo_frete_entrada = tarifas.frete_entrada_por_kg * peso_entrada;
    let custo_frete_saida = tarifas.frete_saida_por_kg * peso_estimado_saida;
    let custo_mao_obra_terceiro = tarifas.mao_obra_terceiro_por_kg * peso_entrada;
    let custo_mao_obra_propria = tarifas.mao_obra_propria_por_kg * peso_entrada;

    let custo_operacional = custo_frete_entrada
        + custo_frete_saida
        + custo_mao_obra_terceiro
        + custo_mao_obra_propria;
    let custo_financeiro: Decimal = documentos.iter().map(|d| d.encargo_financeiro).sum();
    let custo_total = custo_operacional + custo_financeiro;

    let perda_padrao_media_pct =
        media_ponderada(grupos.iter().map(|g| (g.perda_padrao_pct, g.peso_total)));
    let perda_cobrada_media_pct =
        media_ponderada(grupos.iter().map(|g| (g.perda_cobrada_pct, g.peso_total)));

    ResumoCustos {
        peso_entrada,
        peso_estimado_saida,
        custo_frete_entrada,
        custo_frete_saida,
        custo_mao_obra_terceiro,
        custo_mao_obra_propria,
        custo_operacional,
        custo_financeiro,
        custo_total,
        perda_padrao_media_pct,
        perda_cobrada_media_pct,
        // Positivo quando a empresa cobra do dono mais perda do que espera
        // tecnicamente, retendo a diferença como margem.
        lucro_sobre_perda_pct: perda_cobrada_media_pct - perda_padrao_media_pct,
    }
}

/// Insumo de um beneficiamento, como gravado na criação da operação.
#[derive(Debug, Clone)]
pub struct InsumoRateio {
    pub sublote_id: Uuid,
    pub peso: Decimal,
    pub custo_unitario_original: Decimal,
}

/// Lote de saída derivado na finalização.
#[derive(Debug, Clone, PartialEq)]
pub struct LoteDerivado {
    pub sublote_origem_id: Uuid,
    pub peso: Decimal,
    pub custo_unitario: Decimal,
}

/// Rederivação da finalização: cada insumo origina um lote de saída com
/// peso proporcional ao peso real apurado e custo unitário
/// `custo_original + custo_total / peso_real`.
pub fn ratear_finalizacao(
    insumos: &[InsumoRateio],
    custo_total: Decimal,
    peso_real_saida: Decimal,
) -> Result<Vec<LoteDerivado>, ErroRateio> {
    if peso_real_saida <= Decimal::ZERO {
        return Err(ErroRateio::PesoRealInvalido);
    }

    let peso_insumos: Decimal = insumos.iter().map(|i| i.peso).sum();
    if peso_insumos <= Decimal::ZERO {
        return Err(ErroRateio::SemInsumos);
    }

    let acrescimo_por_kg = custo_total / peso_real_saida;

    Ok(insumos
        .iter()
        .map(|insumo| LoteDerivado {
            sublote_origem_id: insumo.sublote_id,
            peso: insumo.peso / peso_insumos * peso_real_saida,
            custo_unitario: insumo.custo_unitario_original + acrescimo_por_kg,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn grupo(codigo: &str, peso: Decimal, padrao: Decimal, cobrada: Decimal) -> GrupoProduto {
        GrupoProduto {
            codigo_produto: codigo.to_string(),
            peso_total: peso,
            sublote_ids: vec![],
            perda_padrao_pct: padrao,
            perda_cobrada_pct: cobrada,
            peso_estimado_saida: peso * (Decimal::ONE - cobrada / Decimal::ONE_HUNDRED),
        }
    }

    fn documento(valor: Decimal, encargo: Decimal) -> GrupoDocumento {
        GrupoDocumento {
            entrada_id: Uuid::new_v4(),
            valor_documento: valor,
            quantidade_sublotes: 1,
            encargo_financeiro: encargo,
        }
    }

    #[test]
    fn frete_de_saida_usa_peso_pos_perda() {
        let grupos = vec![grupo("CU-MIS", dec!(1000), dec!(0), dec!(10))];
        let tarifas = TarifasBeneficiamento {
            frete_entrada_por_kg: dec!(0.50),
            frete_saida_por_kg: dec!(0.50),
            ..Default::default()
        };

        let resumo = calcular_custos(&grupos, &[], &tarifas);

        assert_eq!(resumo.custo_frete_entrada, dec!(500.00));
        // 900 kg estimados na volta, não 1000.
        assert_eq!(resumo.custo_frete_saida, dec!(450.00));
        assert!(resumo.custo_frete_saida < dec!(0.50) * resumo.peso_entrada);
    }

    #[test]
    fn mao_de_obra_usa_peso_pre_perda() {
        let grupos = vec![grupo("CU-MIS", dec!(200), dec!(0), dec!(50))];
        let tarifas = TarifasBeneficiamento {
            mao_obra_terceiro_por_kg: dec!(1),
            mao_obra_propria_por_kg: dec!(2),
            ..Default::default()
        };

        let resumo = calcular_custos(&grupos, &[], &tarifas);

        assert_eq!(resumo.custo_mao_obra_terceiro, dec!(200));
        assert_eq!(resumo.custo_mao_obra_propria, dec!(400));
    }

    #[test]
    fn media_ponderada_guarda_divisao_por_zero() {
        assert_eq!(media_ponderada(vec![]), Decimal::ZERO);
        assert_eq!(
            media_ponderada(vec![(dec!(5), Decimal::ZERO), (dec!(10), Decimal::ZERO)]),
            Decimal::ZERO
        );
    }

    #[test]
    fn medias_e_lucro_sobre_perda() {
        let grupos = vec![
            grupo("CU-MIS", dec!(300), dec!(2), dec!(4)),
            grupo("AL-PER", dec!(100), dec!(6), dec!(8)),
        ];

        let resumo = calcular_custos(&grupos, &[], &TarifasBeneficiamento::default());

        // (2*300 + 6*100) / 400 = 3 ; (4*300 + 8*100) / 400 = 5
        assert_eq!(resumo.perda_padrao_media_pct, dec!(3));
        assert_eq!(resumo.perda_cobrada_media_pct, dec!(5));
        assert_eq!(resumo.lucro_sobre_perda_pct, dec!(2));
    }

    // Cenário ponta a ponta de material próprio: 1000 kg, perda cobrada 3%,
    // tarifas somando R$1,00/kg, financiamento 1,8% sobre documento de
    // R$50.000.
    #[test]
    fn cenario_material_proprio_ponta_a_ponta() {
        let grupos = vec![grupo("CU-MIS", dec!(1000), dec!(3), dec!(3))];
        let documentos = vec![documento(dec!(50000), dec!(900.00))];
        let tarifas = TarifasBeneficiamento {
            frete_entrada_por_kg: dec!(0.40),
            frete_saida_por_kg: Decimal::ZERO,
            mao_obra_terceiro_por_kg: dec!(0.35),
            mao_obra_propria_por_kg: dec!(0.25),
        };

        let resumo = calcular_custos(&grupos, &documentos, &tarifas);

        assert_eq!(resumo.peso_estimado_saida, dec!(970.00));
        assert_eq!(resumo.custo_operacional, dec!(1000.00));
        assert_eq!(resumo.custo_financeiro, dec!(900.00));
        assert_eq!(resumo.custo_total, dec!(1900.00));
    }

    #[test]
    fn rateio_distribui_peso_proporcional_e_custo_por_kg() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let insumos = vec![
            InsumoRateio {
                sublote_id: a,
                peso: dec!(600),
                custo_unitario_original: dec!(10),
            },
            InsumoRateio {
                sublote_id: b,
                peso: dec!(400),
                custo_unitario_original: dec!(8),
            },
        ];

        let derivados = ratear_finalizacao(&insumos, dec!(1900), dec!(950)).unwrap();

        // Proporção 60/40 sobre os 950 kg reais.
        assert_eq!(derivados[0].peso, dec!(570));
        assert_eq!(derivados[1].peso, dec!(380));
        // Acréscimo de 1900/950 = 2,00 por kg sobre o custo original.
        assert_eq!(derivados[0].custo_unitario, dec!(12));
        assert_eq!(derivados[1].custo_unitario, dec!(10));

        let soma: Decimal = derivados.iter().map(|d| d.peso).sum();
        assert_eq!(soma, dec!(950));
    }

    #[test]
    fn rateio_rejeita_peso_real_zero() {
        let insumos = vec![InsumoRateio {
            sublote_id: Uuid::new_v4(),
            peso: dec!(10),
            custo_unitario_original: dec!(1),
        }];

        assert_eq!(
            ratear_finalizacao(&insumos, dec!(100), Decimal::ZERO),
            Err(ErroRateio::PesoRealInvalido)
        );
        assert_eq!(
            ratear_finalizacao(&[], dec!(100), dec!(10)),
            Err(ErroRateio::SemInsumos)
        );
    }
}
