// src/domain/cenario.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Cenário de liquidação de uma saída.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "cenario_saida", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Cenario {
    /// Material comprado/consignado pertencente à casa.
    MaterialProprio,
    /// Material de terceiro enviado apenas para beneficiar.
    Industrializacao,
    /// Material comprado/consignado de proprietário externo.
    OperacaoTerceiro,
}

impl std::fmt::Display for Cenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cenario::MaterialProprio => write!(f, "material_proprio"),
            Cenario::Industrializacao => write!(f, "industrializacao"),
            Cenario::OperacaoTerceiro => write!(f, "operacao_terceiro"),
        }
    }
}

/// Fatos de procedência de um sublote candidato à saída.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcedenciaLote {
    /// O documento de origem gera custo (compra/consignação)?
    pub gera_custo: bool,
    /// O proprietário é a entidade casa?
    pub proprietario_casa: bool,
    pub proprietario_id: Option<Uuid>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ErroClassificacao {
    #[error("Nenhum sublote selecionado para a saída")]
    SelecaoVazia,

    #[error(
        "Seleção mistura cenários distintos ({primeiro} e {divergente}); separe a saída por procedência"
    )]
    SelecaoMista {
        primeiro: Cenario,
        divergente: Cenario,
    },
}

/// Classificação de um único lote. Função total: todo lote cai em
/// exatamente um cenário, sem ambiguidade de ordem.
///
/// Industrialização prevalece sempre que o documento não gera custo,
/// independente do proprietário nominal. Proprietário nulo é tratado como
/// material da casa.
pub fn classificar(lote: &ProcedenciaLote) -> Cenario {
    if !lote.gera_custo {
        return Cenario::Industrializacao;
    }
    if lote.proprietario_id.is_none() || lote.proprietario_casa {
        return Cenario::MaterialProprio;
    }
    Cenario::OperacaoTerceiro
}

/// Classifica a seleção inteira. Seleções que misturam procedências são
/// rejeitadas em vez de herdar o cenário do primeiro lote.
pub fn classificar_selecao(lotes: &[ProcedenciaLote]) -> Result<Cenario, ErroClassificacao> {
    let Some(primeiro_lote) = lotes.first() else {
        return Err(ErroClassificacao::SelecaoVazia);
    };

    let primeiro = classificar(primeiro_lote);
    for lote in &lotes[1..] {
        let cenario = classificar(lote);
        if cenario != primeiro {
            return Err(ErroClassificacao::SelecaoMista {
                primeiro,
                divergente: cenario,
            });
        }
    }

    Ok(primeiro)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn procedencia(gera_custo: bool, casa: bool, dono: Option<Uuid>) -> ProcedenciaLote {
        ProcedenciaLote {
            gera_custo,
            proprietario_casa: casa,
            proprietario_id: dono,
        }
    }

    #[test]
    fn material_proprio_quando_gera_custo_e_dono_e_a_casa() {
        let dono = Uuid::new_v4();
        assert_eq!(
            classificar(&procedencia(true, true, Some(dono))),
            Cenario::MaterialProprio
        );
    }

    #[test]
    fn proprietario_nulo_e_tratado_como_casa() {
        assert_eq!(
            classificar(&procedencia(true, false, None)),
            Cenario::MaterialProprio
        );
    }

    #[test]
    fn industrializacao_prevalece_sem_gerar_custo() {
        let dono = Uuid::new_v4();
        // Mesmo com dono externo ou nulo, material de serviço é
        // industrialização.
        assert_eq!(
            classificar(&procedencia(false, false, Some(dono))),
            Cenario::Industrializacao
        );
        assert_eq!(
            classificar(&procedencia(false, true, None)),
            Cenario::Industrializacao
        );
    }

    #[test]
    fn terceiro_quando_gera_custo_e_dono_externo() {
        let dono = Uuid::new_v4();
        assert_eq!(
            classificar(&procedencia(true, false, Some(dono))),
            Cenario::OperacaoTerceiro
        );
    }

    #[test]
    fn selecao_mista_e_rejeitada() {
        let dono = Uuid::new_v4();
        let resultado = classificar_selecao(&[
            procedencia(true, false, Some(dono)),
            procedencia(false, false, Some(dono)),
        ]);

        assert_eq!(
            resultado,
            Err(ErroClassificacao::SelecaoMista {
                primeiro: Cenario::OperacaoTerceiro,
                divergente: Cenario::Industrializacao,
            })
        );
    }

    #[test]
    fn selecao_homogenea_classifica() {
        let resultado = classificar_selecao(&[
            procedencia(true, true, None),
            procedencia(true, false, None),
        ]);
        assert_eq!(resultado, Ok(Cenario::MaterialProprio));

        assert_eq!(
            classificar_selecao(&[]),
            Err(ErroClassificacao::SelecaoVazia)
        );
    }

    proptest! {
        // Classificação é total sobre o domínio dos fatos de procedência e
        // industrialização vence sempre que gera_custo é falso.
        #[test]
        fn classificacao_e_total(gera_custo: bool, casa: bool, tem_dono: bool) {
            let dono = tem_dono.then(Uuid::new_v4);
            let cenario = classificar(&procedencia(gera_custo, casa, dono));

            if !gera_custo {
                prop_assert_eq!(cenario, Cenario::Industrializacao);
            } else if !tem_dono || casa {
                prop_assert_eq!(cenario, Cenario::MaterialProprio);
            } else {
                prop_assert_eq!(cenario, Cenario::OperacaoTerceiro);
            }
        }
    }
}
