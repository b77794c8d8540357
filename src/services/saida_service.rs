// src/services/saida_service.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{saida_repo::NovaSaida, AcertoRepository, AuditoriaRepository, SaidaRepository, SubloteRepository},
    domain::cenario::{self, Cenario, ProcedenciaLote},
    domain::liquidacao::{self, ParametrosLiquidacao},
    models::acerto::{StatusAcerto, TipoAcerto},
    models::saida::{Saida, SaidaDetalhe},
    models::sublote::StatusSublote,
};

#[derive(Debug, Clone)]
pub struct ParametrosSaida {
    pub sublote_ids: Vec<Uuid>,
    pub preco_unitario: Decimal,
    pub custo_perda: Decimal,
    pub custos_adicionais: Decimal,
    /// O tipo de saída repassa os custos de beneficiamento embutidos?
    pub cobra_custos: bool,
    pub cliente: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Clone)]
pub struct SaidaService {
    repo: SaidaRepository,
    sublote_repo: SubloteRepository,
    acerto_repo: AcertoRepository,
    auditoria_repo: AuditoriaRepository,
}

impl SaidaService {
    pub fn new(
        repo: SaidaRepository,
        sublote_repo: SubloteRepository,
        acerto_repo: AcertoRepository,
        auditoria_repo: AuditoriaRepository,
    ) -> Self {
        Self {
            repo,
            sublote_repo,
            acerto_repo,
            auditoria_repo,
        }
    }

    /// Cria a saída: classifica a seleção (recusando procedências
    /// mistas), liquida o cenário e grava saída + vínculos + acertos em
    /// uma transação, vendendo os sublotes (peso zerado).
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        parametros: &ParametrosSaida,
    ) -> Result<SaidaDetalhe, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if parametros.sublote_ids.is_empty() {
            return Err(AppError::RegraDeNegocio(
                "Nenhum sublote selecionado para a saída".to_string(),
            ));
        }

        let mut tx = executor.begin().await?;

        let linhas = self
            .sublote_repo
            .listar_procedencia(&mut *tx, &parametros.sublote_ids)
            .await?;
        let por_id: HashMap<Uuid, _> = linhas.iter().map(|s| (s.id, s)).collect();

        // Preserva a ordem da seleção: o primeiro lote nomeia o cenário
        // nas mensagens de recusa.
        let mut selecionados = Vec::with_capacity(parametros.sublote_ids.len());
        for id in &parametros.sublote_ids {
            let sublote = por_id
                .get(id)
                .copied()
                .ok_or(AppError::NaoEncontrado("Sublote"))?;
            if sublote.status != StatusSublote::Disponivel {
                return Err(AppError::RegraDeNegocio(format!(
                    "Sublote {} não está disponível para venda",
                    sublote.codigo
                )));
            }
            // Sublote e pai na mesma saída contariam o peso duas vezes.
            if let Some(pai) = sublote.sublote_pai_id {
                if por_id.contains_key(&pai) {
                    return Err(AppError::RegraDeNegocio(format!(
                        "O sublote {} e seu pai não podem entrar na mesma saída",
                        sublote.codigo
                    )));
                }
            }
            selecionados.push(sublote);
        }

        let fatos: Vec<ProcedenciaLote> = selecionados
            .iter()
            .map(|s| ProcedenciaLote {
                gera_custo: s.gera_custo,
                proprietario_casa: s.eh_casa.unwrap_or(false),
                proprietario_id: s.proprietario_id,
            })
            .collect();
        let cenario = cenario::classificar_selecao(&fatos)?;

        // Na operação de terceiro o repasse vai para um único dono;
        // seleção com donos distintos não tem um credor bem definido.
        let proprietario_id = selecionados[0].proprietario_id;
        let comissao_pct = if cenario == Cenario::OperacaoTerceiro {
            if selecionados
                .iter()
                .any(|s| s.proprietario_id != proprietario_id)
            {
                return Err(AppError::RegraDeNegocio(
                    "Seleção reúne proprietários distintos; separe a saída por proprietário"
                        .to_string(),
                ));
            }
            selecionados[0].comissao_pct.unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        let peso_total: Decimal = selecionados.iter().map(|s| s.peso).sum();
        let custo_beneficiamento: Decimal = selecionados
            .iter()
            .map(|s| s.peso * s.custo_unitario)
            .sum::<Decimal>()
            .round_dp(2);

        let resultado = liquidacao::liquidar(&ParametrosLiquidacao {
            cenario,
            peso: peso_total,
            preco_unitario: parametros.preco_unitario,
            custo_beneficiamento,
            tipo_saida_cobra_custos: parametros.cobra_custos,
            custo_perda: parametros.custo_perda,
            custos_adicionais: parametros.custos_adicionais,
            comissao_pct,
        });

        let codigo = self.repo.proximo_codigo(&mut *tx).await?;
        let saida = self
            .repo
            .criar(
                &mut *tx,
                &NovaSaida {
                    codigo: &codigo,
                    cenario,
                    cliente: parametros.cliente.as_deref(),
                    peso_total,
                    preco_unitario: parametros.preco_unitario,
                    valor_bruto: resultado.valor_bruto,
                    custo_beneficiamento,
                    custo_perda: parametros.custo_perda,
                    custos_adicionais: parametros.custos_adicionais,
                    custos_deduzidos: resultado.custos_deduzidos,
                    comissao_pct: (cenario == Cenario::OperacaoTerceiro).then_some(comissao_pct),
                    valor_comissao: resultado.valor_comissao,
                    valor_repasse: resultado.valor_repasse,
                    observacoes: parametros.observacoes.as_deref(),
                },
            )
            .await?;

        let mut vinculos = Vec::with_capacity(selecionados.len());
        for sublote in &selecionados {
            vinculos.push(
                self.repo
                    .inserir_sublote(&mut *tx, saida.id, sublote.id, sublote.peso)
                    .await?,
            );
            self.sublote_repo
                .atualizar_status_e_peso(
                    &mut *tx,
                    sublote.id,
                    StatusSublote::Vendido,
                    Decimal::ZERO,
                )
                .await?;
        }

        // Lançamentos do cenário, vencimento no mesmo dia, sempre
        // rastreáveis à saída.
        let hoje = Utc::now().date_naive();
        for lancamento in &resultado.lancamentos {
            let (descricao, dono) = match lancamento.tipo {
                TipoAcerto::ReceitaEmpresa => {
                    (format!("Receita Saída {codigo}"), None)
                }
                TipoAcerto::DebitoProprietario => {
                    (format!("Repasse Saída {codigo}"), proprietario_id)
                }
            };

            self.acerto_repo
                .criar(
                    &mut *tx,
                    Some(saida.id),
                    dono,
                    lancamento.tipo,
                    lancamento.status,
                    lancamento.valor,
                    &descricao,
                    hoje,
                )
                .await?;
        }

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "criar",
                "saida",
                Some(saida.id),
                json!({
                    "codigo": codigo,
                    "cenario": cenario,
                    "pesoTotal": peso_total,
                    "valorBruto": resultado.valor_bruto,
                    "lancamentos": resultado.lancamentos.len(),
                }),
            )
            .await?;

        tx.commit().await?;

        Ok(SaidaDetalhe {
            saida,
            sublotes: vinculos,
        })
    }

    /// Exclui a saída restaurando os sublotes com o peso gravado no
    /// vínculo e removendo os acertos. Um repasse já confirmado (dinheiro
    /// que saiu) bloqueia a exclusão.
    pub async fn excluir<'e, E>(
        &self,
        executor: E,
        ator: &str,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let saida = self
            .repo
            .buscar_por_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Saída"))?;

        let acertos = self.acerto_repo.listar_por_saida(&mut *tx, id).await?;
        let repasse_confirmado = acertos.iter().any(|a| {
            a.tipo == TipoAcerto::DebitoProprietario && a.status == StatusAcerto::Confirmado
        });
        if repasse_confirmado {
            return Err(AppError::RegraDeNegocio(format!(
                "Saída {} tem repasse já confirmado e não pode ser excluída",
                saida.codigo
            )));
        }

        let vinculos = self.repo.listar_sublotes(&mut *tx, id).await?;
        for vinculo in &vinculos {
            self.sublote_repo
                .atualizar_status_e_peso(
                    &mut *tx,
                    vinculo.sublote_id,
                    StatusSublote::Disponivel,
                    vinculo.peso_vendido,
                )
                .await?;
        }

        self.acerto_repo.excluir_por_saida(&mut *tx, id).await?;
        self.repo.excluir(&mut *tx, id).await?;

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "excluir",
                "saida",
                Some(id),
                json!({
                    "codigo": saida.codigo,
                    "sublotesRestaurados": vinculos.len(),
                }),
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Saida>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar(executor).await
    }

    pub async fn detalhe<'e, E>(&self, executor: E, id: Uuid) -> Result<SaidaDetalhe, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let saida = self
            .repo
            .buscar_por_id(&mut *conn, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Saída"))?;
        let sublotes = self.repo.listar_sublotes(&mut *conn, id).await?;

        Ok(SaidaDetalhe { saida, sublotes })
    }
}
