// src/services/entrada_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditoriaRepository, EntradaRepository, SubloteRepository},
    models::entrada::Entrada,
    models::sublote::Sublote,
};

/// Sublote inicial criado junto com o documento de entrada.
#[derive(Debug, Clone)]
pub struct NovoSubloteEntrada {
    pub codigo: String,
    pub peso: Decimal,
    pub produto_id: Option<Uuid>,
    pub custo_unitario: Decimal,
}

#[derive(Clone)]
pub struct EntradaService {
    repo: EntradaRepository,
    sublote_repo: SubloteRepository,
    auditoria_repo: AuditoriaRepository,
}

impl EntradaService {
    pub fn new(
        repo: EntradaRepository,
        sublote_repo: SubloteRepository,
        auditoria_repo: AuditoriaRepository,
    ) -> Self {
        Self {
            repo,
            sublote_repo,
            auditoria_repo,
        }
    }

    /// Documento + sublotes iniciais em uma transação. Os sublotes herdam
    /// o proprietário do documento.
    #[allow(clippy::too_many_arguments)]
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        numero: &str,
        proprietario_id: Option<Uuid>,
        valor_total: Decimal,
        gera_custo: bool,
        data_entrada: NaiveDate,
        observacoes: Option<&str>,
        sublotes: &[NovoSubloteEntrada],
    ) -> Result<(Entrada, Vec<Sublote>), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let entrada = self
            .repo
            .criar(
                &mut *tx,
                numero,
                proprietario_id,
                valor_total,
                gera_custo,
                data_entrada,
                observacoes,
            )
            .await?;

        let mut criados = Vec::with_capacity(sublotes.len());
        for novo in sublotes {
            if novo.peso < Decimal::ZERO {
                return Err(AppError::RegraDeNegocio(format!(
                    "Peso negativo no sublote {}",
                    novo.codigo
                )));
            }

            criados.push(
                self.sublote_repo
                    .criar(
                        &mut *tx,
                        &novo.codigo,
                        novo.peso,
                        novo.produto_id,
                        proprietario_id,
                        entrada.id,
                        novo.custo_unitario,
                        None,
                        None,
                    )
                    .await?,
            );
        }

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "criar",
                "entrada",
                Some(entrada.id),
                json!({
                    "numero": numero,
                    "valorTotal": valor_total,
                    "geraCusto": gera_custo,
                    "sublotes": criados.len(),
                }),
            )
            .await?;

        tx.commit().await?;
        Ok((entrada, criados))
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Entrada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar(executor).await
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Entrada, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .buscar_por_id(executor, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Entrada"))
    }

    pub async fn listar_sublotes<'e, E>(
        &self,
        executor: E,
        status: Option<crate::models::sublote::StatusSublote>,
    ) -> Result<Vec<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.sublote_repo.listar(executor, status).await
    }

    pub async fn buscar_sublote<'e, E>(&self, executor: E, id: Uuid) -> Result<Sublote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.sublote_repo
            .buscar_por_id(executor, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Sublote"))
    }
}
