// src/services/lme_service.rs

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{AuditoriaRepository, LmeRepository},
    models::lme::{CotacaoLme, CotacaoRemota},
};

/// A consulta remota de cotações é uma caixa preta: ou vem a lista, ou
/// vem erro. O trait existe para os testes e para trocar o provedor sem
/// tocar no service.
#[async_trait]
pub trait ProvedorCotacao: Send + Sync {
    async fn buscar_cotacoes(&self) -> Result<Vec<CotacaoRemota>, AppError>;
}

/// Provedor HTTP real.
pub struct ProvedorCotacaoHttp {
    client: reqwest::Client,
    url: String,
}

impl ProvedorCotacaoHttp {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ProvedorCotacao for ProvedorCotacaoHttp {
    async fn buscar_cotacoes(&self) -> Result<Vec<CotacaoRemota>, AppError> {
        let resposta = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::CotacaoExterna(e.to_string()))?;

        if !resposta.status().is_success() {
            return Err(AppError::CotacaoExterna(format!(
                "provedor respondeu {}",
                resposta.status()
            )));
        }

        resposta
            .json::<Vec<CotacaoRemota>>()
            .await
            .map_err(|e| AppError::CotacaoExterna(e.to_string()))
    }
}

#[derive(Clone)]
pub struct LmeService {
    repo: LmeRepository,
    auditoria_repo: AuditoriaRepository,
    provedor: Arc<dyn ProvedorCotacao>,
}

impl LmeService {
    pub fn new(
        repo: LmeRepository,
        auditoria_repo: AuditoriaRepository,
        provedor: Arc<dyn ProvedorCotacao>,
    ) -> Self {
        Self {
            repo,
            auditoria_repo,
            provedor,
        }
    }

    /// Consulta o provedor e grava o snapshot no histórico. A chamada
    /// externa acontece fora da transação; só o resultado entra nela.
    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        ator: &str,
    ) -> Result<Vec<CotacaoLme>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let remotas = self.provedor.buscar_cotacoes().await?;

        let mut tx = executor.begin().await?;

        let mut gravadas = Vec::with_capacity(remotas.len());
        for cotacao in &remotas {
            gravadas.push(
                self.repo
                    .inserir(
                        &mut *tx,
                        &cotacao.metal,
                        cotacao.preco_usd,
                        cotacao.variacao_pct,
                        cotacao.data,
                    )
                    .await?,
            );
        }

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "atualizar",
                "cotacao_lme",
                None,
                json!({ "cotacoes": gravadas.len() }),
            )
            .await?;

        tx.commit().await?;

        tracing::info!("Cotações LME atualizadas: {} metais", gravadas.len());
        Ok(gravadas)
    }

    pub async fn historico<'e, E>(
        &self,
        executor: E,
        metal: Option<&str>,
        limite: i64,
    ) -> Result<Vec<CotacaoLme>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar_historico(executor, metal, limite).await
    }

    pub async fn ultimas<'e, E>(&self, executor: E) -> Result<Vec<CotacaoLme>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.ultimas(executor).await
    }
}
