// src/services/configuracao_service.rs

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditoriaRepository, CatalogoRepository, ConfiguracaoRepository},
    models::configuracao::ConfiguracaoGlobal,
};

#[derive(Clone)]
pub struct ConfiguracaoService {
    repo: ConfiguracaoRepository,
    catalogo_repo: CatalogoRepository,
    auditoria_repo: AuditoriaRepository,
}

impl ConfiguracaoService {
    pub fn new(
        repo: ConfiguracaoRepository,
        catalogo_repo: CatalogoRepository,
        auditoria_repo: AuditoriaRepository,
    ) -> Self {
        Self {
            repo,
            catalogo_repo,
            auditoria_repo,
        }
    }

    pub async fn obter<'e, E>(&self, executor: E) -> Result<ConfiguracaoGlobal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.obter(executor).await
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        taxa_financeira_pct: Decimal,
        proprietario_casa_id: Option<Uuid>,
    ) -> Result<ConfiguracaoGlobal, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if taxa_financeira_pct < Decimal::ZERO || taxa_financeira_pct > Decimal::ONE_HUNDRED {
            return Err(AppError::RegraDeNegocio(
                "Taxa financeira deve estar entre 0 e 100".to_string(),
            ));
        }

        let mut tx = executor.begin().await?;

        if let Some(casa_id) = proprietario_casa_id {
            self.catalogo_repo
                .buscar_proprietario_por_id(&mut *tx, casa_id)
                .await?
                .ok_or(AppError::NaoEncontrado("Proprietário"))?;
        }

        let configuracao = self
            .repo
            .atualizar(&mut *tx, taxa_financeira_pct, proprietario_casa_id)
            .await?;

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "atualizar",
                "configuracao",
                None,
                json!({
                    "taxaFinanceiraPct": taxa_financeira_pct,
                    "proprietarioCasaId": proprietario_casa_id,
                }),
            )
            .await?;

        tx.commit().await?;
        Ok(configuracao)
    }
}
