// src/db/configuracao_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::configuracao::ConfiguracaoGlobal};

#[derive(Clone)]
pub struct ConfiguracaoRepository {
    pool: PgPool,
}

impl ConfiguracaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A linha única é semeada pela migração; se alguém a removeu na mão,
    /// devolvemos 404 em vez de quebrar com 500.
    pub async fn obter<'e, E>(&self, executor: E) -> Result<ConfiguracaoGlobal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ConfiguracaoGlobal>("SELECT * FROM configuracoes WHERE id = 1")
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::NaoEncontrado("Configuração global"))
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        taxa_financeira_pct: Decimal,
        proprietario_casa_id: Option<Uuid>,
    ) -> Result<ConfiguracaoGlobal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let configuracao = sqlx::query_as::<_, ConfiguracaoGlobal>(
            r#"
            UPDATE configuracoes
            SET taxa_financeira_pct = $1,
                proprietario_casa_id = $2,
                updated_at = NOW()
            WHERE id = 1
            RETURNING *
            "#,
        )
        .bind(taxa_financeira_pct)
        .bind(proprietario_casa_id)
        .fetch_one(executor)
        .await?;

        Ok(configuracao)
    }
}
