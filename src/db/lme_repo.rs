// src/db/lme_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::lme::CotacaoLme};

#[derive(Clone)]
pub struct LmeRepository {
    pool: PgPool,
}

impl LmeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        metal: &str,
        preco_usd: Decimal,
        variacao_pct: Option<Decimal>,
        data_cotacao: NaiveDate,
    ) -> Result<CotacaoLme, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cotacao = sqlx::query_as::<_, CotacaoLme>(
            r#"
            INSERT INTO cotacoes_lme (metal, preco_usd, variacao_pct, data_cotacao)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(metal)
        .bind(preco_usd)
        .bind(variacao_pct)
        .bind(data_cotacao)
        .fetch_one(executor)
        .await?;

        Ok(cotacao)
    }

    pub async fn listar_historico<'e, E>(
        &self,
        executor: E,
        metal: Option<&str>,
        limite: i64,
    ) -> Result<Vec<CotacaoLme>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cotacoes = sqlx::query_as::<_, CotacaoLme>(
            r#"
            SELECT * FROM cotacoes_lme
            WHERE ($1::text IS NULL OR metal = $1)
            ORDER BY data_cotacao DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(metal)
        .bind(limite)
        .fetch_all(executor)
        .await?;

        Ok(cotacoes)
    }

    /// Última cotação registrada de cada metal.
    pub async fn ultimas<'e, E>(&self, executor: E) -> Result<Vec<CotacaoLme>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cotacoes = sqlx::query_as::<_, CotacaoLme>(
            r#"
            SELECT DISTINCT ON (metal) *
            FROM cotacoes_lme
            ORDER BY metal, data_cotacao DESC, created_at DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(cotacoes)
    }
}
