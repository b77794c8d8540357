// src/db/acerto_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::acerto::{AcertoFinanceiro, StatusAcerto, TipoAcerto},
};

#[derive(Clone)]
pub struct AcertoRepository {
    pool: PgPool,
}

impl AcertoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        saida_id: Option<Uuid>,
        proprietario_id: Option<Uuid>,
        tipo: TipoAcerto,
        status: StatusAcerto,
        valor: Decimal,
        descricao: &str,
        data_vencimento: NaiveDate,
    ) -> Result<AcertoFinanceiro, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let acerto = sqlx::query_as::<_, AcertoFinanceiro>(
            r#"
            INSERT INTO acertos_financeiros (
                saida_id, proprietario_id, tipo, status, valor, descricao, data_vencimento
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(saida_id)
        .bind(proprietario_id)
        .bind(tipo)
        .bind(status)
        .bind(valor)
        .bind(descricao)
        .bind(data_vencimento)
        .fetch_one(executor)
        .await?;

        Ok(acerto)
    }

    pub async fn buscar_por_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<AcertoFinanceiro>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let acerto = sqlx::query_as::<_, AcertoFinanceiro>(
            "SELECT * FROM acertos_financeiros WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(acerto)
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        status: Option<StatusAcerto>,
    ) -> Result<Vec<AcertoFinanceiro>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let acertos = sqlx::query_as::<_, AcertoFinanceiro>(
            r#"
            SELECT * FROM acertos_financeiros
            WHERE ($1::status_acerto IS NULL OR status = $1)
            ORDER BY data_vencimento ASC, created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(executor)
        .await?;

        Ok(acertos)
    }

    pub async fn listar_por_saida<'e, E>(
        &self,
        executor: E,
        saida_id: Uuid,
    ) -> Result<Vec<AcertoFinanceiro>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let acertos = sqlx::query_as::<_, AcertoFinanceiro>(
            "SELECT * FROM acertos_financeiros WHERE saida_id = $1",
        )
        .bind(saida_id)
        .fetch_all(executor)
        .await?;

        Ok(acertos)
    }

    pub async fn confirmar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<AcertoFinanceiro, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let acerto = sqlx::query_as::<_, AcertoFinanceiro>(
            r#"
            UPDATE acertos_financeiros
            SET status = 'confirmado', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(acerto)
    }

    pub async fn excluir_por_saida<'e, E>(
        &self,
        executor: E,
        saida_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM acertos_financeiros WHERE saida_id = $1")
            .bind(saida_id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
