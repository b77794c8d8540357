// src/db/entrada_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::entrada::Entrada};

#[derive(Clone)]
pub struct EntradaRepository {
    pool: PgPool,
}

impl EntradaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        numero: &str,
        proprietario_id: Option<Uuid>,
        valor_total: Decimal,
        gera_custo: bool,
        data_entrada: NaiveDate,
        observacoes: Option<&str>,
    ) -> Result<Entrada, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Entrada>(
            r#"
            INSERT INTO entradas (
                numero, proprietario_id, valor_total, gera_custo, data_entrada, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(numero)
        .bind(proprietario_id)
        .bind(valor_total)
        .bind(gera_custo)
        .bind(data_entrada)
        .bind(observacoes)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CodigoDuplicado(numero.to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Entrada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entradas = sqlx::query_as::<_, Entrada>(
            "SELECT * FROM entradas ORDER BY data_entrada DESC, numero DESC",
        )
        .fetch_all(executor)
        .await?;

        Ok(entradas)
    }

    pub async fn buscar_por_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Entrada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entrada = sqlx::query_as::<_, Entrada>("SELECT * FROM entradas WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(entrada)
    }

    pub async fn buscar_por_numero<'e, E>(
        &self,
        executor: E,
        numero: &str,
    ) -> Result<Option<Entrada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entrada = sqlx::query_as::<_, Entrada>("SELECT * FROM entradas WHERE numero = $1")
            .bind(numero)
            .fetch_optional(executor)
            .await?;

        Ok(entrada)
    }

    /// Valores dos documentos referenciados pela seleção, para a derivação
    /// do encargo financeiro.
    pub async fn listar_por_ids<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<Entrada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entradas =
            sqlx::query_as::<_, Entrada>("SELECT * FROM entradas WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(executor)
                .await?;

        Ok(entradas)
    }
}
