// src/db/catalogo_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalogo::{Produto, Proprietario},
};

#[derive(Clone)]
pub struct CatalogoRepository {
    pool: PgPool,
}

impl CatalogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PRODUTOS (tipos de material)
    // =========================================================================

    pub async fn criar_produto<'e, E>(
        &self,
        executor: E,
        codigo: &str,
        nome: &str,
        perda_padrao_pct: Decimal,
    ) -> Result<Produto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Produto>(
            r#"
            INSERT INTO produtos (codigo, nome, perda_padrao_pct)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(nome)
        .bind(perda_padrao_pct)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte violação de chave única em erro amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CodigoDuplicado(codigo.to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn listar_produtos<'e, E>(&self, executor: E) -> Result<Vec<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produtos =
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos ORDER BY codigo ASC")
                .fetch_all(executor)
                .await?;

        Ok(produtos)
    }

    pub async fn buscar_produto_por_nome<'e, E>(
        &self,
        executor: E,
        nome: &str,
    ) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produto =
            sqlx::query_as::<_, Produto>("SELECT * FROM produtos WHERE nome = $1")
                .bind(nome)
                .fetch_optional(executor)
                .await?;

        Ok(produto)
    }

    // =========================================================================
    //  PROPRIETÁRIOS
    // =========================================================================

    pub async fn criar_proprietario<'e, E>(
        &self,
        executor: E,
        nome: &str,
        documento: Option<&str>,
        eh_casa: bool,
        comissao_pct: Decimal,
    ) -> Result<Proprietario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Proprietario>(
            r#"
            INSERT INTO proprietarios (nome, documento, eh_casa, comissao_pct)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(documento)
        .bind(eh_casa)
        .bind(comissao_pct)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CodigoDuplicado(nome.to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn listar_proprietarios<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<Proprietario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proprietarios = sqlx::query_as::<_, Proprietario>(
            "SELECT * FROM proprietarios ORDER BY nome ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(proprietarios)
    }

    pub async fn buscar_proprietario_por_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Proprietario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proprietario =
            sqlx::query_as::<_, Proprietario>("SELECT * FROM proprietarios WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(proprietario)
    }

    pub async fn buscar_proprietario_por_nome<'e, E>(
        &self,
        executor: E,
        nome: &str,
    ) -> Result<Option<Proprietario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proprietario =
            sqlx::query_as::<_, Proprietario>("SELECT * FROM proprietarios WHERE nome = $1")
                .bind(nome)
                .fetch_optional(executor)
                .await?;

        Ok(proprietario)
    }
}
