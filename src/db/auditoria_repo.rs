// src/db/auditoria_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auditoria::RegistroAuditoria};

#[derive(Clone)]
pub struct AuditoriaRepository {
    pool: PgPool,
}

impl AuditoriaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn registrar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        acao: &str,
        entidade: &str,
        entidade_id: Option<Uuid>,
        detalhes: serde_json::Value,
    ) -> Result<RegistroAuditoria, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registro = sqlx::query_as::<_, RegistroAuditoria>(
            r#"
            INSERT INTO registros_auditoria (ator, acao, entidade, entidade_id, detalhes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ator)
        .bind(acao)
        .bind(entidade)
        .bind(entidade_id)
        .bind(detalhes)
        .fetch_one(executor)
        .await?;

        Ok(registro)
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        entidade: Option<&str>,
        limite: i64,
    ) -> Result<Vec<RegistroAuditoria>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registros = sqlx::query_as::<_, RegistroAuditoria>(
            r#"
            SELECT * FROM registros_auditoria
            WHERE ($1::text IS NULL OR entidade = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(entidade)
        .bind(limite)
        .fetch_all(executor)
        .await?;

        Ok(registros)
    }
}
