// src/services/auditoria_service.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError, db::AuditoriaRepository, models::auditoria::RegistroAuditoria,
};

#[derive(Clone)]
pub struct AuditoriaService {
    repo: AuditoriaRepository,
}

impl AuditoriaService {
    pub fn new(repo: AuditoriaRepository) -> Self {
        Self { repo }
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
        self.repo.listar(executor, entidade, limite).await
    }
}
