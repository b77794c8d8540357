// src/services/dashboard_service.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{AcertoPendentePorProprietario, EstoquePorProduto, ResumoDashboard},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn resumo<'e, E>(&self, executor: E) -> Result<ResumoDashboard, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        self.repo.resumo(executor).await
    }

    pub async fn estoque_por_produto<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<EstoquePorProduto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.estoque_por_produto(executor).await
    }

    pub async fn acertos_pendentes_por_proprietario<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<AcertoPendentePorProprietario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.acertos_pendentes_por_proprietario(executor).await
    }
}
