// src/services/acerto_service.rs

use serde_json::json;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AcertoRepository, AuditoriaRepository},
    models::acerto::{AcertoFinanceiro, StatusAcerto},
};

#[derive(Clone)]
pub struct AcertoService {
    repo: AcertoRepository,
    auditoria_repo: AuditoriaRepository,
}

impl AcertoService {
    pub fn new(repo: AcertoRepository, auditoria_repo: AuditoriaRepository) -> Self {
        Self {
            repo,
            auditoria_repo,
        }
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        status: Option<StatusAcerto>,
    ) -> Result<Vec<AcertoFinanceiro>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar(executor, status).await
    }

    /// Confirma um acerto pendente (o repasse foi efetivamente pago).
    pub async fn confirmar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        id: Uuid,
    ) -> Result<AcertoFinanceiro, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let acerto = self
            .repo
            .buscar_por_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Acerto financeiro"))?;
        if acerto.status == StatusAcerto::Confirmado {
            return Err(AppError::RegraDeNegocio(
                "Acerto já está confirmado".to_string(),
            ));
        }

        let confirmado = self.repo.confirmar(&mut *tx, id).await?;

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "confirmar",
                "acerto_financeiro",
                Some(id),
                json!({ "valor": confirmado.valor, "descricao": confirmado.descricao }),
            )
            .await?;

        tx.commit().await?;
        Ok(confirmado)
    }
}
