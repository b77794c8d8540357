// src/services/catalogo_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::CatalogoRepository,
    models::catalogo::{Produto, Proprietario},
};

#[derive(Clone)]
pub struct CatalogoService {
    repo: CatalogoRepository,
}

impl CatalogoService {
    pub fn new(repo: CatalogoRepository) -> Self {
        Self { repo }
    }

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
        self.repo
            .criar_produto(executor, codigo, nome, perda_padrao_pct)
            .await
    }

    pub async fn listar_produtos<'e, E>(&self, executor: E) -> Result<Vec<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar_produtos(executor).await
    }

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
        self.repo
            .criar_proprietario(executor, nome, documento, eh_casa, comissao_pct)
            .await
    }

    pub async fn listar_proprietarios<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<Proprietario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar_proprietarios(executor).await
    }
}
