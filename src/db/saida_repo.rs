// src/db/saida_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    domain::cenario::Cenario,
    models::saida::{Saida, SaidaSublote},
};

/// Campos calculados da liquidação, já prontos para persistir.
pub struct NovaSaida<'a> {
    pub codigo: &'a str,
    pub cenario: Cenario,
    pub cliente: Option<&'a str>,
    pub peso_total: Decimal,
    pub preco_unitario: Decimal,
    pub valor_bruto: Decimal,
    pub custo_beneficiamento: Decimal,
    pub custo_perda: Decimal,
    pub custos_adicionais: Decimal,
    pub custos_deduzidos: Decimal,
    pub comissao_pct: Option<Decimal>,
    pub valor_comissao: Option<Decimal>,
    pub valor_repasse: Option<Decimal>,
    pub observacoes: Option<&'a str>,
}

#[derive(Clone)]
pub struct SaidaRepository {
    pool: PgPool,
}

impl SaidaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        nova: &NovaSaida<'_>,
    ) -> Result<Saida, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let saida = sqlx::query_as::<_, Saida>(
            r#"
            INSERT INTO saidas (
                codigo, cenario, cliente, peso_total, preco_unitario, valor_bruto,
                custo_beneficiamento, custo_perda, custos_adicionais, custos_deduzidos,
                comissao_pct, valor_comissao, valor_repasse, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(nova.codigo)
        .bind(nova.cenario)
        .bind(nova.cliente)
        .bind(nova.peso_total)
        .bind(nova.preco_unitario)
        .bind(nova.valor_bruto)
        .bind(nova.custo_beneficiamento)
        .bind(nova.custo_perda)
        .bind(nova.custos_adicionais)
        .bind(nova.custos_deduzidos)
        .bind(nova.comissao_pct)
        .bind(nova.valor_comissao)
        .bind(nova.valor_repasse)
        .bind(nova.observacoes)
        .fetch_one(executor)
        .await?;

        Ok(saida)
    }

    pub async fn buscar_por_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Saida>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let saida = sqlx::query_as::<_, Saida>("SELECT * FROM saidas WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(saida)
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Saida>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let saidas =
            sqlx::query_as::<_, Saida>("SELECT * FROM saidas ORDER BY created_at DESC")
                .fetch_all(executor)
                .await?;

        Ok(saidas)
    }

    pub async fn inserir_sublote<'e, E>(
        &self,
        executor: E,
        saida_id: Uuid,
        sublote_id: Uuid,
        peso_vendido: Decimal,
    ) -> Result<SaidaSublote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vinculo = sqlx::query_as::<_, SaidaSublote>(
            r#"
            INSERT INTO saida_sublotes (saida_id, sublote_id, peso_vendido)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(saida_id)
        .bind(sublote_id)
        .bind(peso_vendido)
        .fetch_one(executor)
        .await?;

        Ok(vinculo)
    }

    pub async fn listar_sublotes<'e, E>(
        &self,
        executor: E,
        saida_id: Uuid,
    ) -> Result<Vec<SaidaSublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vinculos = sqlx::query_as::<_, SaidaSublote>(
            "SELECT * FROM saida_sublotes WHERE saida_id = $1",
        )
        .bind(saida_id)
        .fetch_all(executor)
        .await?;

        Ok(vinculos)
    }

    /// Vínculos caem em cascata.
    pub async fn excluir<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM saidas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn proximo_codigo<'e, E>(&self, executor: E) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sequencial = sqlx::query_scalar::<_, i64>("SELECT nextval('seq_saida_codigo')")
            .fetch_one(executor)
            .await?;

        Ok(format!("SAI-{sequencial:05}"))
    }
}
