// src/db/sublote_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sublote::{StatusSublote, Sublote, SubloteCatalogo, SubloteProcedencia},
};

#[derive(Clone)]
pub struct SubloteRepository {
    pool: PgPool,
}

impl SubloteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        codigo: &str,
        peso: Decimal,
        produto_id: Option<Uuid>,
        proprietario_id: Option<Uuid>,
        entrada_id: Uuid,
        custo_unitario: Decimal,
        sublote_pai_id: Option<Uuid>,
        beneficiamento_origem_id: Option<Uuid>,
    ) -> Result<Sublote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Sublote>(
            r#"
            INSERT INTO sublotes (
                codigo, peso, produto_id, proprietario_id, entrada_id,
                custo_unitario, sublote_pai_id, beneficiamento_origem_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(peso)
        .bind(produto_id)
        .bind(proprietario_id)
        .bind(entrada_id)
        .bind(custo_unitario)
        .bind(sublote_pai_id)
        .bind(beneficiamento_origem_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CodigoDuplicado(codigo.to_string());
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn buscar_por_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sublote = sqlx::query_as::<_, Sublote>("SELECT * FROM sublotes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(sublote)
    }

    pub async fn buscar_por_codigo<'e, E>(
        &self,
        executor: E,
        codigo: &str,
    ) -> Result<Option<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sublote = sqlx::query_as::<_, Sublote>("SELECT * FROM sublotes WHERE codigo = $1")
            .bind(codigo)
            .fetch_optional(executor)
            .await?;

        Ok(sublote)
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        status: Option<StatusSublote>,
    ) -> Result<Vec<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sublotes = sqlx::query_as::<_, Sublote>(
            r#"
            SELECT * FROM sublotes
            WHERE ($1::status_sublote IS NULL OR status = $1)
            ORDER BY codigo ASC
            "#,
        )
        .bind(status)
        .fetch_all(executor)
        .await?;

        Ok(sublotes)
    }

    pub async fn listar_por_ids<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sublotes =
            sqlx::query_as::<_, Sublote>("SELECT * FROM sublotes WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(executor)
                .await?;

        Ok(sublotes)
    }

    /// Catálogo para a consolidação: todos os sublotes ainda vivos (não
    /// consumidos/vendidos), com o código do produto resolvido.
    pub async fn listar_catalogo<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<SubloteCatalogo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let catalogo = sqlx::query_as::<_, SubloteCatalogo>(
            r#"
            SELECT
                s.id, s.codigo, s.peso,
                p.codigo AS codigo_produto,
                s.sublote_pai_id, s.entrada_id, s.status, s.custo_unitario
            FROM sublotes s
            LEFT JOIN produtos p ON p.id = s.produto_id
            WHERE s.status IN ('disponivel', 'reservado', 'em_beneficiamento')
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(catalogo)
    }

    /// Seleção de uma saída com os fatos de procedência resolvidos
    /// (documento gera custo? proprietário é a casa?).
    pub async fn listar_procedencia<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<SubloteProcedencia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sublotes = sqlx::query_as::<_, SubloteProcedencia>(
            r#"
            SELECT
                s.id, s.codigo, s.peso, s.custo_unitario, s.status,
                s.sublote_pai_id, s.proprietario_id,
                e.gera_custo,
                pr.eh_casa,
                pr.comissao_pct
            FROM sublotes s
            JOIN entradas e ON e.id = s.entrada_id
            LEFT JOIN proprietarios pr ON pr.id = s.proprietario_id
            WHERE s.id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;

        Ok(sublotes)
    }

    pub async fn buscar_filhos<'e, E>(
        &self,
        executor: E,
        sublote_pai_id: Uuid,
    ) -> Result<Vec<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filhos =
            sqlx::query_as::<_, Sublote>("SELECT * FROM sublotes WHERE sublote_pai_id = $1")
                .bind(sublote_pai_id)
                .fetch_all(executor)
                .await?;

        Ok(filhos)
    }

    pub async fn listar_derivados_de<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
    ) -> Result<Vec<Sublote>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let derivados = sqlx::query_as::<_, Sublote>(
            "SELECT * FROM sublotes WHERE beneficiamento_origem_id = $1",
        )
        .bind(beneficiamento_id)
        .fetch_all(executor)
        .await?;

        Ok(derivados)
    }

    pub async fn atualizar_status<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
        status: StatusSublote,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE sublotes SET status = $1, updated_at = NOW() WHERE id = ANY($2)")
            .bind(status)
            .bind(ids)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Consumo/venda zera o peso junto da troca de status; a restauração
    /// devolve o peso gravado no vínculo.
    pub async fn atualizar_status_e_peso<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: StatusSublote,
        peso: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE sublotes SET status = $1, peso = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(status)
        .bind(peso)
        .bind(id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn atualizar_pai<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        novo_pai: Option<Uuid>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE sublotes SET sublote_pai_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(novo_pai)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn excluir<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM sublotes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// O sublote aparece em alguma saída? Guarda de exclusão do
    /// beneficiamento de origem.
    pub async fn referenciado_em_saida<'e, E>(
        &self,
        executor: E,
        sublote_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM saida_sublotes WHERE sublote_id = $1)",
        )
        .bind(sublote_id)
        .fetch_one(executor)
        .await?;

        Ok(existe)
    }
}
