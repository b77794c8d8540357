// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{AcertoPendentePorProprietario, EstoquePorProduto, ResumoDashboard},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo Geral
    pub async fn resumo<'e, E>(&self, executor: E) -> Result<ResumoDashboard, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Transação para um snapshot consistente dos números do painel
        let mut tx = executor.begin().await?;

        let peso_disponivel = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(peso) FROM sublotes WHERE status = 'disponivel'",
        )
        .fetch_one(&mut *tx)
        .await?
        .unwrap_or(Decimal::ZERO);

        let peso_em_beneficiamento = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(peso) FROM sublotes WHERE status = 'em_beneficiamento'",
        )
        .fetch_one(&mut *tx)
        .await?
        .unwrap_or(Decimal::ZERO);

        let beneficiamentos_em_andamento = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM beneficiamentos WHERE status = 'em_andamento'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let (acertos_pendentes_valor, acertos_pendentes_quantidade) =
            sqlx::query_as::<_, (Option<Decimal>, i64)>(
                "SELECT SUM(valor), COUNT(*) FROM acertos_financeiros WHERE status = 'pendente'",
            )
            .fetch_one(&mut *tx)
            .await?;

        let saidas_mes_valor = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(valor_bruto) FROM saidas
            WHERE date_trunc('month', created_at) = date_trunc('month', NOW())
            "#,
        )
        .fetch_one(&mut *tx)
        .await?
        .unwrap_or(Decimal::ZERO);

        tx.commit().await?;

        Ok(ResumoDashboard {
            peso_disponivel,
            peso_em_beneficiamento,
            beneficiamentos_em_andamento,
            acertos_pendentes_valor: acertos_pendentes_valor.unwrap_or(Decimal::ZERO),
            acertos_pendentes_quantidade,
            saidas_mes_valor,
        })
    }

    // 2. Estoque disponível por produto
    pub async fn estoque_por_produto<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<EstoquePorProduto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linhas = sqlx::query_as::<_, EstoquePorProduto>(
            r#"
            SELECT
                COALESCE(p.codigo, 'SEM-CODIGO') AS codigo_produto,
                COALESCE(p.nome, 'Sem produto')  AS nome_produto,
                COALESCE(SUM(s.peso), 0)         AS peso_total,
                COUNT(*)                         AS quantidade_sublotes
            FROM sublotes s
            LEFT JOIN produtos p ON p.id = s.produto_id
            WHERE s.status = 'disponivel'
            GROUP BY p.codigo, p.nome
            ORDER BY peso_total DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(linhas)
    }

    // 3. Saldo devedor pendente por proprietário
    pub async fn acertos_pendentes_por_proprietario<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<AcertoPendentePorProprietario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linhas = sqlx::query_as::<_, AcertoPendentePorProprietario>(
            r#"
            SELECT
                COALESCE(pr.nome, 'Sem proprietário') AS proprietario,
                COALESCE(SUM(a.valor), 0)             AS valor_pendente,
                COUNT(*)                              AS quantidade
            FROM acertos_financeiros a
            LEFT JOIN proprietarios pr ON pr.id = a.proprietario_id
            WHERE a.status = 'pendente' AND a.tipo = 'debito_proprietario'
            GROUP BY pr.nome
            ORDER BY valor_pendente DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(linhas)
    }
}
