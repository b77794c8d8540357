// src/db/beneficiamento_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    domain::consolidacao::{GrupoDocumento, GrupoProduto},
    domain::custos::ResumoCustos,
    models::beneficiamento::{
        Beneficiamento, BeneficiamentoDocumento, BeneficiamentoInsumo, BeneficiamentoProduto,
        StatusBeneficiamento,
    },
};

#[derive(Clone)]
pub struct BeneficiamentoRepository {
    pool: PgPool,
}

impl BeneficiamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere o cabeçalho da operação com os custos já rateados.
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        codigo: &str,
        custos: &ResumoCustos,
        frete_entrada_por_kg: Decimal,
        frete_saida_por_kg: Decimal,
        mao_obra_terceiro_por_kg: Decimal,
        mao_obra_propria_por_kg: Decimal,
    ) -> Result<Beneficiamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let operacao = sqlx::query_as::<_, Beneficiamento>(
            r#"
            INSERT INTO beneficiamentos (
                codigo, peso_entrada, peso_estimado_saida,
                perda_padrao_media_pct, perda_cobrada_media_pct,
                frete_entrada_por_kg, frete_saida_por_kg,
                mao_obra_terceiro_por_kg, mao_obra_propria_por_kg,
                custo_frete_entrada, custo_frete_saida,
                custo_mao_obra_terceiro, custo_mao_obra_propria,
                custo_operacional, custo_financeiro, custo_total
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(custos.peso_entrada)
        .bind(custos.peso_estimado_saida)
        .bind(custos.perda_padrao_media_pct.round_dp(4))
        .bind(custos.perda_cobrada_media_pct.round_dp(4))
        .bind(frete_entrada_por_kg)
        .bind(frete_saida_por_kg)
        .bind(mao_obra_terceiro_por_kg)
        .bind(mao_obra_propria_por_kg)
        .bind(custos.custo_frete_entrada.round_dp(2))
        .bind(custos.custo_frete_saida.round_dp(2))
        .bind(custos.custo_mao_obra_terceiro.round_dp(2))
        .bind(custos.custo_mao_obra_propria.round_dp(2))
        .bind(custos.custo_operacional.round_dp(2))
        .bind(custos.custo_financeiro.round_dp(2))
        .bind(custos.custo_total.round_dp(2))
        .fetch_one(executor)
        .await?;

        Ok(operacao)
    }

    pub async fn buscar_por_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Beneficiamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let operacao =
            sqlx::query_as::<_, Beneficiamento>("SELECT * FROM beneficiamentos WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(operacao)
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        status: Option<StatusBeneficiamento>,
    ) -> Result<Vec<Beneficiamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let operacoes = sqlx::query_as::<_, Beneficiamento>(
            r#"
            SELECT * FROM beneficiamentos
            WHERE ($1::status_beneficiamento IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(executor)
        .await?;

        Ok(operacoes)
    }

    pub async fn inserir_grupo_produto<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
        grupo: &GrupoProduto,
    ) -> Result<BeneficiamentoProduto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linha = sqlx::query_as::<_, BeneficiamentoProduto>(
            r#"
            INSERT INTO beneficiamento_produtos (
                beneficiamento_id, codigo_produto, peso,
                perda_padrao_pct, perda_cobrada_pct, peso_estimado_saida
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(beneficiamento_id)
        .bind(&grupo.codigo_produto)
        .bind(grupo.peso_total)
        .bind(grupo.perda_padrao_pct)
        .bind(grupo.perda_cobrada_pct)
        .bind(grupo.peso_estimado_saida.round_dp(3))
        .fetch_one(executor)
        .await?;

        Ok(linha)
    }

    pub async fn listar_grupos_produto<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
    ) -> Result<Vec<BeneficiamentoProduto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let grupos = sqlx::query_as::<_, BeneficiamentoProduto>(
            "SELECT * FROM beneficiamento_produtos WHERE beneficiamento_id = $1",
        )
        .bind(beneficiamento_id)
        .fetch_all(executor)
        .await?;

        Ok(grupos)
    }

    pub async fn inserir_grupo_documento<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
        grupo: &GrupoDocumento,
    ) -> Result<BeneficiamentoDocumento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let linha = sqlx::query_as::<_, BeneficiamentoDocumento>(
            r#"
            INSERT INTO beneficiamento_documentos (
                beneficiamento_id, entrada_id, valor_documento,
                quantidade_sublotes, encargo_financeiro
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(beneficiamento_id)
        .bind(grupo.entrada_id)
        .bind(grupo.valor_documento)
        .bind(grupo.quantidade_sublotes as i32)
        .bind(grupo.encargo_financeiro)
        .fetch_one(executor)
        .await?;

        Ok(linha)
    }

    /// Encargos gravados na criação; é daqui que a finalização lê, não da
    /// taxa global vigente.
    pub async fn listar_grupos_documento<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
    ) -> Result<Vec<BeneficiamentoDocumento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let grupos = sqlx::query_as::<_, BeneficiamentoDocumento>(
            "SELECT * FROM beneficiamento_documentos WHERE beneficiamento_id = $1",
        )
        .bind(beneficiamento_id)
        .fetch_all(executor)
        .await?;

        Ok(grupos)
    }

    pub async fn inserir_insumo<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
        sublote_id: Uuid,
        peso_consumido: Decimal,
        custo_unitario_original: Decimal,
    ) -> Result<BeneficiamentoInsumo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insumo = sqlx::query_as::<_, BeneficiamentoInsumo>(
            r#"
            INSERT INTO beneficiamento_insumos (
                beneficiamento_id, sublote_id, peso_consumido, custo_unitario_original
            )
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(beneficiamento_id)
        .bind(sublote_id)
        .bind(peso_consumido)
        .bind(custo_unitario_original)
        .fetch_one(executor)
        .await?;

        Ok(insumo)
    }

    pub async fn listar_insumos<'e, E>(
        &self,
        executor: E,
        beneficiamento_id: Uuid,
    ) -> Result<Vec<BeneficiamentoInsumo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insumos = sqlx::query_as::<_, BeneficiamentoInsumo>(
            "SELECT * FROM beneficiamento_insumos WHERE beneficiamento_id = $1",
        )
        .bind(beneficiamento_id)
        .fetch_all(executor)
        .await?;

        Ok(insumos)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn registrar_finalizacao<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        peso_real_saida: Decimal,
        custo_financeiro: Decimal,
        custo_total: Decimal,
        destino: Option<&str>,
        finalizado_em: DateTime<Utc>,
    ) -> Result<Beneficiamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let operacao = sqlx::query_as::<_, Beneficiamento>(
            r#"
            UPDATE beneficiamentos
            SET status = 'finalizado',
                peso_real_saida = $1,
                custo_financeiro = $2,
                custo_total = $3,
                destino = $4,
                finalizado_em = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(peso_real_saida)
        .bind(custo_financeiro)
        .bind(custo_total)
        .bind(destino)
        .bind(finalizado_em)
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(operacao)
    }

    /// Grupos, documentos e insumos caem em cascata.
    pub async fn excluir<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM beneficiamentos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn proximo_codigo<'e, E>(&self, executor: E) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sequencial =
            sqlx::query_scalar::<_, i64>("SELECT nextval('seq_beneficiamento_codigo')")
                .fetch_one(executor)
                .await?;

        Ok(format!("BEN-{sequencial:05}"))
    }
}
