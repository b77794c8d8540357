// src/models/beneficiamento.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "status_beneficiamento", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusBeneficiamento {
    EmAndamento,
    Finalizado,
}

/// Operação de beneficiamento: agrupa sublotes de entrada, percentuais de
/// perda e os custos rateados. Criada em andamento; finalizada quando o
/// peso real de saída e o destino são apurados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiamento {
    pub id: Uuid,
    #[schema(example = "BEN-2026-0007")]
    pub codigo: String,
    pub status: StatusBeneficiamento,
    #[schema(example = "1000.000")]
    pub peso_entrada: Decimal,
    #[schema(example = "970.000")]
    pub peso_estimado_saida: Decimal,
    pub peso_real_saida: Option<Decimal>,
    pub perda_padrao_media_pct: Decimal,
    pub perda_cobrada_media_pct: Decimal,
    pub frete_entrada_por_kg: Decimal,
    pub frete_saida_por_kg: Decimal,
    pub mao_obra_terceiro_por_kg: Decimal,
    pub mao_obra_propria_por_kg: Decimal,
    pub custo_frete_entrada: Decimal,
    pub custo_frete_saida: Decimal,
    pub custo_mao_obra_terceiro: Decimal,
    pub custo_mao_obra_propria: Decimal,
    pub custo_operacional: Decimal,
    pub custo_financeiro: Decimal,
    pub custo_total: Decimal,
    pub destino: Option<String>,
    pub finalizado_em: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Grupo consolidado por produto, persistido na criação da operação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiamentoProduto {
    pub id: Uuid,
    pub beneficiamento_id: Uuid,
    #[schema(example = "CU-MIS")]
    pub codigo_produto: String,
    pub peso: Decimal,
    pub perda_padrao_pct: Decimal,
    pub perda_cobrada_pct: Decimal,
    pub peso_estimado_saida: Decimal,
}

/// Grupo consolidado por documento. O encargo gravado aqui é o que a
/// finalização usa, ainda que a taxa global tenha mudado desde a criação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiamentoDocumento {
    pub id: Uuid,
    pub beneficiamento_id: Uuid,
    pub entrada_id: Uuid,
    pub valor_documento: Decimal,
    pub quantidade_sublotes: i32,
    pub encargo_financeiro: Decimal,
}

/// Vínculo com um sublote de entrada; guarda o peso e o custo originais
/// para a restauração na exclusão e o rateio na finalização.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiamentoInsumo {
    pub id: Uuid,
    pub beneficiamento_id: Uuid,
    pub sublote_id: Uuid,
    pub peso_consumido: Decimal,
    pub custo_unitario_original: Decimal,
}

/// Detalhe completo de uma operação para o frontend.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiamentoDetalhe {
    #[serde(flatten)]
    pub operacao: Beneficiamento,
    pub grupos_produto: Vec<BeneficiamentoProduto>,
    pub grupos_documento: Vec<BeneficiamentoDocumento>,
    pub insumos: Vec<BeneficiamentoInsumo>,
}
