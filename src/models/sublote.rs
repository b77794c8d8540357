// src/models/sublote.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "status_sublote", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusSublote {
    Disponivel,
    Reservado,
    EmBeneficiamento,
    Consumido,
    Vendido,
}

/// Quantidade física de material. Sublotes consumidos/vendidos têm o peso
/// zerado e não podem entrar em novas operações; `sublote_pai_id` forma a
/// árvore de rastreabilidade.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sublote {
    pub id: Uuid,
    #[schema(example = "SL-0042")]
    pub codigo: String,
    #[schema(example = "1000.000")]
    pub peso: Decimal,
    pub produto_id: Option<Uuid>,
    /// Nulo significa material da casa.
    pub proprietario_id: Option<Uuid>,
    pub entrada_id: Uuid,
    pub status: StatusSublote,
    #[schema(example = "12.5000")]
    pub custo_unitario: Decimal,
    pub sublote_pai_id: Option<Uuid>,
    /// Preenchido nos lotes derivados de um beneficiamento.
    pub beneficiamento_origem_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projeção do catálogo usada pela consolidação: sublote + código do
/// produto resolvido.
#[derive(Debug, Clone, FromRow)]
pub struct SubloteCatalogo {
    pub id: Uuid,
    pub codigo: String,
    pub peso: Decimal,
    pub codigo_produto: Option<String>,
    pub sublote_pai_id: Option<Uuid>,
    pub entrada_id: Uuid,
    pub status: StatusSublote,
    pub custo_unitario: Decimal,
}

/// Projeção usada pela classificação de cenário da saída: sublote + fatos
/// de procedência resolvidos (documento e proprietário).
#[derive(Debug, Clone, FromRow)]
pub struct SubloteProcedencia {
    pub id: Uuid,
    pub codigo: String,
    pub peso: Decimal,
    pub custo_unitario: Decimal,
    pub status: StatusSublote,
    pub sublote_pai_id: Option<Uuid>,
    pub proprietario_id: Option<Uuid>,
    pub gera_custo: bool,
    pub eh_casa: Option<bool>,
    pub comissao_pct: Option<Decimal>,
}
