// src/models/entrada.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Documento de entrada de material.
///
/// O flag `gera_custo` é o que manda: compra/consignação gera custo
/// (financiamento incide sobre o valor do documento); material recebido
/// só para beneficiar não gera.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entrada {
    pub id: Uuid,
    #[schema(example = "NF-2026-0142")]
    pub numero: String,
    pub proprietario_id: Option<Uuid>,
    #[schema(example = "50000.00")]
    pub valor_total: Decimal,
    #[schema(example = true)]
    pub gera_custo: bool,
    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub data_entrada: NaiveDate,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}
