// src/models/lme.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Cotação LME persistida no histórico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CotacaoLme {
    pub id: Uuid,
    #[schema(example = "cobre")]
    pub metal: String,
    #[schema(example = "9342.50")]
    pub preco_usd: Decimal,
    #[schema(example = "-0.8")]
    pub variacao_pct: Option<Decimal>,
    #[schema(value_type = String, format = Date, example = "2026-08-06")]
    pub data_cotacao: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Payload retornado pela função remota de cotações (caixa preta: ou vem a
/// lista, ou vem erro).
#[derive(Debug, Clone, Deserialize)]
pub struct CotacaoRemota {
    pub metal: String,
    pub preco_usd: Decimal,
    #[serde(default)]
    pub variacao_pct: Option<Decimal>,
    pub data: NaiveDate,
}
