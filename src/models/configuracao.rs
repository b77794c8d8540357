// src/models/configuracao.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Linha única de configurações globais do negócio.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguracaoGlobal {
    pub id: i32,
    /// Taxa aplicada sobre o valor do documento de entrada para derivar o
    /// encargo financeiro.
    #[schema(example = "1.8")]
    pub taxa_financeira_pct: Decimal,
    pub proprietario_casa_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}
