// src/models/acerto.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "tipo_acerto", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoAcerto {
    /// Dívida da empresa com o proprietário do material.
    DebitoProprietario,
    /// Receita reconhecida pela empresa.
    ReceitaEmpresa,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "status_acerto", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusAcerto {
    Pendente,
    Confirmado,
}

/// Obrigação monetária entre a empresa e um proprietário de material,
/// sempre rastreável à saída que a originou.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcertoFinanceiro {
    pub id: Uuid,
    pub saida_id: Option<Uuid>,
    pub proprietario_id: Option<Uuid>,
    pub tipo: TipoAcerto,
    pub status: StatusAcerto,
    #[schema(example = "8550.00")]
    pub valor: Decimal,
    #[schema(example = "Repasse Saída SAI-2026-0019")]
    pub descricao: String,
    #[schema(value_type = String, format = Date, example = "2026-08-06")]
    pub data_vencimento: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
