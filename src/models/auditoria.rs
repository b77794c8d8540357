// src/models/auditoria.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Registro de auditoria gravado na mesma transação da mutação que o
/// originou.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistroAuditoria {
    pub id: Uuid,
    /// Valor do header X-Usuario; "sistema" quando ausente.
    #[schema(example = "maria.souza")]
    pub ator: String,
    #[schema(example = "finalizar")]
    pub acao: String,
    #[schema(example = "beneficiamento")]
    pub entidade: String,
    pub entidade_id: Option<Uuid>,
    #[schema(value_type = Object)]
    pub detalhes: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
