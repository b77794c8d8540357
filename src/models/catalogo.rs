// src/models/catalogo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Tipos de Produto (chave de consolidação) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,
    #[schema(example = "CU-MIS")]
    pub codigo: String,
    #[schema(example = "Cobre Misto")]
    pub nome: String,
    /// Perda padrão sugerida no cadastro (a consolidação usa o que o
    /// usuário digitar, não este valor).
    #[schema(example = "3.0")]
    pub perda_padrao_pct: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Proprietários de material ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proprietario {
    pub id: Uuid,
    #[schema(example = "Metalúrgica Ypê LTDA")]
    pub nome: String,
    pub documento: Option<String>,
    /// Entidade casa (IBRAC). Sublotes sem proprietário também são
    /// tratados como da casa.
    #[schema(example = false)]
    pub eh_casa: bool,
    /// Comissão aplicada no cenário de operação de terceiro.
    #[schema(example = "5.0")]
    pub comissao_pct: Decimal,
    pub created_at: DateTime<Utc>,
}
