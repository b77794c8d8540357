// src/models/saida.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cenario::Cenario;

/// Transação de saída: consome sublotes disponíveis sob exatamente um
/// cenário de liquidação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Saida {
    pub id: Uuid,
    #[schema(example = "SAI-2026-0019")]
    pub codigo: String,
    pub cenario: Cenario,
    pub cliente: Option<String>,
    #[schema(example = "1000.000")]
    pub peso_total: Decimal,
    #[schema(example = "10.0000")]
    pub preco_unitario: Decimal,
    #[schema(example = "10000.00")]
    pub valor_bruto: Decimal,
    pub custo_beneficiamento: Decimal,
    pub custo_perda: Decimal,
    pub custos_adicionais: Decimal,
    pub custos_deduzidos: Decimal,
    pub comissao_pct: Option<Decimal>,
    pub valor_comissao: Option<Decimal>,
    pub valor_repasse: Option<Decimal>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaidaSublote {
    pub id: Uuid,
    pub saida_id: Uuid,
    pub sublote_id: Uuid,
    /// Peso no momento da venda, usado para restaurar o sublote se a
    /// saída for excluída.
    pub peso_vendido: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaidaDetalhe {
    #[serde(flatten)]
    pub saida: Saida,
    pub sublotes: Vec<SaidaSublote>,
}
