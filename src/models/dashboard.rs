// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Resumo Geral (Os Cards do Topo)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDashboard {
    pub peso_disponivel: Decimal,
    pub peso_em_beneficiamento: Decimal,
    pub beneficiamentos_em_andamento: i64,
    pub acertos_pendentes_valor: Decimal,
    pub acertos_pendentes_quantidade: i64,
    pub saidas_mes_valor: Decimal,
}

// 2. Estoque disponível agregado por produto
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstoquePorProduto {
    pub codigo_produto: String,
    pub nome_produto: String,
    pub peso_total: Decimal,
    pub quantidade_sublotes: i64,
}

// 3. Saldo devedor pendente por proprietário
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcertoPendentePorProprietario {
    pub proprietario: String,
    pub valor_pendente: Decimal,
    pub quantidade: i64,
}
