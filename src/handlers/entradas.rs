// src/handlers/entradas.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{ator::Ator, error::AppError},
    config::AppState,
    handlers::validar_nao_negativo,
    models::entrada::Entrada,
    models::sublote::Sublote,
    services::entrada_service::NovoSubloteEntrada,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubloteEntradaPayload {
    #[validate(length(min = 1, message = "O código do sublote é obrigatório."))]
    #[schema(example = "SL-0042")]
    pub codigo: String,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[schema(example = "1000.0")]
    pub peso: Decimal,

    pub produto_id: Option<Uuid>,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[serde(default)]
    pub custo_unitario: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarEntradaPayload {
    #[validate(length(min = 1, message = "O número do documento é obrigatório."))]
    #[schema(example = "NF-2026-0142")]
    pub numero: String,

    pub proprietario_id: Option<Uuid>,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[serde(default)]
    #[schema(example = "50000.00")]
    pub valor_total: Decimal,

    /// Compra/consignação gera custo; material só para beneficiar, não.
    #[schema(example = true)]
    pub gera_custo: bool,

    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub data_entrada: NaiveDate,

    pub observacoes: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub sublotes: Vec<SubloteEntradaPayload>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntradaCriada {
    pub entrada: Entrada,
    pub sublotes: Vec<Sublote>,
}

// POST /api/entradas
#[utoipa::path(
    post,
    path = "/api/entradas",
    tag = "Entradas",
    request_body = CriarEntradaPayload,
    responses(
        (status = 201, description = "Entrada criada com os sublotes iniciais", body = EntradaCriada)
    ),
    params(
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    )
)]
pub async fn criar_entrada(
    State(app_state): State<AppState>,
    ator: Ator,
    Json(payload): Json<CriarEntradaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sublotes: Vec<NovoSubloteEntrada> = payload
        .sublotes
        .iter()
        .map(|s| NovoSubloteEntrada {
            codigo: s.codigo.clone(),
            peso: s.peso,
            produto_id: s.produto_id,
            custo_unitario: s.custo_unitario,
        })
        .collect();

    let (entrada, criados) = app_state
        .entrada_service
        .criar(
            &app_state.db_pool,
            ator.nome(),
            &payload.numero,
            payload.proprietario_id,
            payload.valor_total,
            payload.gera_custo,
            payload.data_entrada,
            payload.observacoes.as_deref(),
            &sublotes,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntradaCriada {
            entrada,
            sublotes: criados,
        }),
    ))
}

// GET /api/entradas
#[utoipa::path(
    get,
    path = "/api/entradas",
    tag = "Entradas",
    responses(
        (status = 200, description = "Lista de documentos de entrada", body = [Entrada])
    )
)]
pub async fn listar_entradas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entradas = app_state
        .entrada_service
        .listar(&app_state.db_pool)
        .await?;

    Ok(Json(entradas))
}
