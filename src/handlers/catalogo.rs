// src/handlers/catalogo.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validar_nao_negativo,
    models::catalogo::{Produto, Proprietario},
};

// ---
// Payload: CriarProduto
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarProdutoPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "CU-MIS")]
    pub codigo: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Cobre Misto")]
    pub nome: String,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[serde(default)]
    #[schema(example = "3.0")]
    pub perda_padrao_pct: Decimal,
}

// POST /api/catalogo/produtos
#[utoipa::path(
    post,
    path = "/api/catalogo/produtos",
    tag = "Catalogo",
    request_body = CriarProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 409, description = "Código já cadastrado")
    )
)]
pub async fn criar_produto(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .catalogo_service
        .criar_produto(
            &app_state.db_pool,
            &payload.codigo,
            &payload.nome,
            payload.perda_padrao_pct,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(produto)))
}

// GET /api/catalogo/produtos
#[utoipa::path(
    get,
    path = "/api/catalogo/produtos",
    tag = "Catalogo",
    responses(
        (status = 200, description = "Lista de produtos", body = [Produto])
    )
)]
pub async fn listar_produtos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state
        .catalogo_service
        .listar_produtos(&app_state.db_pool)
        .await?;

    Ok(Json(produtos))
}

// ---
// Payload: CriarProprietario
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarProprietarioPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Metalúrgica Ypê LTDA")]
    pub nome: String,

    pub documento: Option<String>,

    #[serde(default)]
    #[schema(example = false)]
    pub eh_casa: bool,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[serde(default)]
    #[schema(example = "5.0")]
    pub comissao_pct: Decimal,
}

// POST /api/catalogo/proprietarios
#[utoipa::path(
    post,
    path = "/api/catalogo/proprietarios",
    tag = "Catalogo",
    request_body = CriarProprietarioPayload,
    responses(
        (status = 201, description = "Proprietário criado", body = Proprietario)
    )
)]
pub async fn criar_proprietario(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarProprietarioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let proprietario = app_state
        .catalogo_service
        .criar_proprietario(
            &app_state.db_pool,
            &payload.nome,
            payload.documento.as_deref(),
            payload.eh_casa,
            payload.comissao_pct,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(proprietario)))
}

// GET /api/catalogo/proprietarios
#[utoipa::path(
    get,
    path = "/api/catalogo/proprietarios",
    tag = "Catalogo",
    responses(
        (status = 200, description = "Lista de proprietários", body = [Proprietario])
    )
)]
pub async fn listar_proprietarios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let proprietarios = app_state
        .catalogo_service
        .listar_proprietarios(&app_state.db_pool)
        .await?;

    Ok(Json(proprietarios))
}
