// src/handlers/saidas.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{ator::Ator, error::AppError},
    config::AppState,
    handlers::validar_nao_negativo,
    models::saida::{Saida, SaidaDetalhe},
    services::saida_service::ParametrosSaida,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarSaidaPayload {
    #[validate(length(min = 1, message = "Selecione ao menos um sublote."))]
    pub sublote_ids: Vec<Uuid>,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[schema(example = "10.0")]
    pub preco_unitario: Decimal,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[serde(default)]
    pub custo_perda: Decimal,

    #[validate(custom(function = "validar_nao_negativo"))]
    #[serde(default)]
    pub custos_adicionais: Decimal,

    /// O tipo de saída repassa os custos de beneficiamento embutidos nos
    /// sublotes?
    #[schema(example = true)]
    pub cobra_custos: bool,

    pub cliente: Option<String>,
    pub observacoes: Option<String>,
}

// POST /api/saidas
#[utoipa::path(
    post,
    path = "/api/saidas",
    tag = "Saidas",
    request_body = CriarSaidaPayload,
    responses(
        (status = 201, description = "Saída criada com os acertos do cenário", body = SaidaDetalhe),
        (status = 422, description = "Seleção indisponível ou de procedência mista")
    ),
    params(
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    )
)]
pub async fn criar_saida(
    State(app_state): State<AppState>,
    ator: Ator,
    Json(payload): Json<CriarSaidaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detalhe = app_state
        .saida_service
        .criar(
            &app_state.db_pool,
            ator.nome(),
            &ParametrosSaida {
                sublote_ids: payload.sublote_ids.clone(),
                preco_unitario: payload.preco_unitario,
                custo_perda: payload.custo_perda,
                custos_adicionais: payload.custos_adicionais,
                cobra_custos: payload.cobra_custos,
                cliente: payload.cliente.clone(),
                observacoes: payload.observacoes.clone(),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detalhe)))
}

// GET /api/saidas
#[utoipa::path(
    get,
    path = "/api/saidas",
    tag = "Saidas",
    responses(
        (status = 200, description = "Lista de saídas", body = [Saida])
    )
)]
pub async fn listar_saidas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let saidas = app_state.saida_service.listar(&app_state.db_pool).await?;

    Ok(Json(saidas))
}

// GET /api/saidas/{id}
#[utoipa::path(
    get,
    path = "/api/saidas/{id}",
    tag = "Saidas",
    params(
        ("id" = Uuid, Path, description = "ID da saída")
    ),
    responses(
        (status = 200, description = "Detalhe da saída", body = SaidaDetalhe),
        (status = 404, description = "Saída não encontrada")
    )
)]
pub async fn detalhe_saida(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state
        .saida_service
        .detalhe(&app_state.db_pool, id)
        .await?;

    Ok(Json(detalhe))
}

// DELETE /api/saidas/{id}
#[utoipa::path(
    delete,
    path = "/api/saidas/{id}",
    tag = "Saidas",
    params(
        ("id" = Uuid, Path, description = "ID da saída"),
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    ),
    responses(
        (status = 204, description = "Saída excluída, sublotes restaurados"),
        (status = 422, description = "Repasse já confirmado")
    )
)]
pub async fn excluir_saida(
    State(app_state): State<AppState>,
    ator: Ator,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .saida_service
        .excluir(&app_state.db_pool, ator.nome(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
