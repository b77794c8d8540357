// src/handlers/acertos.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::{ator::Ator, error::AppError},
    config::AppState,
    models::acerto::{AcertoFinanceiro, StatusAcerto},
};

#[derive(Debug, Deserialize)]
pub struct FiltroAcertos {
    pub status: Option<StatusAcerto>,
}

// GET /api/acertos
#[utoipa::path(
    get,
    path = "/api/acertos",
    tag = "Acertos",
    params(
        ("status" = Option<String>, Query, description = "Filtra por status (pendente, confirmado)")
    ),
    responses(
        (status = 200, description = "Lista de acertos financeiros", body = [AcertoFinanceiro])
    )
)]
pub async fn listar_acertos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroAcertos>,
) -> Result<impl IntoResponse, AppError> {
    let acertos = app_state
        .acerto_service
        .listar(&app_state.db_pool, filtro.status)
        .await?;

    Ok(Json(acertos))
}

// POST /api/acertos/{id}/confirmar
#[utoipa::path(
    post,
    path = "/api/acertos/{id}/confirmar",
    tag = "Acertos",
    params(
        ("id" = Uuid, Path, description = "ID do acerto"),
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    ),
    responses(
        (status = 200, description = "Acerto confirmado", body = AcertoFinanceiro),
        (status = 422, description = "Acerto já confirmado")
    )
)]
pub async fn confirmar_acerto(
    State(app_state): State<AppState>,
    ator: Ator,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let acerto = app_state
        .acerto_service
        .confirmar(&app_state.db_pool, ator.nome(), id)
        .await?;

    Ok(Json(acerto))
}
