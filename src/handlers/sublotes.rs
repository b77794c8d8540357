// src/handlers/sublotes.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sublote::{StatusSublote, Sublote},
};

#[derive(Debug, Deserialize)]
pub struct FiltroSublotes {
    pub status: Option<StatusSublote>,
}

// GET /api/sublotes
#[utoipa::path(
    get,
    path = "/api/sublotes",
    tag = "Sublotes",
    params(
        ("status" = Option<String>, Query, description = "Filtra por status (disponivel, reservado, em_beneficiamento, consumido, vendido)")
    ),
    responses(
        (status = 200, description = "Lista de sublotes", body = [Sublote])
    )
)]
pub async fn listar_sublotes(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroSublotes>,
) -> Result<impl IntoResponse, AppError> {
    let sublotes = app_state
        .entrada_service
        .listar_sublotes(&app_state.db_pool, filtro.status)
        .await?;

    Ok(Json(sublotes))
}

// GET /api/sublotes/{id}
#[utoipa::path(
    get,
    path = "/api/sublotes/{id}",
    tag = "Sublotes",
    params(
        ("id" = Uuid, Path, description = "ID do sublote")
    ),
    responses(
        (status = 200, description = "Sublote", body = Sublote),
        (status = 404, description = "Sublote não encontrado")
    )
)]
pub async fn buscar_sublote(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sublote = app_state
        .entrada_service
        .buscar_sublote(&app_state.db_pool, id)
        .await?;

    Ok(Json(sublote))
}
