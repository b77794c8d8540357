// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{AcertoPendentePorProprietario, EstoquePorProduto, ResumoDashboard},
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo geral do painel", body = ResumoDashboard)
    )
)]
pub async fn resumo(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state
        .dashboard_service
        .resumo(&app_state.db_pool)
        .await?;

    Ok(Json(resumo))
}

// GET /api/dashboard/estoque-por-produto
#[utoipa::path(
    get,
    path = "/api/dashboard/estoque-por-produto",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Estoque disponível agregado por produto", body = [EstoquePorProduto])
    )
)]
pub async fn estoque_por_produto(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let estoque = app_state
        .dashboard_service
        .estoque_por_produto(&app_state.db_pool)
        .await?;

    Ok(Json(estoque))
}

// GET /api/dashboard/acertos-pendentes
#[utoipa::path(
    get,
    path = "/api/dashboard/acertos-pendentes",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Saldo devedor pendente por proprietário", body = [AcertoPendentePorProprietario])
    )
)]
pub async fn acertos_pendentes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pendentes = app_state
        .dashboard_service
        .acertos_pendentes_por_proprietario(&app_state.db_pool)
        .await?;

    Ok(Json(pendentes))
}
