// src/handlers/lme.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    common::{ator::Ator, error::AppError},
    config::AppState,
    models::lme::CotacaoLme,
};

fn limite_padrao() -> i64 {
    30
}

#[derive(Debug, Deserialize)]
pub struct FiltroHistorico {
    pub metal: Option<String>,
    #[serde(default = "limite_padrao")]
    pub limite: i64,
}

// POST /api/lme/atualizar
#[utoipa::path(
    post,
    path = "/api/lme/atualizar",
    tag = "LME",
    responses(
        (status = 200, description = "Cotações consultadas e gravadas no histórico", body = [CotacaoLme]),
        (status = 502, description = "Provedor de cotações indisponível")
    ),
    params(
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    )
)]
pub async fn atualizar_cotacoes(
    State(app_state): State<AppState>,
    ator: Ator,
) -> Result<impl IntoResponse, AppError> {
    let cotacoes = app_state
        .lme_service
        .atualizar(&app_state.db_pool, ator.nome())
        .await?;

    Ok(Json(cotacoes))
}

// GET /api/lme/historico
#[utoipa::path(
    get,
    path = "/api/lme/historico",
    tag = "LME",
    params(
        ("metal" = Option<String>, Query, description = "Filtra por metal"),
        ("limite" = Option<i64>, Query, description = "Máximo de linhas (padrão 30)")
    ),
    responses(
        (status = 200, description = "Histórico de cotações", body = [CotacaoLme])
    )
)]
pub async fn historico_cotacoes(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroHistorico>,
) -> Result<impl IntoResponse, AppError> {
    let limite = filtro.limite.clamp(1, 500);
    let cotacoes = app_state
        .lme_service
        .historico(&app_state.db_pool, filtro.metal.as_deref(), limite)
        .await?;

    Ok(Json(cotacoes))
}

// GET /api/lme/ultimas
#[utoipa::path(
    get,
    path = "/api/lme/ultimas",
    tag = "LME",
    responses(
        (status = 200, description = "Última cotação registrada de cada metal", body = [CotacaoLme])
    )
)]
pub async fn ultimas_cotacoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cotacoes = app_state.lme_service.ultimas(&app_state.db_pool).await?;

    Ok(Json(cotacoes))
}
