// src/handlers/auditoria.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState, models::auditoria::RegistroAuditoria};

fn limite_padrao() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct FiltroAuditoria {
    pub entidade: Option<String>,
    #[serde(default = "limite_padrao")]
    pub limite: i64,
}

// GET /api/auditoria
#[utoipa::path(
    get,
    path = "/api/auditoria",
    tag = "Auditoria",
    params(
        ("entidade" = Option<String>, Query, description = "Filtra por entidade (beneficiamento, saida, entrada, ...)"),
        ("limite" = Option<i64>, Query, description = "Máximo de linhas (padrão 50)")
    ),
    responses(
        (status = 200, description = "Registros de auditoria, mais recentes primeiro", body = [RegistroAuditoria])
    )
)]
pub async fn listar_auditoria(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroAuditoria>,
) -> Result<impl IntoResponse, AppError> {
    let limite = filtro.limite.clamp(1, 500);
    let registros = app_state
        .auditoria_service
        .listar(&app_state.db_pool, filtro.entidade.as_deref(), limite)
        .await?;

    Ok(Json(registros))
}
