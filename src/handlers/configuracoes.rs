// src/handlers/configuracoes.rs

use axum::{extract::State, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{ator::Ator, error::AppError},
    config::AppState,
    handlers::validar_nao_negativo,
    models::configuracao::ConfiguracaoGlobal,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarConfiguracaoPayload {
    #[validate(custom(function = "validar_nao_negativo"))]
    #[schema(example = "1.8")]
    pub taxa_financeira_pct: Decimal,

    pub proprietario_casa_id: Option<Uuid>,
}

// GET /api/configuracoes
#[utoipa::path(
    get,
    path = "/api/configuracoes",
    tag = "Configuracoes",
    responses(
        (status = 200, description = "Configurações globais", body = ConfiguracaoGlobal)
    )
)]
pub async fn obter_configuracoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let configuracao = app_state
        .configuracao_service
        .obter(&app_state.db_pool)
        .await?;

    Ok(Json(configuracao))
}

// PUT /api/configuracoes
#[utoipa::path(
    put,
    path = "/api/configuracoes",
    tag = "Configuracoes",
    request_body = AtualizarConfiguracaoPayload,
    responses(
        (status = 200, description = "Configurações atualizadas", body = ConfiguracaoGlobal)
    ),
    params(
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    )
)]
pub async fn atualizar_configuracoes(
    State(app_state): State<AppState>,
    ator: Ator,
    Json(payload): Json<AtualizarConfiguracaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let configuracao = app_state
        .configuracao_service
        .atualizar(
            &app_state.db_pool,
            ator.nome(),
            payload.taxa_financeira_pct,
            payload.proprietario_casa_id,
        )
        .await?;

    Ok(Json(configuracao))
}
