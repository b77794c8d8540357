// src/handlers/importacao.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{ator::Ator, error::AppError},
    config::AppState,
    services::importacao_service::{LinhaImportacaoSublote, RelatorioImportacao},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportarSublotesPayload {
    #[validate(length(min = 1, message = "Envie ao menos uma linha."))]
    pub linhas: Vec<LinhaImportacaoSublote>,

    /// Cria produtos/proprietários/entradas referenciados por nome que
    /// ainda não existem, em vez de rejeitar a linha.
    #[serde(default)]
    pub auto_criar_referencias: bool,
}

// POST /api/importacao/sublotes
#[utoipa::path(
    post,
    path = "/api/importacao/sublotes",
    tag = "Importacao",
    request_body = ImportarSublotesPayload,
    responses(
        (status = 200, description = "Relatório linha a linha da importação", body = RelatorioImportacao)
    ),
    params(
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    )
)]
pub async fn importar_sublotes(
    State(app_state): State<AppState>,
    ator: Ator,
    Json(payload): Json<ImportarSublotesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let relatorio = app_state
        .importacao_service
        .importar_sublotes(ator.nome(), &payload.linhas, payload.auto_criar_referencias)
        .await?;

    Ok(Json(relatorio))
}
