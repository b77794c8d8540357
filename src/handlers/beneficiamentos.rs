// src/handlers/beneficiamentos.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
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
    domain::consolidacao::PercentuaisPerda,
    domain::custos::TarifasBeneficiamento,
    models::beneficiamento::{Beneficiamento, BeneficiamentoDetalhe, StatusBeneficiamento},
    services::beneficiamento_service::{ParametrosCriacao, SimulacaoBeneficiamento},
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarBeneficiamentoPayload {
    #[validate(length(min = 1, message = "Selecione ao menos um sublote."))]
    pub sublote_ids: Vec<Uuid>,

    /// Percentuais de perda por código de produto. Sem entrada para um
    /// código, ambos os percentuais valem zero.
    #[serde(default)]
    pub perdas_por_produto: HashMap<String, PercentuaisPerda>,

    #[serde(default)]
    pub tarifas: TarifasBeneficiamento,
}

impl CriarBeneficiamentoPayload {
    fn parametros(&self) -> ParametrosCriacao {
        ParametrosCriacao {
            sublote_ids: self.sublote_ids.clone(),
            perdas_por_produto: self.perdas_por_produto.clone(),
            tarifas: self.tarifas,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinalizarBeneficiamentoPayload {
    #[schema(example = "955.500")]
    pub peso_real_saida: Decimal,

    #[schema(example = "Fundição Campinas")]
    pub destino: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroBeneficiamentos {
    pub status: Option<StatusBeneficiamento>,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/beneficiamentos/simulacao
#[utoipa::path(
    post,
    path = "/api/beneficiamentos/simulacao",
    tag = "Beneficiamentos",
    request_body = CriarBeneficiamentoPayload,
    responses(
        (status = 200, description = "Prévia de consolidação e custos, nada persistido", body = SimulacaoBeneficiamento),
        (status = 422, description = "Seleção ou percentuais inválidos")
    )
)]
pub async fn simular_beneficiamento(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarBeneficiamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let simulacao = app_state
        .beneficiamento_service
        .simular(&app_state.db_pool, &payload.parametros())
        .await?;

    Ok(Json(simulacao))
}

// POST /api/beneficiamentos
#[utoipa::path(
    post,
    path = "/api/beneficiamentos",
    tag = "Beneficiamentos",
    request_body = CriarBeneficiamentoPayload,
    responses(
        (status = 201, description = "Operação criada em andamento", body = BeneficiamentoDetalhe),
        (status = 422, description = "Seleção ou percentuais inválidos")
    ),
    params(
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    )
)]
pub async fn criar_beneficiamento(
    State(app_state): State<AppState>,
    ator: Ator,
    Json(payload): Json<CriarBeneficiamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detalhe = app_state
        .beneficiamento_service
        .criar(&app_state.db_pool, ator.nome(), &payload.parametros())
        .await?;

    Ok((StatusCode::CREATED, Json(detalhe)))
}

// GET /api/beneficiamentos
#[utoipa::path(
    get,
    path = "/api/beneficiamentos",
    tag = "Beneficiamentos",
    params(
        ("status" = Option<String>, Query, description = "Filtra por status (em_andamento, finalizado)")
    ),
    responses(
        (status = 200, description = "Lista de operações", body = [Beneficiamento])
    )
)]
pub async fn listar_beneficiamentos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroBeneficiamentos>,
) -> Result<impl IntoResponse, AppError> {
    let operacoes = app_state
        .beneficiamento_service
        .listar(&app_state.db_pool, filtro.status)
        .await?;

    Ok(Json(operacoes))
}

// GET /api/beneficiamentos/{id}
#[utoipa::path(
    get,
    path = "/api/beneficiamentos/{id}",
    tag = "Beneficiamentos",
    params(
        ("id" = Uuid, Path, description = "ID da operação")
    ),
    responses(
        (status = 200, description = "Detalhe da operação", body = BeneficiamentoDetalhe),
        (status = 404, description = "Operação não encontrada")
    )
)]
pub async fn detalhe_beneficiamento(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state
        .beneficiamento_service
        .detalhe(&app_state.db_pool, id)
        .await?;

    Ok(Json(detalhe))
}

// POST /api/beneficiamentos/{id}/finalizar
#[utoipa::path(
    post,
    path = "/api/beneficiamentos/{id}/finalizar",
    tag = "Beneficiamentos",
    request_body = FinalizarBeneficiamentoPayload,
    params(
        ("id" = Uuid, Path, description = "ID da operação"),
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    ),
    responses(
        (status = 200, description = "Operação finalizada com os lotes derivados criados", body = Beneficiamento),
        (status = 422, description = "Operação já finalizada ou peso real inválido")
    )
)]
pub async fn finalizar_beneficiamento(
    State(app_state): State<AppState>,
    ator: Ator,
    Path(id): Path<Uuid>,
    Json(payload): Json<FinalizarBeneficiamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let operacao = app_state
        .beneficiamento_service
        .finalizar(
            &app_state.db_pool,
            ator.nome(),
            id,
            payload.peso_real_saida,
            payload.destino.as_deref(),
        )
        .await?;

    Ok(Json(operacao))
}

// DELETE /api/beneficiamentos/{id}
#[utoipa::path(
    delete,
    path = "/api/beneficiamentos/{id}",
    tag = "Beneficiamentos",
    params(
        ("id" = Uuid, Path, description = "ID da operação"),
        ("x-usuario" = Option<String>, Header, description = "Usuário para auditoria")
    ),
    responses(
        (status = 204, description = "Operação excluída, insumos restaurados"),
        (status = 422, description = "Operação finalizada ou com lote derivado já vendido")
    )
)]
pub async fn excluir_beneficiamento(
    State(app_state): State<AppState>,
    ator: Ator,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .beneficiamento_service
        .excluir(&app_state.db_pool, ator.nome(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
