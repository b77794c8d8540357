use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::cenario::ErroClassificacao;
use crate::domain::consolidacao::ErroConsolidacao;
use crate::domain::custos::ErroRateio;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Regras de negócio violadas (consolidação, classificação, rateio,
    // guardas de status). A mensagem vai direto para o usuário.
    #[error("{0}")]
    RegraDeNegocio(String),

    #[error("{0} não encontrado(a)")]
    NaoEncontrado(&'static str),

    #[error("Código já cadastrado: {0}")]
    CodigoDuplicado(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Falha ao consultar cotações externas: {0}")]
    CotacaoExterna(String),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<ErroConsolidacao> for AppError {
    fn from(erro: ErroConsolidacao) -> Self {
        AppError::RegraDeNegocio(erro.to_string())
    }
}

impl From<ErroClassificacao> for AppError {
    fn from(erro: ErroClassificacao) -> Self {
        AppError::RegraDeNegocio(erro.to_string())
    }
}

impl From<ErroRateio> for AppError {
    fn from(erro: ErroRateio) -> Self {
        AppError::RegraDeNegocio(erro.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::RegraDeNegocio(mensagem) => {
                let body = Json(json!({ "error": mensagem }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            AppError::NaoEncontrado(entidade) => {
                let body = Json(json!({ "error": format!("{entidade} não encontrado(a).") }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            AppError::CodigoDuplicado(codigo) => {
                let body = Json(json!({ "error": format!("Código já cadastrado: {codigo}") }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::CotacaoExterna(motivo) => {
                tracing::warn!("Provedor de cotações falhou: {}", motivo);
                (StatusCode::BAD_GATEWAY, "Serviço de cotações indisponível.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
