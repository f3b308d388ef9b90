// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::contrato::StatusContrato;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia separa erros fatais (transporte, configuração) dos erros
// por registro, que os syncs degradam para "skips" contabilizados.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Parâmetro inválido: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    // Resposta não-2xx da Stays (exceto 404 em buscas de detalhe).
    // Carrega o status HTTP original para repassá-lo ao chamador.
    #[error("Erro na API da Stays ({status}): {mensagem}")]
    StaysApi { status: u16, mensagem: String },

    // A Stays devolveu 2xx mas o corpo não tem o formato contratado
    // (ex: reservas que não vieram como array).
    #[error("Resposta inválida da Stays: {0}")]
    StaysPayloadInvalido(String),

    // Falha de rede/transporte ao falar com a Stays.
    #[error("Erro ao conectar com a API da Stays")]
    StaysIndisponivel(#[from] reqwest::Error),

    // Credenciais ausentes ou ilegíveis. Fatal na inicialização.
    #[error("Configuração da Stays inválida: {0}")]
    StaysConfig(String),

    #[error("Registro duplicado: {0}")]
    UniqueViolation(String),

    #[error("Transição de status inválida: {de:?} -> {para:?}")]
    TransicaoContratoInvalida {
        de: StatusContrato,
        para: StatusContrato,
    },

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message): (StatusCode, String) = match self {
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
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::StaysApi { status, mensagem } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                mensagem,
            ),
            AppError::StaysPayloadInvalido(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::UniqueViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::TransicaoContratoInvalida { de, para } => (
                StatusCode::CONFLICT,
                format!("Transição de status inválida: {:?} -> {:?}", de, para),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError, etc.) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
