// src/handlers/contratos.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::contrato::{
        Contrato, CreateContratoPayload, StatusContrato, TipoContrato, UpdateContratoPayload,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListarContratosQuery {
    pub tipo: Option<TipoContrato>,
    pub status: Option<StatusContrato>,
}

// POST /api/contratos
#[utoipa::path(
    post,
    path = "/api/contratos",
    tag = "Contratos",
    request_body = CreateContratoPayload,
    responses(
        (status = 201, description = "Contrato criado em rascunho", body = Contrato),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn criar_contrato(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateContratoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contrato = app_state.contrato_service.criar(&payload).await?;
    Ok((StatusCode::CREATED, Json(contrato)))
}

// GET /api/contratos
#[utoipa::path(
    get,
    path = "/api/contratos",
    tag = "Contratos",
    params(
        ("tipo" = Option<TipoContrato>, Query, description = "Filtra pelo tipo do contrato"),
        ("status" = Option<StatusContrato>, Query, description = "Filtra pelo status do ciclo de vida")
    ),
    responses(
        (status = 200, description = "Lista de contratos", body = Vec<Contrato>)
    )
)]
pub async fn listar_contratos(
    State(app_state): State<AppState>,
    Query(query): Query<ListarContratosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let contratos = app_state
        .contrato_service
        .listar(query.tipo, query.status)
        .await?;
    Ok(Json(contratos))
}

// GET /api/contratos/{id}
#[utoipa::path(
    get,
    path = "/api/contratos/{id}",
    tag = "Contratos",
    params(
        ("id" = Uuid, Path, description = "ID do contrato")
    ),
    responses(
        (status = 200, description = "Contrato encontrado", body = Contrato),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn buscar_contrato(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let contrato = app_state.contrato_service.buscar(id).await?;
    Ok(Json(contrato))
}

// PATCH /api/contratos/{id}
#[utoipa::path(
    patch,
    path = "/api/contratos/{id}",
    tag = "Contratos",
    request_body = UpdateContratoPayload,
    params(
        ("id" = Uuid, Path, description = "ID do contrato")
    ),
    responses(
        (status = 200, description = "Contrato atualizado", body = Contrato),
        (status = 404, description = "Contrato não encontrado"),
        (status = 409, description = "Transição de status não permitida")
    )
)]
pub async fn atualizar_contrato(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContratoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let contrato = app_state.contrato_service.atualizar(id, &payload).await?;
    Ok(Json(contrato))
}

// DELETE /api/contratos/{id}
#[utoipa::path(
    delete,
    path = "/api/contratos/{id}",
    tag = "Contratos",
    params(
        ("id" = Uuid, Path, description = "ID do contrato")
    ),
    responses(
        (status = 204, description = "Contrato removido"),
        (status = 404, description = "Contrato não encontrado")
    )
)]
pub async fn deletar_contrato(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contrato_service.deletar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/contratos/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/contratos/{id}/pdf",
    tag = "Contratos",
    params(
        ("id" = Uuid, Path, description = "ID do contrato")
    ),
    responses(
        (status = 200, description = "PDF do contrato", content_type = "application/pdf"),
        (status = 404, description = "Contrato não encontrado"),
        (status = 500, description = "Falha na renderização do PDF")
    )
)]
pub async fn gerar_pdf_contrato(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state.documento_service.gerar_pdf_contrato(id).await?;

    // Configura os headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (
            header::CONTENT_DISPOSITION,
            &format!("attachment; filename=\"contrato_{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
